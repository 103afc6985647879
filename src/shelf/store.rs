//! The in-memory bookshelf

use std::time::SystemTime;

use tracing::{debug, info};

use super::error::ShelfError;
use super::model::{Book, BookDraft, BookId};

/// Hands out creation-ordered ids: the wall clock in milliseconds, bumped past
/// the last id issued so two books added within one millisecond never collide.
#[derive(Debug, Clone, Default)]
struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    fn seeded(books: &[Book]) -> Self {
        Self { last: books.iter().map(|b| b.id().0).max().unwrap_or(0) }
    }

    fn next(&mut self) -> BookId {
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map_or(0, |d| d.as_millis() as u64);
        self.next_at(now)
    }

    fn next_at(&mut self, now_ms: u64) -> BookId {
        let id = now_ms.max(self.last.saturating_add(1));
        self.last = id;
        BookId(id)
    }
}

/// Ordered collection of books, insertion order preserved
#[derive(Debug, Clone, Default)]
pub struct Bookshelf {
    books: Vec<Book>,
    ids: IdGenerator,
}

impl Bookshelf {
    /// Create an empty bookshelf
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap books loaded from storage
    pub fn from_books(books: Vec<Book>) -> Self {
        let ids = IdGenerator::seeded(&books);
        Self { books, ids }
    }

    /// All books in insertion order
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Get a book by id
    pub fn get(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|b| b.id() == id)
    }

    /// Position of a book in the collection
    pub fn find_index(&self, id: BookId) -> Option<usize> {
        self.books.iter().position(|b| b.id() == id)
    }

    /// Append a new book with a fresh id
    pub fn add(&mut self, draft: BookDraft, is_complete: bool) -> &Book {
        let book = Book::new(self.ids.next(), draft, is_complete);
        info!(id = %book.id(), title = %book.title, "Added book");
        self.books.push(book);
        &self.books[self.books.len() - 1]
    }

    /// Overwrite title, author and year. Returns false if the id is unknown.
    pub fn edit(&mut self, id: BookId, draft: BookDraft) -> bool {
        let Some(index) = self.find_index(id) else {
            return false;
        };
        self.books[index].apply(draft);
        info!(%id, "Edited book");
        true
    }

    /// Validate raw input and edit. Nothing changes unless all three fields are valid.
    pub fn edit_fields(
        &mut self,
        id: BookId,
        title: &str,
        author: &str,
        year: &str,
    ) -> Result<bool, ShelfError> {
        let draft = BookDraft::parse(title, author, year)?;
        Ok(self.edit(id, draft))
    }

    /// Toggle the completion flag, returning the new value
    pub fn move_book(&mut self, id: BookId) -> Option<bool> {
        let index = self.find_index(id)?;
        let book = &mut self.books[index];
        book.is_complete = !book.is_complete;
        info!(%id, complete = book.is_complete, "Moved book");
        Some(book.is_complete)
    }

    /// Remove a book, returning it
    pub fn delete(&mut self, id: BookId) -> Option<Book> {
        let index = self.find_index(id)?;
        let book = self.books.remove(index);
        info!(%id, title = %book.title, "Deleted book");
        Some(book)
    }

    /// Books whose title contains `query`, ignoring case
    pub fn search(&self, query: &str) -> Vec<&Book> {
        let query_lower = query.to_lowercase();
        let matches: Vec<&Book> =
            self.books.iter().filter(|b| b.title.to_lowercase().contains(&query_lower)).collect();
        debug!(query, matches = matches.len(), "Searched bookshelf");
        matches
    }
}
