//! Display partition of the bookshelf

use std::fmt;

use super::model::{Book, BookId, Shelf};

/// The two lists shown to the user, each in bookshelf order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShelfView {
    pub in_progress: Vec<Book>,
    pub completed: Vec<Book>,
}

impl ShelfView {
    /// Split books by completion flag, preserving order
    pub fn partition<'a>(books: impl IntoIterator<Item = &'a Book>) -> Self {
        let (completed, in_progress) = books.into_iter().cloned().partition(|b| b.is_complete);
        Self { in_progress, completed }
    }

    /// Books on one shelf
    pub fn shelf(&self, shelf: Shelf) -> &[Book] {
        match shelf {
            Shelf::InProgress => &self.in_progress,
            Shelf::Completed => &self.completed,
        }
    }

    /// Whether `shelf` lists the book with `id`
    pub fn contains(&self, shelf: Shelf, id: BookId) -> bool {
        self.shelf(shelf).iter().any(|b| b.id() == id)
    }

    /// Position of a book within its shelf
    pub fn locate(&self, id: BookId) -> Option<(Shelf, usize)> {
        [Shelf::InProgress, Shelf::Completed].into_iter().find_map(|shelf| {
            self.shelf(shelf).iter().position(|b| b.id() == id).map(|index| (shelf, index))
        })
    }

    pub fn len(&self) -> usize {
        self.in_progress.len() + self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Plain-text listing used by the command line interface
impl fmt::Display for ShelfView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, shelf) in [Shelf::InProgress, Shelf::Completed].into_iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let books = self.shelf(shelf);
            writeln!(f, "{} ({})", shelf.title(), books.len())?;
            if books.is_empty() {
                writeln!(f, "  (empty)")?;
            }
            for book in books {
                writeln!(f, "  [{}] {} by {} ({})", book.id(), book.title, book.author, book.year)?;
            }
        }
        Ok(())
    }
}
