//! The bookshelf session: store, storage and current view
//!
//! Every operation re-renders the view and writes the whole bookshelf back to
//! storage, mirroring the full collection even while a search filter is shown.

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::shelf::storage;
use crate::shelf::{Book, BookDraft, BookId, Bookshelf, ShelfView, Storage};

/// A bookshelf bound to the storage it is persisted in
#[derive(Debug)]
pub struct Session<S: Storage> {
    shelf: Bookshelf,
    storage: S,
    key: String,
    view: ShelfView,
    query: Option<String>,
}

impl<S: Storage> Session<S> {
    /// Load the bookshelf stored under `key` and render it.
    ///
    /// When stored data could not be read in full, the first render is not
    /// written back, so the unreadable value stays on disk until the next change.
    pub fn open(storage: S, key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let loaded = storage::read(&storage, &key);
        info!(key = %key, count = loaded.books.len(), intact = loaded.intact, "Loaded bookshelf");

        let mut session = Self {
            shelf: Bookshelf::from_books(loaded.books),
            storage,
            key,
            view: ShelfView::default(),
            query: None,
        };
        if loaded.intact {
            session.render(None)?;
        } else {
            warn!(key = %session.key, "Keeping stored bookshelf untouched until the next change");
            session.show(None);
        }
        Ok(session)
    }

    pub fn shelf(&self) -> &Bookshelf {
        &self.shelf
    }

    /// The lists currently shown
    pub fn view(&self) -> &ShelfView {
        &self.view
    }

    /// The search query the view is filtered by, if any
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Rebuild the view from `filtered` (or the whole bookshelf) and persist
    /// the whole bookshelf
    pub fn render(&mut self, filtered: Option<Vec<Book>>) -> Result<()> {
        self.show(filtered);
        storage::save(&mut self.storage, &self.key, self.shelf.books())
    }

    fn show(&mut self, filtered: Option<Vec<Book>>) {
        self.view = match filtered {
            Some(books) => ShelfView::partition(&books),
            None => {
                self.query = None;
                ShelfView::partition(self.shelf.books())
            }
        };
        debug!(shown = self.view.len(), total = self.shelf.len(), "Rendered bookshelf");
    }

    /// Re-render every book, dropping any search filter
    pub fn refresh(&mut self) -> Result<()> {
        self.render(None)
    }

    /// Validate form input and add a book
    pub fn add(&mut self, title: &str, author: &str, year: &str, is_complete: bool) -> Result<BookId> {
        let draft = BookDraft::parse(title, author, year)?;
        let id = self.shelf.add(draft, is_complete).id();
        self.render(None)?;
        Ok(id)
    }

    /// Show only books whose title contains `query`. Returns the match count.
    pub fn search(&mut self, query: &str) -> Result<usize> {
        let matches: Vec<Book> = self.shelf.search(query).into_iter().cloned().collect();
        let count = matches.len();
        self.render(Some(matches))?;
        self.query = Some(query.to_string());
        Ok(count)
    }

    /// Move a book to the other shelf. Returns its new completion flag.
    pub fn toggle(&mut self, id: BookId) -> Result<Option<bool>> {
        let complete = self.shelf.move_book(id);
        self.render(None)?;
        Ok(complete)
    }

    /// Delete a book the user has already confirmed
    pub fn delete(&mut self, id: BookId) -> Result<Option<Book>> {
        let removed = self.shelf.delete(id);
        self.render(None)?;
        Ok(removed)
    }

    /// Replace title, author and year; rejected as a whole if any is invalid.
    /// The view is re-rendered either way.
    pub fn edit(&mut self, id: BookId, title: &str, author: &str, year: &str) -> Result<bool> {
        let edited = self.shelf.edit_fields(id, title, author, year);
        self.render(None)?;
        Ok(edited?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shelf::storage::DEFAULT_KEY;
    use crate::shelf::storage::testing::FlakyStorage;
    use crate::shelf::{Field, MemoryStorage, Shelf, ShelfError};
    use pretty_assertions::assert_eq;

    fn session() -> Session<MemoryStorage> {
        Session::open(MemoryStorage::default(), DEFAULT_KEY).unwrap()
    }

    fn stored(session: &Session<MemoryStorage>) -> Vec<Book> {
        storage::load(session.storage(), DEFAULT_KEY)
    }

    #[test]
    fn open_persists_initial_render() {
        let session = session();
        assert_eq!(session.storage().get_item(DEFAULT_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn open_loads_existing_books() {
        let mut storage = MemoryStorage::default();
        storage
            .set_item(
                DEFAULT_KEY,
                r#"[{"id":1,"title":"Dune","author":"Herbert","year":1965,"isComplete":false}]"#,
            )
            .unwrap();

        let session = Session::open(storage, DEFAULT_KEY).unwrap();
        assert_eq!(session.shelf().len(), 1);
        assert!(session.view().contains(Shelf::InProgress, BookId(1)));
    }

    #[test]
    fn add_persists_and_shows_book() {
        let mut session = session();
        let id = session.add("Dune", "Herbert", "1965", true).unwrap();

        assert!(session.view().contains(Shelf::Completed, id));
        assert_eq!(stored(&session), session.shelf().books().to_vec());
    }

    #[test]
    fn add_with_missing_field_changes_nothing() {
        let mut session = session();
        let err = session.add("Dune", "", "1965", false).unwrap_err();

        assert_eq!(err.downcast_ref::<ShelfError>(), Some(&ShelfError::MissingField(Field::Author)));
        assert!(session.shelf().is_empty());
        assert!(stored(&session).is_empty());
    }

    #[test]
    fn search_filters_view_but_saves_everything() {
        let mut session = session();
        session.add("War and Peace", "Tolstoy", "1869", false).unwrap();
        session.add("Peace Treaty", "Someone", "1919", true).unwrap();

        assert_eq!(session.search("war").unwrap(), 1);
        assert_eq!(session.view().len(), 1);
        assert_eq!(session.query(), Some("war"));
        assert_eq!(stored(&session).len(), 2);
    }

    #[test]
    fn any_action_clears_search_filter() {
        let mut session = session();
        let war = session.add("War and Peace", "Tolstoy", "1869", false).unwrap();
        session.add("Peace Treaty", "Someone", "1919", true).unwrap();

        session.search("war").unwrap();
        session.toggle(war).unwrap();

        assert_eq!(session.query(), None);
        assert_eq!(session.view().len(), 2);
    }

    #[test]
    fn toggle_moves_dune_to_completed_shelf() {
        let mut storage = MemoryStorage::default();
        storage
            .set_item(
                DEFAULT_KEY,
                r#"[{"id":1,"title":"Dune","author":"Herbert","year":1965,"isComplete":false}]"#,
            )
            .unwrap();
        let mut session = Session::open(storage, DEFAULT_KEY).unwrap();

        assert_eq!(session.toggle(BookId(1)).unwrap(), Some(true));
        assert!(session.view().contains(Shelf::Completed, BookId(1)));
        assert!(!session.view().contains(Shelf::InProgress, BookId(1)));
        assert!(stored(&session)[0].is_complete);
    }

    #[test]
    fn unknown_ids_are_silently_ignored() {
        let mut session = session();
        session.add("Dune", "Herbert", "1965", false).unwrap();
        let before = stored(&session);

        assert_eq!(session.toggle(BookId(5)).unwrap(), None);
        assert_eq!(session.delete(BookId(5)).unwrap(), None);
        assert!(!session.edit(BookId(5), "a", "b", "1").unwrap());
        assert_eq!(stored(&session), before);
    }

    #[test]
    fn rejected_edit_keeps_record_and_still_renders() {
        let mut session = session();
        let id = session.add("Dune", "Herbert", "1965", false).unwrap();
        session.search("nothing").unwrap();
        let before = session.shelf().get(id).cloned();

        assert!(session.edit(id, "Dune Messiah", "", "1969").is_err());
        assert_eq!(session.shelf().get(id).cloned(), before);
        assert_eq!(session.query(), None);
        assert_eq!(session.view().len(), 1);
    }

    #[test]
    fn delete_removes_from_view_and_storage() {
        let mut session = session();
        let id = session.add("Dune", "Herbert", "1965", false).unwrap();

        let removed = session.delete(id).unwrap();
        assert_eq!(removed.map(|b| b.title), Some("Dune".to_string()));
        assert!(session.view().is_empty());
        assert!(stored(&session).is_empty());
    }

    #[test]
    fn open_keeps_partly_unreadable_data_on_disk() {
        let raw = r#"[{"id":1,"title":"Dune","author":"Herbert","year":1965,"isComplete":false},{"id":2,"title":"Emma","author":"Austen","year":"c. 1815","isComplete":true}]"#;
        let mut storage = MemoryStorage::default();
        storage.set_item(DEFAULT_KEY, raw).unwrap();

        let session = Session::open(storage, DEFAULT_KEY).unwrap();

        assert_eq!(session.shelf().len(), 1);
        assert!(session.view().contains(Shelf::InProgress, BookId(1)));
        assert_eq!(session.storage().get_item(DEFAULT_KEY).unwrap().as_deref(), Some(raw));
    }

    #[test]
    fn open_keeps_malformed_data_on_disk() {
        let mut storage = MemoryStorage::default();
        storage.set_item(DEFAULT_KEY, "{not json").unwrap();

        let session = Session::open(storage, DEFAULT_KEY).unwrap();

        assert!(session.shelf().is_empty());
        assert_eq!(session.storage().get_item(DEFAULT_KEY).unwrap().as_deref(), Some("{not json"));
    }

    #[test]
    fn failed_write_is_returned_and_book_kept_in_memory() {
        let storage = FlakyStorage::default();
        let fail_writes = storage.switch();
        let mut session = Session::open(storage, DEFAULT_KEY).unwrap();

        fail_writes.set(true);
        let err = session.add("Dune", "Herbert", "1965", false).unwrap_err();

        assert_eq!(err.to_string(), "disk full");
        assert_eq!(session.shelf().len(), 1);
        assert_eq!(session.view().len(), 1);
        assert!(stored_in(&session).is_empty());

        fail_writes.set(false);
        session.refresh().unwrap();
        assert_eq!(stored_in(&session).len(), 1);
    }

    fn stored_in(session: &Session<FlakyStorage>) -> Vec<Book> {
        storage::load(session.storage(), DEFAULT_KEY)
    }
}
