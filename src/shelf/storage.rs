//! Bookshelf persistence
//!
//! The bookshelf lives under a single key of a small key-value store, as one
//! JSON array. `FileStorage` keeps each key in `<key>.json` inside the data
//! directory; `MemoryStorage` keeps everything in a map.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, warn};

use super::model::Book;

/// Key the bookshelf is stored under unless configured otherwise
pub const DEFAULT_KEY: &str = "books";

/// A string key-value store
pub trait Storage {
    /// Read the value stored under `key`, if any
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Storage backed by one JSON file per key
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file backing `key`
    pub fn item_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.item_path(key);

        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {key:?} from {:?}", path))?;
        Ok(Some(contents))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create data directory {:?}", self.dir))?;

        let path = self.item_path(key);
        fs::write(&path, value).with_context(|| format!("Failed to write {key:?} to {:?}", path))?;

        Ok(())
    }
}

/// In-memory storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Books read back from storage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Loaded {
    pub books: Vec<Book>,
    /// False when stored data had to be dropped, in whole or in part
    pub intact: bool,
}

impl Loaded {
    fn fallback() -> Self {
        Self { books: Vec::new(), intact: false }
    }
}

/// Read the bookshelf stored under `key`, one record at a time.
///
/// Unreadable storage or a value that is not a JSON array yields an empty
/// bookshelf; a record that is not a valid book is skipped. Either way the
/// result is marked as not intact.
pub fn read<S: Storage + ?Sized>(storage: &S, key: &str) -> Loaded {
    let raw = match storage.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "No stored bookshelf, starting empty");
            return Loaded { books: Vec::new(), intact: true };
        }
        Err(e) => {
            warn!(key, error = %e, "Failed to read bookshelf, starting empty");
            return Loaded::fallback();
        }
    };

    let records: Vec<Value> = match serde_json::from_str(&raw) {
        Ok(records) => records,
        Err(e) => {
            warn!(key, error = %e, "Stored bookshelf is malformed, starting empty");
            return Loaded::fallback();
        }
    };

    let mut loaded = Loaded { books: Vec::with_capacity(records.len()), intact: true };
    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<Book>(record) {
            Ok(book) => loaded.books.push(book),
            Err(e) => {
                warn!(key, index, error = %e, "Skipping unreadable book record");
                loaded.intact = false;
            }
        }
    }
    loaded
}

/// Load the books stored under `key`, skipping anything unreadable
pub fn load<S: Storage + ?Sized>(storage: &S, key: &str) -> Vec<Book> {
    read(storage, key).books
}

/// Write the whole bookshelf under `key`
pub fn save<S: Storage + ?Sized>(storage: &mut S, key: &str, books: &[Book]) -> Result<()> {
    let contents = serde_json::to_string(books).with_context(|| "Failed to serialize bookshelf")?;
    storage.set_item(key, &contents)?;
    debug!(key, count = books.len(), "Saved bookshelf");
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::shelf::{BookDraft, Bookshelf};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sample_books() -> Vec<Book> {
        let mut shelf = Bookshelf::new();
        shelf.add(BookDraft::parse("Dune", "Herbert", "1965").unwrap(), false);
        shelf.add(BookDraft::parse("Emma", "Austen", "1815").unwrap(), true);
        shelf.add(BookDraft::parse("Dune", "Herbert", "1965").unwrap(), true);
        shelf.books().to_vec()
    }

    #[test]
    fn missing_key_loads_empty() {
        let storage = MemoryStorage::default();
        assert!(load(&storage, DEFAULT_KEY).is_empty());
    }

    #[test]
    fn malformed_value_loads_empty() {
        let mut storage = MemoryStorage::default();
        storage.set_item(DEFAULT_KEY, "{not json").unwrap();
        assert!(load(&storage, DEFAULT_KEY).is_empty());

        storage.set_item(DEFAULT_KEY, r#"{"id":1}"#).unwrap();
        assert!(load(&storage, DEFAULT_KEY).is_empty());
    }

    #[test]
    fn save_then_load_round_trips_in_memory() {
        let mut storage = MemoryStorage::default();
        let books = sample_books();

        save(&mut storage, DEFAULT_KEY, &books).unwrap();
        assert_eq!(load(&storage, DEFAULT_KEY), books);
    }

    #[test]
    fn save_then_load_round_trips_on_disk() {
        let temp_dir = TempDir::new().unwrap();
        let mut storage = FileStorage::new(temp_dir.path().join("data"));
        let books = sample_books();

        save(&mut storage, DEFAULT_KEY, &books).unwrap();
        assert!(storage.item_path(DEFAULT_KEY).exists());

        let reopened = FileStorage::new(temp_dir.path().join("data"));
        assert_eq!(load(&reopened, DEFAULT_KEY), books);
    }

    #[test]
    fn save_overwrites_previous_value() {
        let mut storage = MemoryStorage::default();
        let books = sample_books();

        save(&mut storage, DEFAULT_KEY, &books).unwrap();
        save(&mut storage, DEFAULT_KEY, &books[..1]).unwrap();

        assert_eq!(load(&storage, DEFAULT_KEY), books[..1].to_vec());
    }

    #[test]
    fn keys_are_independent() {
        let mut storage = MemoryStorage::default();
        save(&mut storage, "shelf-a", &sample_books()).unwrap();

        assert!(load(&storage, "shelf-b").is_empty());
    }

    #[test]
    fn loads_year_stored_as_text() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());
        fs::write(
            storage.item_path(DEFAULT_KEY),
            r#"[{"id":1700000000000,"title":"Dune","author":"Herbert","year":"1965","isComplete":false}]"#,
        )
        .unwrap();

        let books = load(&storage, DEFAULT_KEY);
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].year, 1965);
    }

    #[test]
    fn unreadable_record_is_skipped_not_the_whole_shelf() {
        let mut storage = MemoryStorage::default();
        storage
            .set_item(
                DEFAULT_KEY,
                r#"[{"id":1,"title":"Dune","author":"Herbert","year":1965,"isComplete":false},
                    {"id":2,"title":"Emma","author":"Austen","year":"c. 1815","isComplete":true}]"#,
            )
            .unwrap();

        let loaded = read(&storage, DEFAULT_KEY);
        assert!(!loaded.intact);
        assert_eq!(loaded.books.len(), 1);
        assert_eq!(loaded.books[0].title, "Dune");
    }

    #[test]
    fn read_reports_intact_data() {
        let mut storage = MemoryStorage::default();
        assert!(read(&storage, DEFAULT_KEY).intact);

        save(&mut storage, DEFAULT_KEY, &sample_books()).unwrap();
        let loaded = read(&storage, DEFAULT_KEY);
        assert!(loaded.intact);
        assert_eq!(loaded.books.len(), 3);

        storage.set_item(DEFAULT_KEY, "{not json").unwrap();
        assert_eq!(read(&storage, DEFAULT_KEY), Loaded { books: Vec::new(), intact: false });
    }
}
