//! Bookshelf storage and operations
//!
//! This module owns the book records, the ordered collection they live in,
//! the key-value persistence layer and the two-shelf display partition.

pub mod error;
pub mod model;
pub mod storage;
pub mod store;
pub mod view;

// Re-exports
pub use error::{Field, ShelfError};
pub use model::{Book, BookDraft, BookId, Shelf};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::Bookshelf;
pub use view::ShelfView;
