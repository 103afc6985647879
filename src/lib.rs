//! Bookshelf - A terminal bookshelf for your reading list
//!
//! Books live on one of two shelves, "not finished reading" and "finished
//! reading". They can be added, edited, moved between shelves, deleted and
//! searched by title, and the whole collection is kept as JSON on disk.

pub mod app;
pub mod config;
pub mod shelf;
pub mod theme;
pub mod ui;

pub use app::{App, Session};
pub use config::Config;
pub use theme::Theme;
