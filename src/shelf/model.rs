//! Book records
//!
//! The serialized form matches the persisted layout:
//! `{"id": 1, "title": "...", "author": "...", "year": 1965, "isComplete": false}`.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use super::error::{Field, ShelfError};

/// Identifier of a book, derived from its creation time in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(pub u64);

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BookId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(BookId)
    }
}

/// Which of the two display lists a book belongs to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Shelf {
    #[default]
    InProgress,
    Completed,
}

impl Shelf {
    /// Shelf for a completion flag
    pub fn of(is_complete: bool) -> Self {
        if is_complete { Shelf::Completed } else { Shelf::InProgress }
    }

    /// The other shelf
    pub fn other(self) -> Self {
        match self {
            Shelf::InProgress => Shelf::Completed,
            Shelf::Completed => Shelf::InProgress,
        }
    }

    /// Heading shown above the list
    pub fn title(self) -> &'static str {
        match self {
            Shelf::InProgress => "Not finished reading",
            Shelf::Completed => "Finished reading",
        }
    }
}

/// A single book on the shelf
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    id: BookId,
    pub title: String,
    pub author: String,
    #[serde(deserialize_with = "deserialize_year")]
    pub year: i32,
    pub is_complete: bool,
}

impl Book {
    pub(crate) fn new(id: BookId, draft: BookDraft, is_complete: bool) -> Self {
        Self { id, title: draft.title, author: draft.author, year: draft.year, is_complete }
    }

    /// Immutable identifier
    pub fn id(&self) -> BookId {
        self.id
    }

    /// The shelf this book is displayed on
    pub fn shelf(&self) -> Shelf {
        Shelf::of(self.is_complete)
    }

    pub(crate) fn apply(&mut self, draft: BookDraft) {
        self.title = draft.title;
        self.author = draft.author;
        self.year = draft.year;
    }
}

/// Validated title, author and year shared by add and edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub year: i32,
}

impl BookDraft {
    /// Validate raw form input. Every field must be non-blank and the year numeric.
    pub fn parse(title: &str, author: &str, year: &str) -> Result<Self, ShelfError> {
        let title = required(title, Field::Title)?;
        let author = required(author, Field::Author)?;
        let year_text = required(year, Field::Year)?;
        let year = year_text.parse().map_err(|_| ShelfError::InvalidYear(year_text.clone()))?;

        Ok(Self { title, author, year })
    }
}

fn required(value: &str, field: Field) -> Result<String, ShelfError> {
    let value = value.trim();
    if value.is_empty() { Err(ShelfError::MissingField(field)) } else { Ok(value.to_string()) }
}

/// Accept both `1965` and `"1965"`; older data stored edited years as strings
fn deserialize_year<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Year {
        Number(i32),
        Text(String),
    }

    match Year::deserialize(deserializer)? {
        Year::Number(year) => Ok(year),
        Year::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dune() -> Book {
        Book::new(BookId(1), BookDraft::parse("Dune", "Herbert", "1965").unwrap(), false)
    }

    #[test]
    fn draft_trims_fields() {
        let draft = BookDraft::parse("  Dune ", "Herbert", " 1965").unwrap();
        assert_eq!(
            draft,
            BookDraft { title: "Dune".into(), author: "Herbert".into(), year: 1965 }
        );
    }

    #[test]
    fn draft_rejects_blank_fields() {
        assert_eq!(BookDraft::parse("", "a", "1"), Err(ShelfError::MissingField(Field::Title)));
        assert_eq!(BookDraft::parse("t", "   ", "1"), Err(ShelfError::MissingField(Field::Author)));
        assert_eq!(BookDraft::parse("t", "a", ""), Err(ShelfError::MissingField(Field::Year)));
    }

    #[test]
    fn draft_rejects_non_numeric_year() {
        assert_eq!(
            BookDraft::parse("t", "a", "nineteen"),
            Err(ShelfError::InvalidYear("nineteen".into()))
        );
    }

    #[test]
    fn book_serializes_with_camel_case_fields() {
        let json = serde_json::to_string(&dune()).unwrap();
        assert_eq!(
            json,
            r#"{"id":1,"title":"Dune","author":"Herbert","year":1965,"isComplete":false}"#
        );
    }

    #[test]
    fn book_accepts_year_stored_as_text() {
        let json = r#"{"id":7,"title":"Dune","author":"Herbert","year":"1965","isComplete":true}"#;
        let book: Book = serde_json::from_str(json).unwrap();
        assert_eq!(book.id(), BookId(7));
        assert_eq!(book.year, 1965);
        assert_eq!(book.shelf(), Shelf::Completed);
    }

    #[test]
    fn book_rejects_garbage_year() {
        let json = r#"{"id":7,"title":"Dune","author":"Herbert","year":"soon","isComplete":true}"#;
        assert!(serde_json::from_str::<Book>(json).is_err());
    }

    #[test]
    fn book_id_parses_from_text() {
        assert_eq!(" 42 ".parse::<BookId>(), Ok(BookId(42)));
        assert!("abc".parse::<BookId>().is_err());
    }

    #[test]
    fn shelf_other_flips() {
        assert_eq!(Shelf::InProgress.other(), Shelf::Completed);
        assert_eq!(Shelf::of(false), Shelf::InProgress);
    }
}
