//! Validation errors surfaced to the user

use std::fmt;

use thiserror::Error;

/// A required book field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Author,
    Year,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Title => "title",
            Field::Author => "author",
            Field::Year => "year",
        };
        f.write_str(name)
    }
}

/// Errors raised when user input cannot become a book
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShelfError {
    /// A required field was left empty
    #[error("Please fill in all fields ({0} is empty)")]
    MissingField(Field),

    /// The year is not a whole number
    #[error("Year must be a whole number, got {0:?}")]
    InvalidYear(String),
}

impl ShelfError {
    /// The field the error refers to
    pub fn field(&self) -> Field {
        match self {
            ShelfError::MissingField(field) => *field,
            ShelfError::InvalidYear(_) => Field::Year,
        }
    }
}
