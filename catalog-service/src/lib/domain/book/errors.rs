use thiserror::Error;

use crate::domain::errors::IdError;
use crate::domain::errors::TextError;

/// Error for ISBN validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IsbnError {
    #[error("ISBN cannot be empty")]
    Empty,

    #[error("ISBN too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("ISBN must contain only digits, optionally ending in X")]
    InvalidCharacters,
}

/// Error for page count validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PagesError {
    #[error("Page count must be positive, got {0}")]
    NotPositive(i32),
}

/// Top-level error for all book-related operations, including genre links
#[derive(Debug, Clone, Error)]
pub enum BookError {
    #[error("Invalid ID: {0}")]
    InvalidId(#[from] IdError),

    #[error("Invalid title: {0}")]
    InvalidTitle(TextError),

    #[error("Invalid publisher: {0}")]
    InvalidPublisher(TextError),

    #[error("Invalid ISBN: {0}")]
    InvalidIsbn(#[from] IsbnError),

    #[error("Invalid pages: {0}")]
    InvalidPages(#[from] PagesError),

    #[error("Book not found: {0}")]
    NotFound(String),

    #[error("Author not found: {0}")]
    AuthorNotFound(String),

    #[error("Genre not found: {0}")]
    GenreNotFound(String),

    #[error("Book title already exists: {0}")]
    TitleAlreadyExists(String),

    #[error("ISBN already exists: {0}")]
    IsbnAlreadyExists(String),

    #[error("Book {book_id} already has genre {genre_id}")]
    GenreAlreadyLinked { book_id: String, genre_id: String },

    #[error("Book {book_id} does not have genre {genre_id}")]
    GenreNotLinked { book_id: String, genre_id: String },

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for BookError {
    fn from(err: anyhow::Error) -> Self {
        BookError::Unknown(err.to_string())
    }
}
