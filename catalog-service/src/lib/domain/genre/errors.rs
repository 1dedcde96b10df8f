use thiserror::Error;

use crate::domain::errors::IdError;
use crate::domain::errors::TextError;

/// Top-level error for all genre-related operations
#[derive(Debug, Clone, Error)]
pub enum GenreError {
    #[error("Invalid genre ID: {0}")]
    InvalidGenreId(#[from] IdError),

    #[error("Invalid genre name: {0}")]
    InvalidName(#[from] TextError),

    #[error("Genre not found: {0}")]
    NotFound(String),

    #[error("Genre name already exists: {0}")]
    NameAlreadyExists(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for GenreError {
    fn from(err: anyhow::Error) -> Self {
        GenreError::Unknown(err.to_string())
    }
}
