use thiserror::Error;

use crate::domain::errors::IdError;
use crate::domain::errors::TextError;

/// Top-level error for all author-related operations
#[derive(Debug, Clone, Error)]
pub enum AuthorError {
    #[error("Invalid author ID: {0}")]
    InvalidAuthorId(#[from] IdError),

    #[error("Invalid author name: {0}")]
    InvalidName(#[from] TextError),

    #[error("Author not found: {0}")]
    NotFound(String),

    #[error("Author name already exists: {0}")]
    NameAlreadyExists(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AuthorError {
    fn from(err: anyhow::Error) -> Self {
        AuthorError::Unknown(err.to_string())
    }
}
