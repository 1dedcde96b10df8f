use thiserror::Error;

/// Error for identifier parsing failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for bounded free-text fields such as names, titles and descriptions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TextError {
    #[error("Value cannot be empty")]
    Empty,

    #[error("Value too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}
