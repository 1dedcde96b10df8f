use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::book::models::Book;
use crate::domain::errors::TextError;
use crate::domain::models::bounded_text;
use crate::domain::models::uuid_id;

/// Author entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Author {
    pub id: AuthorId,
    pub name: AuthorName,
    pub created_at: DateTime<Utc>,
}

/// Author together with the books attributed to them.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorDetails {
    pub author: Author,
    pub books: Vec<Book>,
}

uuid_id!(
    /// Author unique identifier value object.
    AuthorId
);

/// Author name value object, unique across authors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorName(String);

impl AuthorName {
    const MAX_LENGTH: usize = 255;

    /// Create a validated author name.
    ///
    /// # Arguments
    /// * `name` - Raw name, surrounding whitespace is trimmed
    ///
    /// # Errors
    /// * `Empty` - Name is blank
    /// * `TooLong` - Name exceeds 255 characters
    pub fn new(name: String) -> Result<Self, TextError> {
        bounded_text(name, Self::MAX_LENGTH).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AuthorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug)]
pub struct CreateAuthorCommand {
    pub name: AuthorName,
}

#[derive(Debug, Default)]
pub struct UpdateAuthorCommand {
    pub name: Option<AuthorName>,
}
