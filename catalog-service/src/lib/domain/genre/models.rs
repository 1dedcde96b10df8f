use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::book::models::Book;
use crate::domain::errors::TextError;
use crate::domain::models::bounded_text;
use crate::domain::models::uuid_id;

/// Genre entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Genre {
    pub id: GenreId,
    pub name: GenreName,
    pub created_at: DateTime<Utc>,
}

/// Genre together with the books tagged with it.
#[derive(Debug, Clone, PartialEq)]
pub struct GenreDetails {
    pub genre: Genre,
    pub books: Vec<Book>,
}

uuid_id!(
    /// Genre unique identifier value object.
    GenreId
);

/// Genre name value object, unique across genres.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreName(String);

impl GenreName {
    const MAX_LENGTH: usize = 255;

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

impl fmt::Display for GenreName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug)]
pub struct CreateGenreCommand {
    pub name: GenreName,
}

#[derive(Debug, Default)]
pub struct UpdateGenreCommand {
    pub name: Option<GenreName>,
}
