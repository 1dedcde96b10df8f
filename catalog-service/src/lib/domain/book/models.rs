use std::fmt;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;

use crate::domain::author::models::Author;
use crate::domain::author::models::AuthorId;
use crate::domain::book::errors::BookError;
use crate::domain::book::errors::IsbnError;
use crate::domain::book::errors::PagesError;
use crate::domain::genre::models::Genre;
use crate::domain::genre::models::GenreId;
use crate::domain::models::bounded_text;
use crate::domain::models::uuid_id;

/// Book entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: BookId,
    pub isbn: Option<Isbn>,
    pub title: BookTitle,
    pub author_id: Option<AuthorId>,
    pub pages: Pages,
    pub publisher: Option<Publisher>,
    pub published: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Book together with its author and genres.
#[derive(Debug, Clone, PartialEq)]
pub struct BookDetails {
    pub book: Book,
    pub author: Option<Author>,
    pub genres: Vec<Genre>,
}

/// Association between a book and one of its genres.
///
/// Identified by the `(book_id, genre_id)` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct BookGenre {
    pub book_id: BookId,
    pub genre_id: GenreId,
    pub created_at: DateTime<Utc>,
}

uuid_id!(
    /// Book unique identifier value object.
    BookId
);

/// Book title value object. Titles are unique and identify books in URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookTitle(String);

impl BookTitle {
    const MAX_LENGTH: usize = 255;

    /// # Errors
    /// * `InvalidTitle` - Title is blank or longer than 255 characters
    pub fn new(title: String) -> Result<Self, BookError> {
        bounded_text(title, Self::MAX_LENGTH)
            .map(Self)
            .map_err(BookError::InvalidTitle)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// ISBN value object.
///
/// Up to 13 digits; the last character may be an `X` check digit. Hyphens
/// and spaces are stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Isbn(String);

impl Isbn {
    const MAX_LENGTH: usize = 13;

    /// # Errors
    /// * `Empty` - Nothing left after stripping separators
    /// * `TooLong` - More than 13 characters
    /// * `InvalidCharacters` - Anything but digits and a trailing `X`
    pub fn new(isbn: String) -> Result<Self, IsbnError> {
        let normalized: String = isbn
            .chars()
            .filter(|c| *c != '-' && !c.is_whitespace())
            .map(|c| c.to_ascii_uppercase())
            .collect();

        let length = normalized.chars().count();
        if length == 0 {
            return Err(IsbnError::Empty);
        }
        if length > Self::MAX_LENGTH {
            return Err(IsbnError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        let valid = normalized
            .chars()
            .enumerate()
            .all(|(i, c)| c.is_ascii_digit() || (c == 'X' && i == length - 1));
        if !valid {
            return Err(IsbnError::InvalidCharacters);
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Page count, strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pages(i32);

impl Pages {
    /// # Errors
    /// * `NotPositive` - Zero or negative page count
    pub fn new(pages: i32) -> Result<Self, PagesError> {
        if pages > 0 {
            Ok(Self(pages))
        } else {
            Err(PagesError::NotPositive(pages))
        }
    }

    pub fn get(&self) -> i32 {
        self.0
    }
}

/// Publisher name, at most 255 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publisher(String);

impl Publisher {
    const MAX_LENGTH: usize = 255;

    /// # Errors
    /// * `InvalidPublisher` - Blank or longer than 255 characters
    pub fn new(publisher: String) -> Result<Self, BookError> {
        bounded_text(publisher, Self::MAX_LENGTH)
            .map(Self)
            .map_err(BookError::InvalidPublisher)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Command to create a new book with validated fields
#[derive(Debug)]
pub struct CreateBookCommand {
    pub isbn: Option<Isbn>,
    pub title: BookTitle,
    pub author_id: Option<AuthorId>,
    pub pages: Pages,
    pub publisher: Option<Publisher>,
    pub published: NaiveDate,
}

/// Partial book update. Only provided fields change.
#[derive(Debug, Default)]
pub struct UpdateBookCommand {
    pub isbn: Option<Isbn>,
    pub title: Option<BookTitle>,
    pub pages: Option<Pages>,
    pub publisher: Option<Publisher>,
    pub published: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::TextError;

    #[test]
    fn test_isbn_normalization() {
        let isbn = Isbn::new("978-0-441-17271-9".to_string()).unwrap();
        assert_eq!(isbn.as_str(), "9780441172719");

        let isbn = Isbn::new("0-8044-2957-x".to_string()).unwrap();
        assert_eq!(isbn.as_str(), "080442957X");
    }

    #[test]
    fn test_isbn_rejections() {
        assert_eq!(Isbn::new(" - ".to_string()), Err(IsbnError::Empty));
        assert_eq!(
            Isbn::new("97804411727199".to_string()),
            Err(IsbnError::TooLong {
                max: 13,
                actual: 14
            })
        );
        assert_eq!(
            Isbn::new("97X0441172719".to_string()),
            Err(IsbnError::InvalidCharacters)
        );
        assert_eq!(
            Isbn::new("isbn".to_string()),
            Err(IsbnError::InvalidCharacters)
        );
    }

    #[test]
    fn test_pages_must_be_positive() {
        assert_eq!(Pages::new(412).map(|p| p.get()), Ok(412));
        assert_eq!(Pages::new(0), Err(PagesError::NotPositive(0)));
        assert_eq!(Pages::new(-3), Err(PagesError::NotPositive(-3)));
    }

    #[test]
    fn test_title_validation() {
        assert!(BookTitle::new("Dune".to_string()).is_ok());
        assert!(matches!(
            BookTitle::new(String::new()),
            Err(BookError::InvalidTitle(TextError::Empty))
        ));
        assert!(matches!(
            Publisher::new("p".repeat(256)),
            Err(BookError::InvalidPublisher(TextError::TooLong { .. }))
        ));
    }
}
