use async_trait::async_trait;

use crate::domain::author::models::AuthorId;
use crate::domain::book::errors::BookError;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookDetails;
use crate::domain::book::models::BookGenre;
use crate::domain::book::models::BookId;
use crate::domain::book::models::BookTitle;
use crate::domain::book::models::CreateBookCommand;
use crate::domain::book::models::UpdateBookCommand;
use crate::domain::genre::models::Genre;
use crate::domain::genre::models::GenreId;
use crate::domain::models::Page;

/// Port for book domain service operations, including genre links.
#[async_trait]
pub trait BookServicePort: Send + Sync + 'static {
    /// Create a new book.
    ///
    /// # Arguments
    /// * `command` - Validated book fields; `author_id` is optional
    ///
    /// # Returns
    /// Created book entity
    ///
    /// # Errors
    /// * `AuthorNotFound` - `author_id` does not reference an author
    /// * `TitleAlreadyExists` - Another book has this title
    /// * `IsbnAlreadyExists` - Another book has this ISBN
    /// * `DatabaseError` - Database operation failed
    async fn create_book(&self, command: CreateBookCommand) -> Result<Book, BookError>;

    /// Retrieve a book with its author and genres by title.
    ///
    /// # Errors
    /// * `NotFound` - No book with this title
    /// * `DatabaseError` - Database operation failed
    async fn get_book(&self, title: &BookTitle) -> Result<BookDetails, BookError>;

    /// Retrieve a book with its author and genres by identifier.
    ///
    /// # Errors
    /// * `NotFound` - No book with this ID
    /// * `DatabaseError` - Database operation failed
    async fn get_book_by_id(&self, id: &BookId) -> Result<BookDetails, BookError>;

    async fn list_books(&self, page: Page) -> Result<Vec<Book>, BookError>;

    /// Apply a partial update to a book.
    ///
    /// # Errors
    /// * `NotFound` - No book with this title
    /// * `TitleAlreadyExists` - New title is taken
    /// * `IsbnAlreadyExists` - New ISBN is taken
    /// * `DatabaseError` - Database operation failed
    async fn update_book(
        &self,
        title: &BookTitle,
        command: UpdateBookCommand,
    ) -> Result<Book, BookError>;

    /// Delete a book along with its genre links.
    ///
    /// # Errors
    /// * `NotFound` - No book with this title
    /// * `DatabaseError` - Database operation failed
    async fn delete_book(&self, title: &BookTitle) -> Result<(), BookError>;

    /// Attribute a book to another author.
    ///
    /// # Errors
    /// * `NotFound` - No book with this title
    /// * `AuthorNotFound` - Author does not exist
    /// * `DatabaseError` - Database operation failed
    async fn change_author(
        &self,
        title: &BookTitle,
        author_id: &AuthorId,
    ) -> Result<BookDetails, BookError>;

    /// Tag a book with a genre.
    ///
    /// # Errors
    /// * `NotFound` - Book does not exist
    /// * `GenreNotFound` - Genre does not exist
    /// * `GenreAlreadyLinked` - Book already has this genre
    /// * `DatabaseError` - Database operation failed
    async fn add_genre(&self, book_id: &BookId, genre_id: &GenreId)
        -> Result<BookGenre, BookError>;

    async fn list_book_genres(&self, page: Page) -> Result<Vec<BookGenre>, BookError>;

    /// Remove a genre from a book.
    ///
    /// # Errors
    /// * `GenreNotLinked` - Book does not have this genre
    /// * `DatabaseError` - Database operation failed
    async fn remove_genre(&self, book_id: &BookId, genre_id: &GenreId) -> Result<(), BookError>;
}

/// Persistence operations for books and their genre links.
#[async_trait]
pub trait BookRepository: Send + Sync + 'static {
    /// # Errors
    /// * `TitleAlreadyExists` - Another book has this title
    /// * `IsbnAlreadyExists` - Another book has this ISBN
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, book: Book) -> Result<Book, BookError>;

    async fn find_by_id(&self, id: &BookId) -> Result<Option<Book>, BookError>;

    async fn find_by_title(&self, title: &BookTitle) -> Result<Option<Book>, BookError>;

    async fn list(&self, page: Page) -> Result<Vec<Book>, BookError>;

    /// # Errors
    /// * `NotFound` - Book does not exist
    /// * `TitleAlreadyExists` - New title is taken
    /// * `IsbnAlreadyExists` - New ISBN is taken
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, book: Book) -> Result<Book, BookError>;

    /// # Errors
    /// * `NotFound` - Book does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &BookId) -> Result<(), BookError>;

    /// Genres linked to the book, ordered by name.
    async fn list_genres(&self, id: &BookId) -> Result<Vec<Genre>, BookError>;

    /// # Errors
    /// * `GenreAlreadyLinked` - Link already exists
    /// * `DatabaseError` - Database operation failed
    async fn create_link(&self, link: BookGenre) -> Result<BookGenre, BookError>;

    async fn list_links(&self, page: Page) -> Result<Vec<BookGenre>, BookError>;

    /// # Errors
    /// * `GenreNotLinked` - Link does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_link(&self, book_id: &BookId, genre_id: &GenreId) -> Result<(), BookError>;
}
