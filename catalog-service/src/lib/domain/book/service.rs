use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::author::errors::AuthorError;
use crate::domain::author::models::Author;
use crate::domain::author::models::AuthorId;
use crate::domain::author::ports::AuthorRepository;
use crate::domain::book::errors::BookError;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookDetails;
use crate::domain::book::models::BookGenre;
use crate::domain::book::models::BookId;
use crate::domain::book::models::BookTitle;
use crate::domain::book::models::CreateBookCommand;
use crate::domain::book::models::UpdateBookCommand;
use crate::domain::book::ports::BookRepository;
use crate::domain::book::ports::BookServicePort;
use crate::domain::genre::errors::GenreError;
use crate::domain::genre::models::GenreId;
use crate::domain::genre::ports::GenreRepository;
use crate::domain::models::Page;

/// Domain service implementation for books and their genre links.
///
/// Reads authors and genres through their repositories to check references
/// and to assemble [`BookDetails`].
pub struct BookService<BR, AR, GR>
where
    BR: BookRepository,
    AR: AuthorRepository,
    GR: GenreRepository,
{
    books: Arc<BR>,
    authors: Arc<AR>,
    genres: Arc<GR>,
}

impl<BR, AR, GR> BookService<BR, AR, GR>
where
    BR: BookRepository,
    AR: AuthorRepository,
    GR: GenreRepository,
{
    /// Create a new book service with injected dependencies.
    ///
    /// # Arguments
    /// * `books` - Book and book-genre persistence
    /// * `authors` - Author lookups
    /// * `genres` - Genre lookups
    pub fn new(books: Arc<BR>, authors: Arc<AR>, genres: Arc<GR>) -> Self {
        Self {
            books,
            authors,
            genres,
        }
    }

    async fn find(&self, title: &BookTitle) -> Result<Book, BookError> {
        self.books
            .find_by_title(title)
            .await?
            .ok_or_else(|| BookError::NotFound(title.to_string()))
    }

    async fn require_author(&self, id: &AuthorId) -> Result<Author, BookError> {
        self.authors
            .find_by_id(id)
            .await
            .map_err(from_author_error)?
            .ok_or_else(|| BookError::AuthorNotFound(id.to_string()))
    }

    async fn details(&self, book: Book) -> Result<BookDetails, BookError> {
        let author = match &book.author_id {
            Some(author_id) => self
                .authors
                .find_by_id(author_id)
                .await
                .map_err(from_author_error)?,
            None => None,
        };
        let genres = self.books.list_genres(&book.id).await?;

        Ok(BookDetails {
            book,
            author,
            genres,
        })
    }
}

fn from_author_error(err: AuthorError) -> BookError {
    BookError::DatabaseError(err.to_string())
}

fn from_genre_error(err: GenreError) -> BookError {
    BookError::DatabaseError(err.to_string())
}

#[async_trait]
impl<BR, AR, GR> BookServicePort for BookService<BR, AR, GR>
where
    BR: BookRepository,
    AR: AuthorRepository,
    GR: GenreRepository,
{
    async fn create_book(&self, command: CreateBookCommand) -> Result<Book, BookError> {
        if let Some(author_id) = &command.author_id {
            self.require_author(author_id).await?;
        }

        let book = Book {
            id: BookId::new(),
            isbn: command.isbn,
            title: command.title,
            author_id: command.author_id,
            pages: command.pages,
            publisher: command.publisher,
            published: command.published,
            created_at: Utc::now(),
        };

        let created = self.books.create(book).await?;
        tracing::info!(book_id = %created.id, title = %created.title, "Book created");

        Ok(created)
    }

    async fn get_book(&self, title: &BookTitle) -> Result<BookDetails, BookError> {
        let book = self.find(title).await?;
        self.details(book).await
    }

    async fn get_book_by_id(&self, id: &BookId) -> Result<BookDetails, BookError> {
        let book = self
            .books
            .find_by_id(id)
            .await?
            .ok_or_else(|| BookError::NotFound(id.to_string()))?;
        self.details(book).await
    }

    async fn list_books(&self, page: Page) -> Result<Vec<Book>, BookError> {
        self.books.list(page).await
    }

    async fn update_book(
        &self,
        title: &BookTitle,
        command: UpdateBookCommand,
    ) -> Result<Book, BookError> {
        let mut book = self.find(title).await?;

        if let Some(isbn) = command.isbn {
            book.isbn = Some(isbn);
        }
        if let Some(new_title) = command.title {
            book.title = new_title;
        }
        if let Some(pages) = command.pages {
            book.pages = pages;
        }
        if let Some(publisher) = command.publisher {
            book.publisher = Some(publisher);
        }
        if let Some(published) = command.published {
            book.published = published;
        }

        self.books.update(book).await
    }

    async fn delete_book(&self, title: &BookTitle) -> Result<(), BookError> {
        let book = self.find(title).await?;
        self.books.delete(&book.id).await?;
        tracing::info!(book_id = %book.id, title = %book.title, "Book deleted");

        Ok(())
    }

    async fn change_author(
        &self,
        title: &BookTitle,
        author_id: &AuthorId,
    ) -> Result<BookDetails, BookError> {
        let mut book = self.find(title).await?;
        let author = self.require_author(author_id).await?;

        book.author_id = Some(author.id);
        let book = self.books.update(book).await?;
        let genres = self.books.list_genres(&book.id).await?;

        Ok(BookDetails {
            book,
            author: Some(author),
            genres,
        })
    }

    async fn add_genre(
        &self,
        book_id: &BookId,
        genre_id: &GenreId,
    ) -> Result<BookGenre, BookError> {
        if self.books.find_by_id(book_id).await?.is_none() {
            return Err(BookError::NotFound(book_id.to_string()));
        }
        if self
            .genres
            .find_by_id(genre_id)
            .await
            .map_err(from_genre_error)?
            .is_none()
        {
            return Err(BookError::GenreNotFound(genre_id.to_string()));
        }

        let link = BookGenre {
            book_id: *book_id,
            genre_id: *genre_id,
            created_at: Utc::now(),
        };

        let created = self.books.create_link(link).await?;
        tracing::info!(book_id = %book_id, genre_id = %genre_id, "Genre linked to book");

        Ok(created)
    }

    async fn list_book_genres(&self, page: Page) -> Result<Vec<BookGenre>, BookError> {
        self.books.list_links(page).await
    }

    async fn remove_genre(&self, book_id: &BookId, genre_id: &GenreId) -> Result<(), BookError> {
        self.books.delete_link(book_id, genre_id).await?;
        tracing::info!(book_id = %book_id, genre_id = %genre_id, "Genre unlinked from book");

        Ok(())
    }
}
