use async_trait::async_trait;
use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::author::models::AuthorId;
use crate::domain::book::errors::BookError;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookGenre;
use crate::domain::book::models::BookId;
use crate::domain::book::models::BookTitle;
use crate::domain::book::models::Isbn;
use crate::domain::book::models::Pages;
use crate::domain::book::models::Publisher;
use crate::domain::book::ports::BookRepository;
use crate::domain::genre::models::Genre;
use crate::domain::genre::models::GenreId;
use crate::domain::models::Page;
use crate::outbound::repositories::genre::GenreRow;

pub struct PostgresBookRepository {
    pool: PgPool,
}

impl PostgresBookRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Column list matching [`BookRow`], qualified with the `b` alias.
pub(crate) const BOOK_COLUMNS: &str =
    "b.id, b.isbn, b.title, b.author_id, b.pages, b.publisher, b.published, b.created_at";

#[derive(sqlx::FromRow)]
pub(crate) struct BookRow {
    id: Uuid,
    isbn: Option<String>,
    title: String,
    author_id: Option<Uuid>,
    pages: i32,
    publisher: Option<String>,
    published: NaiveDate,
    created_at: DateTime<Utc>,
}

impl TryFrom<BookRow> for Book {
    type Error = BookError;

    fn try_from(row: BookRow) -> Result<Self, Self::Error> {
        Ok(Book {
            id: BookId(row.id),
            isbn: row.isbn.map(Isbn::new).transpose()?,
            title: BookTitle::new(row.title)?,
            author_id: row.author_id.map(AuthorId),
            pages: Pages::new(row.pages)?,
            publisher: row.publisher.map(Publisher::new).transpose()?,
            published: row.published,
            created_at: row.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct BookGenreRow {
    book_id: Uuid,
    genre_id: Uuid,
    created_at: DateTime<Utc>,
}

impl From<BookGenreRow> for BookGenre {
    fn from(row: BookGenreRow) -> Self {
        BookGenre {
            book_id: BookId(row.book_id),
            genre_id: GenreId(row.genre_id),
            created_at: row.created_at,
        }
    }
}

fn map_write_error(e: sqlx::Error, book: &Book) -> BookError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            match db_err.constraint() {
                Some("books_title_key") => {
                    return BookError::TitleAlreadyExists(book.title.to_string());
                }
                Some("books_isbn_key") => {
                    let isbn = book.isbn.as_ref().map(|i| i.as_str()).unwrap_or_default();
                    return BookError::IsbnAlreadyExists(isbn.to_string());
                }
                _ => {}
            }
        }
        if db_err.is_foreign_key_violation() {
            let author_id = book.author_id.map(|id| id.to_string()).unwrap_or_default();
            return BookError::AuthorNotFound(author_id);
        }
    }
    BookError::DatabaseError(e.to_string())
}

#[async_trait]
impl BookRepository for PostgresBookRepository {
    async fn create(&self, book: Book) -> Result<Book, BookError> {
        sqlx::query(
            r#"
            INSERT INTO books (id, isbn, title, author_id, pages, publisher, published, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(book.id.0)
        .bind(book.isbn.as_ref().map(|i| i.as_str()))
        .bind(book.title.as_str())
        .bind(book.author_id.map(|id| id.0))
        .bind(book.pages.get())
        .bind(book.publisher.as_ref().map(|p| p.as_str()))
        .bind(book.published)
        .bind(book.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &book))?;

        Ok(book)
    }

    async fn find_by_id(&self, id: &BookId) -> Result<Option<Book>, BookError> {
        let row = sqlx::query_as::<_, BookRow>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books b WHERE b.id = $1"
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| BookError::DatabaseError(e.to_string()))?;

        row.map(Book::try_from).transpose()
    }

    async fn find_by_title(&self, title: &BookTitle) -> Result<Option<Book>, BookError> {
        let row = sqlx::query_as::<_, BookRow>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books b WHERE b.title = $1"
        ))
        .bind(title.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| BookError::DatabaseError(e.to_string()))?;

        row.map(Book::try_from).transpose()
    }

    async fn list(&self, page: Page) -> Result<Vec<Book>, BookError> {
        let rows = sqlx::query_as::<_, BookRow>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books b ORDER BY b.created_at, b.id LIMIT $1 OFFSET $2"
        ))
        .bind(page.limit())
        .bind(page.skip())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| BookError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Book::try_from).collect()
    }

    async fn update(&self, book: Book) -> Result<Book, BookError> {
        let result = sqlx::query(
            r#"
            UPDATE books
            SET isbn = $2, title = $3, author_id = $4, pages = $5, publisher = $6, published = $7
            WHERE id = $1
            "#,
        )
        .bind(book.id.0)
        .bind(book.isbn.as_ref().map(|i| i.as_str()))
        .bind(book.title.as_str())
        .bind(book.author_id.map(|id| id.0))
        .bind(book.pages.get())
        .bind(book.publisher.as_ref().map(|p| p.as_str()))
        .bind(book.published)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &book))?;

        if result.rows_affected() == 0 {
            return Err(BookError::NotFound(book.id.to_string()));
        }

        Ok(book)
    }

    async fn delete(&self, id: &BookId) -> Result<(), BookError> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| BookError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(BookError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn list_genres(&self, id: &BookId) -> Result<Vec<Genre>, BookError> {
        let rows = sqlx::query_as::<_, GenreRow>(
            r#"
            SELECT g.id, g.name, g.created_at
            FROM genres g
            JOIN book_genres bg ON bg.genre_id = g.id
            WHERE bg.book_id = $1
            ORDER BY g.name
            "#,
        )
        .bind(id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| BookError::DatabaseError(e.to_string()))?;

        rows.into_iter()
            .map(|row| Genre::try_from(row).map_err(|e| BookError::DatabaseError(e.to_string())))
            .collect()
    }

    async fn create_link(&self, link: BookGenre) -> Result<BookGenre, BookError> {
        sqlx::query(
            r#"
            INSERT INTO book_genres (book_id, genre_id, created_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(link.book_id.0)
        .bind(link.genre_id.0)
        .bind(link.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return BookError::GenreAlreadyLinked {
                        book_id: link.book_id.to_string(),
                        genre_id: link.genre_id.to_string(),
                    };
                }
                if db_err.is_foreign_key_violation() {
                    return match db_err.constraint() {
                        Some("book_genres_genre_id_fkey") => {
                            BookError::GenreNotFound(link.genre_id.to_string())
                        }
                        _ => BookError::NotFound(link.book_id.to_string()),
                    };
                }
            }
            BookError::DatabaseError(e.to_string())
        })?;

        Ok(link)
    }

    async fn list_links(&self, page: Page) -> Result<Vec<BookGenre>, BookError> {
        let rows = sqlx::query_as::<_, BookGenreRow>(
            r#"
            SELECT book_id, genre_id, created_at
            FROM book_genres
            ORDER BY created_at, book_id, genre_id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.skip())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| BookError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(BookGenre::from).collect())
    }

    async fn delete_link(&self, book_id: &BookId, genre_id: &GenreId) -> Result<(), BookError> {
        let result = sqlx::query("DELETE FROM book_genres WHERE book_id = $1 AND genre_id = $2")
            .bind(book_id.0)
            .bind(genre_id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| BookError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(BookError::GenreNotLinked {
                book_id: book_id.to_string(),
                genre_id: genre_id.to_string(),
            });
        }

        Ok(())
    }
}
