use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::author::errors::AuthorError;
use crate::domain::author::models::Author;
use crate::domain::author::models::AuthorId;
use crate::domain::author::models::AuthorName;
use crate::domain::author::ports::AuthorRepository;
use crate::domain::book::models::Book;
use crate::domain::models::Page;
use crate::outbound::repositories::book::BookRow;
use crate::outbound::repositories::book::BOOK_COLUMNS;

pub struct PostgresAuthorRepository {
    pool: PgPool,
}

impl PostgresAuthorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AuthorRow {
    id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<AuthorRow> for Author {
    type Error = AuthorError;

    fn try_from(row: AuthorRow) -> Result<Self, Self::Error> {
        Ok(Author {
            id: AuthorId(row.id),
            name: AuthorName::new(row.name)?,
            created_at: row.created_at,
        })
    }
}

fn map_write_error(e: sqlx::Error, author: &Author) -> AuthorError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() && db_err.constraint() == Some("authors_name_key") {
            return AuthorError::NameAlreadyExists(author.name.to_string());
        }
    }
    AuthorError::DatabaseError(e.to_string())
}

#[async_trait]
impl AuthorRepository for PostgresAuthorRepository {
    async fn create(&self, author: Author) -> Result<Author, AuthorError> {
        sqlx::query("INSERT INTO authors (id, name, created_at) VALUES ($1, $2, $3)")
            .bind(author.id.0)
            .bind(author.name.as_str())
            .bind(author.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, &author))?;

        Ok(author)
    }

    async fn find_by_id(&self, id: &AuthorId) -> Result<Option<Author>, AuthorError> {
        let row = sqlx::query_as::<_, AuthorRow>(
            "SELECT id, name, created_at FROM authors WHERE id = $1",
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthorError::DatabaseError(e.to_string()))?;

        row.map(Author::try_from).transpose()
    }

    async fn find_by_name(&self, name: &AuthorName) -> Result<Option<Author>, AuthorError> {
        let row = sqlx::query_as::<_, AuthorRow>(
            "SELECT id, name, created_at FROM authors WHERE name = $1",
        )
        .bind(name.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthorError::DatabaseError(e.to_string()))?;

        row.map(Author::try_from).transpose()
    }

    async fn list(&self, page: Page) -> Result<Vec<Author>, AuthorError> {
        let rows = sqlx::query_as::<_, AuthorRow>(
            r#"
            SELECT id, name, created_at
            FROM authors
            ORDER BY created_at, id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.skip())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AuthorError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Author::try_from).collect()
    }

    async fn list_books(&self, id: &AuthorId) -> Result<Vec<Book>, AuthorError> {
        let rows = sqlx::query_as::<_, BookRow>(&format!(
            r#"
            SELECT {BOOK_COLUMNS}
            FROM books b
            WHERE b.author_id = $1
            ORDER BY b.title
            "#
        ))
        .bind(id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AuthorError::DatabaseError(e.to_string()))?;

        rows.into_iter()
            .map(|row| Book::try_from(row).map_err(|e| AuthorError::DatabaseError(e.to_string())))
            .collect()
    }

    async fn update(&self, author: Author) -> Result<Author, AuthorError> {
        let result = sqlx::query("UPDATE authors SET name = $2 WHERE id = $1")
            .bind(author.id.0)
            .bind(author.name.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, &author))?;

        if result.rows_affected() == 0 {
            return Err(AuthorError::NotFound(author.id.to_string()));
        }

        Ok(author)
    }

    async fn delete(&self, id: &AuthorId) -> Result<(), AuthorError> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| AuthorError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AuthorError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
