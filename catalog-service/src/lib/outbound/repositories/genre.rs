use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::book::models::Book;
use crate::domain::genre::errors::GenreError;
use crate::domain::genre::models::Genre;
use crate::domain::genre::models::GenreId;
use crate::domain::genre::models::GenreName;
use crate::domain::genre::ports::GenreRepository;
use crate::domain::models::Page;
use crate::outbound::repositories::book::BookRow;
use crate::outbound::repositories::book::BOOK_COLUMNS;

pub struct PostgresGenreRepository {
    pool: PgPool,
}

impl PostgresGenreRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct GenreRow {
    id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<GenreRow> for Genre {
    type Error = GenreError;

    fn try_from(row: GenreRow) -> Result<Self, Self::Error> {
        Ok(Genre {
            id: GenreId(row.id),
            name: GenreName::new(row.name)?,
            created_at: row.created_at,
        })
    }
}

fn map_write_error(e: sqlx::Error, genre: &Genre) -> GenreError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() && db_err.constraint() == Some("genres_name_key") {
            return GenreError::NameAlreadyExists(genre.name.to_string());
        }
    }
    GenreError::DatabaseError(e.to_string())
}

#[async_trait]
impl GenreRepository for PostgresGenreRepository {
    async fn create(&self, genre: Genre) -> Result<Genre, GenreError> {
        sqlx::query("INSERT INTO genres (id, name, created_at) VALUES ($1, $2, $3)")
            .bind(genre.id.0)
            .bind(genre.name.as_str())
            .bind(genre.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, &genre))?;

        Ok(genre)
    }

    async fn find_by_id(&self, id: &GenreId) -> Result<Option<Genre>, GenreError> {
        let row = sqlx::query_as::<_, GenreRow>(
            "SELECT id, name, created_at FROM genres WHERE id = $1",
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| GenreError::DatabaseError(e.to_string()))?;

        row.map(Genre::try_from).transpose()
    }

    async fn find_by_name(&self, name: &GenreName) -> Result<Option<Genre>, GenreError> {
        let row = sqlx::query_as::<_, GenreRow>(
            "SELECT id, name, created_at FROM genres WHERE name = $1",
        )
        .bind(name.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| GenreError::DatabaseError(e.to_string()))?;

        row.map(Genre::try_from).transpose()
    }

    async fn list(&self, page: Page) -> Result<Vec<Genre>, GenreError> {
        let rows = sqlx::query_as::<_, GenreRow>(
            r#"
            SELECT id, name, created_at
            FROM genres
            ORDER BY created_at, id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.skip())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| GenreError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Genre::try_from).collect()
    }

    async fn list_books(&self, id: &GenreId) -> Result<Vec<Book>, GenreError> {
        let rows = sqlx::query_as::<_, BookRow>(&format!(
            r#"
            SELECT {BOOK_COLUMNS}
            FROM books b
            JOIN book_genres bg ON bg.book_id = b.id
            WHERE bg.genre_id = $1
            ORDER BY b.title
            "#
        ))
        .bind(id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| GenreError::DatabaseError(e.to_string()))?;

        rows.into_iter()
            .map(|row| Book::try_from(row).map_err(|e| GenreError::DatabaseError(e.to_string())))
            .collect()
    }

    async fn update(&self, genre: Genre) -> Result<Genre, GenreError> {
        let result = sqlx::query("UPDATE genres SET name = $2 WHERE id = $1")
            .bind(genre.id.0)
            .bind(genre.name.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, &genre))?;

        if result.rows_affected() == 0 {
            return Err(GenreError::NotFound(genre.id.to_string()));
        }

        Ok(genre)
    }

    async fn delete(&self, id: &GenreId) -> Result<(), GenreError> {
        let result = sqlx::query("DELETE FROM genres WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| GenreError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(GenreError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
