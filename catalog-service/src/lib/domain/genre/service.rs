use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::genre::errors::GenreError;
use crate::domain::genre::models::CreateGenreCommand;
use crate::domain::genre::models::Genre;
use crate::domain::genre::models::GenreDetails;
use crate::domain::genre::models::GenreId;
use crate::domain::genre::models::GenreName;
use crate::domain::genre::models::UpdateGenreCommand;
use crate::domain::genre::ports::GenreRepository;
use crate::domain::genre::ports::GenreServicePort;
use crate::domain::models::Page;

/// Domain service implementation for genre operations.
pub struct GenreService<GR>
where
    GR: GenreRepository,
{
    repository: Arc<GR>,
}

impl<GR> GenreService<GR>
where
    GR: GenreRepository,
{
    pub fn new(repository: Arc<GR>) -> Self {
        Self { repository }
    }

    async fn find(&self, name: &GenreName) -> Result<Genre, GenreError> {
        self.repository
            .find_by_name(name)
            .await?
            .ok_or_else(|| GenreError::NotFound(name.to_string()))
    }

    async fn with_books(&self, genre: Genre) -> Result<GenreDetails, GenreError> {
        let books = self.repository.list_books(&genre.id).await?;
        Ok(GenreDetails { genre, books })
    }
}

#[async_trait]
impl<GR> GenreServicePort for GenreService<GR>
where
    GR: GenreRepository,
{
    async fn create_genre(&self, command: CreateGenreCommand) -> Result<Genre, GenreError> {
        let genre = Genre {
            id: GenreId::new(),
            name: command.name,
            created_at: Utc::now(),
        };

        self.repository.create(genre).await
    }

    async fn get_genre(&self, name: &GenreName) -> Result<GenreDetails, GenreError> {
        let genre = self.find(name).await?;
        self.with_books(genre).await
    }

    async fn get_genre_by_id(&self, id: &GenreId) -> Result<GenreDetails, GenreError> {
        let genre = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| GenreError::NotFound(id.to_string()))?;
        self.with_books(genre).await
    }

    async fn list_genres(&self, page: Page) -> Result<Vec<Genre>, GenreError> {
        self.repository.list(page).await
    }

    async fn update_genre(
        &self,
        name: &GenreName,
        command: UpdateGenreCommand,
    ) -> Result<Genre, GenreError> {
        let mut genre = self.find(name).await?;

        if let Some(new_name) = command.name {
            genre.name = new_name;
        }

        self.repository.update(genre).await
    }

    async fn delete_genre(&self, name: &GenreName) -> Result<(), GenreError> {
        let genre = self.find(name).await?;
        self.repository.delete(&genre.id).await?;
        tracing::info!(genre_id = %genre.id, name = %genre.name, "Genre deleted");

        Ok(())
    }
}
