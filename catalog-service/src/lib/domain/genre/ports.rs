use async_trait::async_trait;

use crate::domain::book::models::Book;
use crate::domain::genre::errors::GenreError;
use crate::domain::genre::models::CreateGenreCommand;
use crate::domain::genre::models::Genre;
use crate::domain::genre::models::GenreDetails;
use crate::domain::genre::models::GenreId;
use crate::domain::genre::models::GenreName;
use crate::domain::genre::models::UpdateGenreCommand;
use crate::domain::models::Page;

/// Port for genre domain service operations.
#[async_trait]
pub trait GenreServicePort: Send + Sync + 'static {
    /// Create a new genre.
    ///
    /// # Errors
    /// * `NameAlreadyExists` - Another genre has this name
    /// * `DatabaseError` - Database operation failed
    async fn create_genre(&self, command: CreateGenreCommand) -> Result<Genre, GenreError>;

    /// Retrieve a genre and its books by name.
    ///
    /// # Errors
    /// * `NotFound` - No genre with this name
    /// * `DatabaseError` - Database operation failed
    async fn get_genre(&self, name: &GenreName) -> Result<GenreDetails, GenreError>;

    /// Retrieve a genre and its books by identifier.
    ///
    /// # Errors
    /// * `NotFound` - No genre with this ID
    /// * `DatabaseError` - Database operation failed
    async fn get_genre_by_id(&self, id: &GenreId) -> Result<GenreDetails, GenreError>;

    async fn list_genres(&self, page: Page) -> Result<Vec<Genre>, GenreError>;

    /// Rename a genre.
    ///
    /// # Errors
    /// * `NotFound` - No genre with this name
    /// * `NameAlreadyExists` - New name is taken
    /// * `DatabaseError` - Database operation failed
    async fn update_genre(
        &self,
        name: &GenreName,
        command: UpdateGenreCommand,
    ) -> Result<Genre, GenreError>;

    /// Delete a genre along with its book links.
    ///
    /// # Errors
    /// * `NotFound` - No genre with this name
    /// * `DatabaseError` - Database operation failed
    async fn delete_genre(&self, name: &GenreName) -> Result<(), GenreError>;
}

/// Persistence operations for genres.
#[async_trait]
pub trait GenreRepository: Send + Sync + 'static {
    /// # Errors
    /// * `NameAlreadyExists` - Another genre has this name
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, genre: Genre) -> Result<Genre, GenreError>;

    async fn find_by_id(&self, id: &GenreId) -> Result<Option<Genre>, GenreError>;

    async fn find_by_name(&self, name: &GenreName) -> Result<Option<Genre>, GenreError>;

    async fn list(&self, page: Page) -> Result<Vec<Genre>, GenreError>;

    /// Books linked to the genre, ordered by title.
    async fn list_books(&self, id: &GenreId) -> Result<Vec<Book>, GenreError>;

    /// # Errors
    /// * `NotFound` - Genre does not exist
    /// * `NameAlreadyExists` - New name is taken
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, genre: Genre) -> Result<Genre, GenreError>;

    /// # Errors
    /// * `NotFound` - Genre does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &GenreId) -> Result<(), GenreError>;
}
