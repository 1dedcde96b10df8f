use async_trait::async_trait;

use crate::domain::author::errors::AuthorError;
use crate::domain::author::models::Author;
use crate::domain::author::models::AuthorDetails;
use crate::domain::author::models::AuthorId;
use crate::domain::author::models::AuthorName;
use crate::domain::author::models::CreateAuthorCommand;
use crate::domain::author::models::UpdateAuthorCommand;
use crate::domain::book::models::Book;
use crate::domain::models::Page;

/// Port for author domain service operations.
#[async_trait]
pub trait AuthorServicePort: Send + Sync + 'static {
    /// Create a new author.
    ///
    /// # Errors
    /// * `NameAlreadyExists` - Another author has this name
    /// * `DatabaseError` - Database operation failed
    async fn create_author(&self, command: CreateAuthorCommand) -> Result<Author, AuthorError>;

    /// Retrieve an author and their books by name.
    ///
    /// # Errors
    /// * `NotFound` - No author with this name
    /// * `DatabaseError` - Database operation failed
    async fn get_author(&self, name: &AuthorName) -> Result<AuthorDetails, AuthorError>;

    async fn list_authors(&self, page: Page) -> Result<Vec<Author>, AuthorError>;

    /// Rename an author.
    ///
    /// # Errors
    /// * `NotFound` - No author with this name
    /// * `NameAlreadyExists` - New name is taken
    /// * `DatabaseError` - Database operation failed
    async fn update_author(
        &self,
        name: &AuthorName,
        command: UpdateAuthorCommand,
    ) -> Result<Author, AuthorError>;

    /// Delete an author. Their books are kept without an author.
    ///
    /// # Errors
    /// * `NotFound` - No author with this name
    /// * `DatabaseError` - Database operation failed
    async fn delete_author(&self, name: &AuthorName) -> Result<(), AuthorError>;
}

/// Persistence operations for authors.
#[async_trait]
pub trait AuthorRepository: Send + Sync + 'static {
    /// # Errors
    /// * `NameAlreadyExists` - Another author has this name
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, author: Author) -> Result<Author, AuthorError>;

    async fn find_by_id(&self, id: &AuthorId) -> Result<Option<Author>, AuthorError>;

    async fn find_by_name(&self, name: &AuthorName) -> Result<Option<Author>, AuthorError>;

    async fn list(&self, page: Page) -> Result<Vec<Author>, AuthorError>;

    /// Books attributed to the author, ordered by title.
    async fn list_books(&self, id: &AuthorId) -> Result<Vec<Book>, AuthorError>;

    /// # Errors
    /// * `NotFound` - Author does not exist
    /// * `NameAlreadyExists` - New name is taken
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, author: Author) -> Result<Author, AuthorError>;

    /// # Errors
    /// * `NotFound` - Author does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &AuthorId) -> Result<(), AuthorError>;
}
