use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::author::errors::AuthorError;
use crate::domain::author::models::Author;
use crate::domain::author::models::AuthorDetails;
use crate::domain::author::models::AuthorId;
use crate::domain::author::models::AuthorName;
use crate::domain::author::models::CreateAuthorCommand;
use crate::domain::author::models::UpdateAuthorCommand;
use crate::domain::author::ports::AuthorRepository;
use crate::domain::author::ports::AuthorServicePort;
use crate::domain::models::Page;

/// Domain service implementation for author operations.
pub struct AuthorService<AR>
where
    AR: AuthorRepository,
{
    repository: Arc<AR>,
}

impl<AR> AuthorService<AR>
where
    AR: AuthorRepository,
{
    pub fn new(repository: Arc<AR>) -> Self {
        Self { repository }
    }

    async fn find(&self, name: &AuthorName) -> Result<Author, AuthorError> {
        self.repository
            .find_by_name(name)
            .await?
            .ok_or_else(|| AuthorError::NotFound(name.to_string()))
    }
}

#[async_trait]
impl<AR> AuthorServicePort for AuthorService<AR>
where
    AR: AuthorRepository,
{
    async fn create_author(&self, command: CreateAuthorCommand) -> Result<Author, AuthorError> {
        let author = Author {
            id: AuthorId::new(),
            name: command.name,
            created_at: Utc::now(),
        };

        self.repository.create(author).await
    }

    async fn get_author(&self, name: &AuthorName) -> Result<AuthorDetails, AuthorError> {
        let author = self.find(name).await?;
        let books = self.repository.list_books(&author.id).await?;

        Ok(AuthorDetails { author, books })
    }

    async fn list_authors(&self, page: Page) -> Result<Vec<Author>, AuthorError> {
        self.repository.list(page).await
    }

    async fn update_author(
        &self,
        name: &AuthorName,
        command: UpdateAuthorCommand,
    ) -> Result<Author, AuthorError> {
        let mut author = self.find(name).await?;

        if let Some(new_name) = command.name {
            author.name = new_name;
        }

        self.repository.update(author).await
    }

    async fn delete_author(&self, name: &AuthorName) -> Result<(), AuthorError> {
        let author = self.find(name).await?;
        self.repository.delete(&author.id).await?;
        tracing::info!(author_id = %author.id, name = %author.name, "Author deleted");

        Ok(())
    }
}
