use std::sync::Arc;

use async_trait::async_trait;
use auth::CredentialStore;
use auth::CredentialStoreError;
use chrono::Utc;

use crate::domain::models::Page;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: auth::PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    ///
    /// # Returns
    /// Configured user service instance
    pub fn new(repository: Arc<UR>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }

    async fn find(&self, username: &Username) -> Result<User, UserError> {
        self.repository
            .find_by_username(username)
            .await?
            .ok_or_else(|| UserError::NotFound(username.to_string()))
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let password_hash = self.password_hasher.hash(&command.password)?;

        let user = User {
            id: UserId::new(),
            username: command.username,
            password_hash,
            description: command.description,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, username = %created_user.username, "User created");

        Ok(created_user)
    }

    async fn get_user(&self, username: &Username) -> Result<User, UserError> {
        self.find(username).await
    }

    async fn list_users(&self, page: Page) -> Result<Vec<User>, UserError> {
        self.repository.list(page).await
    }

    async fn update_user(
        &self,
        username: &Username,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        let mut user = self.find(username).await?;

        if let Some(new_username) = command.username {
            user.username = new_username;
        }

        if let Some(new_password) = command.password {
            user.password_hash = self.password_hasher.hash(&new_password)?;
        }

        if let Some(new_description) = command.description {
            user.description = Some(new_description);
        }

        self.repository.update(user).await
    }

    async fn delete_user(&self, username: &Username) -> Result<(), UserError> {
        let user = self.find(username).await?;
        self.repository.delete(&user.id).await?;
        tracing::info!(user_id = %user.id, username = %user.username, "User deleted");

        Ok(())
    }
}

/// Exposes the user directory to the auth core as its credential store.
///
/// Malformed usernames can never exist, so they resolve to `None` like any
/// other unknown name.
#[derive(Clone)]
pub struct UserCredentialStore {
    users: Arc<dyn UserServicePort>,
}

impl UserCredentialStore {
    pub fn new(users: Arc<dyn UserServicePort>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl CredentialStore for UserCredentialStore {
    type User = User;

    async fn lookup_user(&self, username: &str) -> Result<Option<User>, CredentialStoreError> {
        let Ok(username) = Username::new(username.to_string()) else {
            return Ok(None);
        };

        match self.users.get_user(&username).await {
            Ok(user) => Ok(Some(user)),
            Err(UserError::NotFound(_)) => Ok(None),
            Err(e) => Err(CredentialStoreError(e.to_string())),
        }
    }
}
