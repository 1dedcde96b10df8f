use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::DeleteResponseData;
use super::PageQuery;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::Description;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn list_users(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Result<ApiSuccess<Vec<UserResponseData>>, ApiError> {
    state
        .user_service
        .list_users(page.into())
        .await
        .map_err(ApiError::from)
        .map(|users| ApiSuccess::new(StatusCode::OK, users.iter().map(Into::into).collect()))
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<ApiSuccess<UserResponseData>, ApiError> {
    state
        .user_service
        .create_user(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

/// Profile of the token's owner. Requires the `me` scope.
pub async fn get_me(
    Extension(authenticated): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<UserResponseData>, ApiError> {
    Ok(ApiSuccess::new(
        StatusCode::OK,
        (&authenticated.user).into(),
    ))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<ApiSuccess<UserResponseData>, ApiError> {
    let username = Username::new(username).map_err(UserError::from)?;

    state
        .user_service
        .get_user(&username)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

pub async fn update_user(
    State(state): State<AppState>,
    Extension(authenticated): Extension<AuthenticatedUser>,
    Path(username): Path<String>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<ApiSuccess<UserResponseData>, ApiError> {
    ensure_self(&authenticated, &username)?;
    let username = Username::new(username).map_err(UserError::from)?;

    state
        .user_service
        .update_user(&username, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Extension(authenticated): Extension<AuthenticatedUser>,
    Path(username): Path<String>,
) -> Result<ApiSuccess<DeleteResponseData>, ApiError> {
    ensure_self(&authenticated, &username)?;
    let username = Username::new(username).map_err(UserError::from)?;

    state
        .user_service
        .delete_user(&username)
        .await
        .map_err(ApiError::from)
        .map(|_| {
            ApiSuccess::new(
                StatusCode::OK,
                DeleteResponseData::new(format!("User '{}' deleted successfully", username)),
            )
        })
}

/// Users may only modify their own account.
fn ensure_self(authenticated: &AuthenticatedUser, username: &str) -> Result<(), ApiError> {
    if authenticated.user.username.as_str() == username {
        return Ok(());
    }

    tracing::warn!(
        subject = %authenticated.user.username,
        target = %username,
        "Attempt to modify another user"
    );
    Err(ApiError::forbidden("Not allowed to modify another user"))
}

/// HTTP request body for creating a user (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateUserRequest {
    username: String,
    password: String,
    #[serde(default)]
    description: Option<String>,
}

impl CreateUserRequest {
    fn try_into_command(self) -> Result<CreateUserCommand, UserError> {
        let username = Username::new(self.username)?;
        let description = self.description.map(Description::new).transpose()?;
        Ok(CreateUserCommand::new(username, self.password, description))
    }
}

/// HTTP request body for a partial user update
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    password: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl UpdateUserRequest {
    fn try_into_command(self) -> Result<UpdateUserCommand, UserError> {
        Ok(UpdateUserCommand {
            username: self.username.map(Username::new).transpose()?,
            password: self.password,
            description: self.description.map(Description::new).transpose()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserResponseData {
    pub id: String,
    pub username: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponseData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.as_str().to_string(),
            description: user.description.as_ref().map(|d| d.as_str().to_string()),
            created_at: user.created_at,
        }
    }
}
