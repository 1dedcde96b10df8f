use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::books::BookResponseData;
use super::ApiError;
use super::ApiSuccess;
use super::DeleteResponseData;
use super::PageQuery;
use crate::domain::author::errors::AuthorError;
use crate::domain::author::models::Author;
use crate::domain::author::models::AuthorDetails;
use crate::domain::author::models::AuthorName;
use crate::domain::author::models::CreateAuthorCommand;
use crate::domain::author::models::UpdateAuthorCommand;
use crate::inbound::http::router::AppState;

pub async fn list_authors(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Result<ApiSuccess<Vec<AuthorResponseData>>, ApiError> {
    state
        .author_service
        .list_authors(page.into())
        .await
        .map_err(ApiError::from)
        .map(|authors| ApiSuccess::new(StatusCode::OK, authors.iter().map(Into::into).collect()))
}

pub async fn create_author(
    State(state): State<AppState>,
    Json(body): Json<CreateAuthorRequest>,
) -> Result<ApiSuccess<AuthorResponseData>, ApiError> {
    let command = CreateAuthorCommand {
        name: AuthorName::new(body.name).map_err(AuthorError::from)?,
    };

    state
        .author_service
        .create_author(command)
        .await
        .map_err(ApiError::from)
        .map(|ref author| ApiSuccess::new(StatusCode::CREATED, author.into()))
}

pub async fn get_author(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<ApiSuccess<AuthorDetailsResponseData>, ApiError> {
    let name = AuthorName::new(name).map_err(AuthorError::from)?;

    state
        .author_service
        .get_author(&name)
        .await
        .map_err(ApiError::from)
        .map(|ref details| ApiSuccess::new(StatusCode::OK, details.into()))
}

pub async fn update_author(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(body): Json<UpdateAuthorRequest>,
) -> Result<ApiSuccess<AuthorResponseData>, ApiError> {
    let name = AuthorName::new(name).map_err(AuthorError::from)?;
    let command = UpdateAuthorCommand {
        name: body
            .name
            .map(AuthorName::new)
            .transpose()
            .map_err(AuthorError::from)?,
    };

    state
        .author_service
        .update_author(&name, command)
        .await
        .map_err(ApiError::from)
        .map(|ref author| ApiSuccess::new(StatusCode::OK, author.into()))
}

pub async fn delete_author(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<ApiSuccess<DeleteResponseData>, ApiError> {
    let name = AuthorName::new(name).map_err(AuthorError::from)?;

    state
        .author_service
        .delete_author(&name)
        .await
        .map_err(ApiError::from)
        .map(|_| {
            ApiSuccess::new(
                StatusCode::OK,
                DeleteResponseData::new(format!("Author '{}' deleted successfully", name)),
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateAuthorRequest {
    name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateAuthorRequest {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorResponseData {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Author> for AuthorResponseData {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id.to_string(),
            name: author.name.as_str().to_string(),
            created_at: author.created_at,
        }
    }
}

/// Author with the books attributed to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorDetailsResponseData {
    #[serde(flatten)]
    pub author: AuthorResponseData,
    pub books: Vec<BookResponseData>,
}

impl From<&AuthorDetails> for AuthorDetailsResponseData {
    fn from(details: &AuthorDetails) -> Self {
        Self {
            author: (&details.author).into(),
            books: details.books.iter().map(Into::into).collect(),
        }
    }
}
