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
use crate::domain::genre::errors::GenreError;
use crate::domain::genre::models::CreateGenreCommand;
use crate::domain::genre::models::Genre;
use crate::domain::genre::models::GenreDetails;
use crate::domain::genre::models::GenreName;
use crate::domain::genre::models::UpdateGenreCommand;
use crate::inbound::http::router::AppState;

pub async fn list_genres(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Result<ApiSuccess<Vec<GenreResponseData>>, ApiError> {
    state
        .genre_service
        .list_genres(page.into())
        .await
        .map_err(ApiError::from)
        .map(|genres| ApiSuccess::new(StatusCode::OK, genres.iter().map(Into::into).collect()))
}

pub async fn create_genre(
    State(state): State<AppState>,
    Json(body): Json<CreateGenreRequest>,
) -> Result<ApiSuccess<GenreResponseData>, ApiError> {
    let command = CreateGenreCommand {
        name: GenreName::new(body.name).map_err(GenreError::from)?,
    };

    state
        .genre_service
        .create_genre(command)
        .await
        .map_err(ApiError::from)
        .map(|ref genre| ApiSuccess::new(StatusCode::CREATED, genre.into()))
}

pub async fn get_genre(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<ApiSuccess<GenreDetailsResponseData>, ApiError> {
    let name = GenreName::new(name).map_err(GenreError::from)?;

    state
        .genre_service
        .get_genre(&name)
        .await
        .map_err(ApiError::from)
        .map(|ref details| ApiSuccess::new(StatusCode::OK, details.into()))
}

pub async fn update_genre(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(body): Json<UpdateGenreRequest>,
) -> Result<ApiSuccess<GenreResponseData>, ApiError> {
    let name = GenreName::new(name).map_err(GenreError::from)?;
    let command = UpdateGenreCommand {
        name: body
            .name
            .map(GenreName::new)
            .transpose()
            .map_err(GenreError::from)?,
    };

    state
        .genre_service
        .update_genre(&name, command)
        .await
        .map_err(ApiError::from)
        .map(|ref genre| ApiSuccess::new(StatusCode::OK, genre.into()))
}

pub async fn delete_genre(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<ApiSuccess<DeleteResponseData>, ApiError> {
    let name = GenreName::new(name).map_err(GenreError::from)?;

    state
        .genre_service
        .delete_genre(&name)
        .await
        .map_err(ApiError::from)
        .map(|_| {
            ApiSuccess::new(
                StatusCode::OK,
                DeleteResponseData::new(format!("Genre '{}' deleted successfully", name)),
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateGenreRequest {
    name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateGenreRequest {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreResponseData {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Genre> for GenreResponseData {
    fn from(genre: &Genre) -> Self {
        Self {
            id: genre.id.to_string(),
            name: genre.name.as_str().to_string(),
            created_at: genre.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreDetailsResponseData {
    #[serde(flatten)]
    pub genre: GenreResponseData,
    pub books: Vec<BookResponseData>,
}

impl From<&GenreDetails> for GenreDetailsResponseData {
    fn from(details: &GenreDetails) -> Self {
        Self {
            genre: (&details.genre).into(),
            books: details.books.iter().map(Into::into).collect(),
        }
    }
}
