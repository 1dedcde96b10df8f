use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::books::BookDetailsResponseData;
use super::genres::GenreDetailsResponseData;
use super::ApiError;
use super::ApiSuccess;
use super::DeleteResponseData;
use super::PageQuery;
use crate::domain::book::errors::BookError;
use crate::domain::book::models::BookGenre;
use crate::domain::book::models::BookId;
use crate::domain::genre::errors::GenreError;
use crate::domain::genre::models::GenreId;
use crate::inbound::http::router::AppState;

pub async fn list_book_genres(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Result<ApiSuccess<Vec<BookGenreResponseData>>, ApiError> {
    state
        .book_service
        .list_book_genres(page.into())
        .await
        .map_err(ApiError::from)
        .map(|links| ApiSuccess::new(StatusCode::OK, links.iter().map(Into::into).collect()))
}

pub async fn create_book_genre(
    State(state): State<AppState>,
    Json(body): Json<CreateBookGenreRequest>,
) -> Result<ApiSuccess<BookGenreResponseData>, ApiError> {
    let book_id = BookId::from_string(&body.book_id).map_err(BookError::from)?;
    let genre_id = GenreId::from_string(&body.genre_id).map_err(BookError::from)?;

    state
        .book_service
        .add_genre(&book_id, &genre_id)
        .await
        .map_err(ApiError::from)
        .map(|ref link| ApiSuccess::new(StatusCode::CREATED, link.into()))
}

pub async fn get_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
) -> Result<ApiSuccess<BookDetailsResponseData>, ApiError> {
    let book_id = BookId::from_string(&book_id).map_err(BookError::from)?;

    state
        .book_service
        .get_book_by_id(&book_id)
        .await
        .map_err(ApiError::from)
        .map(|ref details| ApiSuccess::new(StatusCode::OK, details.into()))
}

pub async fn get_genre(
    State(state): State<AppState>,
    Path(genre_id): Path<String>,
) -> Result<ApiSuccess<GenreDetailsResponseData>, ApiError> {
    let genre_id = GenreId::from_string(&genre_id).map_err(GenreError::from)?;

    state
        .genre_service
        .get_genre_by_id(&genre_id)
        .await
        .map_err(ApiError::from)
        .map(|ref details| ApiSuccess::new(StatusCode::OK, details.into()))
}

pub async fn delete_book_genre(
    State(state): State<AppState>,
    Path((book_id, genre_id)): Path<(String, String)>,
) -> Result<ApiSuccess<DeleteResponseData>, ApiError> {
    let book_id = BookId::from_string(&book_id).map_err(BookError::from)?;
    let genre_id = GenreId::from_string(&genre_id).map_err(BookError::from)?;

    state
        .book_service
        .remove_genre(&book_id, &genre_id)
        .await
        .map_err(ApiError::from)
        .map(|_| {
            ApiSuccess::new(
                StatusCode::OK,
                DeleteResponseData::new(format!(
                    "Genre {} removed from book {}",
                    genre_id, book_id
                )),
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateBookGenreRequest {
    book_id: String,
    genre_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookGenreResponseData {
    pub book_id: String,
    pub genre_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<&BookGenre> for BookGenreResponseData {
    fn from(link: &BookGenre) -> Self {
        Self {
            book_id: link.book_id.to_string(),
            genre_id: link.genre_id.to_string(),
            created_at: link.created_at,
        }
    }
}
