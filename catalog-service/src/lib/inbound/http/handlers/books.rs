use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::authors::AuthorResponseData;
use super::genres::GenreResponseData;
use super::ApiError;
use super::ApiSuccess;
use super::DeleteResponseData;
use super::PageQuery;
use crate::domain::author::models::AuthorId;
use crate::domain::book::errors::BookError;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookDetails;
use crate::domain::book::models::BookTitle;
use crate::domain::book::models::CreateBookCommand;
use crate::domain::book::models::Isbn;
use crate::domain::book::models::Pages;
use crate::domain::book::models::Publisher;
use crate::domain::book::models::UpdateBookCommand;
use crate::inbound::http::router::AppState;

pub async fn list_books(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Result<ApiSuccess<Vec<BookResponseData>>, ApiError> {
    state
        .book_service
        .list_books(page.into())
        .await
        .map_err(ApiError::from)
        .map(|books| ApiSuccess::new(StatusCode::OK, books.iter().map(Into::into).collect()))
}

pub async fn create_book(
    State(state): State<AppState>,
    Json(body): Json<CreateBookRequest>,
) -> Result<ApiSuccess<BookResponseData>, ApiError> {
    state
        .book_service
        .create_book(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref book| ApiSuccess::new(StatusCode::CREATED, book.into()))
}

pub async fn get_book(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Result<ApiSuccess<BookDetailsResponseData>, ApiError> {
    let title = BookTitle::new(title)?;

    state
        .book_service
        .get_book(&title)
        .await
        .map_err(ApiError::from)
        .map(|ref details| ApiSuccess::new(StatusCode::OK, details.into()))
}

pub async fn update_book(
    State(state): State<AppState>,
    Path(title): Path<String>,
    Json(body): Json<UpdateBookRequest>,
) -> Result<ApiSuccess<BookResponseData>, ApiError> {
    let title = BookTitle::new(title)?;

    state
        .book_service
        .update_book(&title, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref book| ApiSuccess::new(StatusCode::OK, book.into()))
}

pub async fn delete_book(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Result<ApiSuccess<DeleteResponseData>, ApiError> {
    let title = BookTitle::new(title)?;

    state
        .book_service
        .delete_book(&title)
        .await
        .map_err(ApiError::from)
        .map(|_| {
            ApiSuccess::new(
                StatusCode::OK,
                DeleteResponseData::new(format!("Book '{}' deleted successfully", title)),
            )
        })
}

pub async fn change_author(
    State(state): State<AppState>,
    Path(title): Path<String>,
    Json(body): Json<ChangeAuthorRequest>,
) -> Result<ApiSuccess<BookDetailsResponseData>, ApiError> {
    let title = BookTitle::new(title)?;
    let author_id = AuthorId::from_string(&body.author_id).map_err(BookError::from)?;

    state
        .book_service
        .change_author(&title, &author_id)
        .await
        .map_err(ApiError::from)
        .map(|ref details| ApiSuccess::new(StatusCode::OK, details.into()))
}

/// HTTP request body for creating a book (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateBookRequest {
    #[serde(default)]
    isbn: Option<String>,
    title: String,
    #[serde(default)]
    author_id: Option<String>,
    pages: i32,
    #[serde(default)]
    publisher: Option<String>,
    /// Defaults to today when omitted.
    #[serde(default)]
    published: Option<NaiveDate>,
}

impl CreateBookRequest {
    fn try_into_command(self) -> Result<CreateBookCommand, BookError> {
        Ok(CreateBookCommand {
            isbn: self.isbn.map(Isbn::new).transpose()?,
            title: BookTitle::new(self.title)?,
            author_id: self
                .author_id
                .as_deref()
                .map(AuthorId::from_string)
                .transpose()?,
            pages: Pages::new(self.pages)?,
            publisher: self.publisher.map(Publisher::new).transpose()?,
            published: self.published.unwrap_or_else(|| Utc::now().date_naive()),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateBookRequest {
    #[serde(default)]
    isbn: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    pages: Option<i32>,
    #[serde(default)]
    publisher: Option<String>,
    #[serde(default)]
    published: Option<NaiveDate>,
}

impl UpdateBookRequest {
    fn try_into_command(self) -> Result<UpdateBookCommand, BookError> {
        Ok(UpdateBookCommand {
            isbn: self.isbn.map(Isbn::new).transpose()?,
            title: self.title.map(BookTitle::new).transpose()?,
            pages: self.pages.map(Pages::new).transpose()?,
            publisher: self.publisher.map(Publisher::new).transpose()?,
            published: self.published,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChangeAuthorRequest {
    author_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookResponseData {
    pub id: String,
    pub isbn: Option<String>,
    pub title: String,
    pub author_id: Option<String>,
    pub pages: i32,
    pub publisher: Option<String>,
    pub published: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl From<&Book> for BookResponseData {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.to_string(),
            isbn: book.isbn.as_ref().map(|i| i.as_str().to_string()),
            title: book.title.as_str().to_string(),
            author_id: book.author_id.map(|id| id.to_string()),
            pages: book.pages.get(),
            publisher: book.publisher.as_ref().map(|p| p.as_str().to_string()),
            published: book.published,
            created_at: book.created_at,
        }
    }
}

/// Book with its author and genres.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookDetailsResponseData {
    #[serde(flatten)]
    pub book: BookResponseData,
    pub author: Option<AuthorResponseData>,
    pub genres: Vec<GenreResponseData>,
}

impl From<&BookDetails> for BookDetailsResponseData {
    fn from(details: &BookDetails) -> Self {
        Self {
            book: (&details.book).into(),
            author: details.author.as_ref().map(Into::into),
            genres: details.genres.iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_defaults_published_to_today() {
        let request: CreateBookRequest =
            serde_json::from_str(r#"{"title": "Dune", "pages": 412}"#).unwrap();

        let command = request.try_into_command().unwrap();

        assert_eq!(command.published, Utc::now().date_naive());
        assert!(command.author_id.is_none());
        assert!(command.isbn.is_none());
    }

    #[test]
    fn test_create_request_rejects_invalid_fields() {
        let request: CreateBookRequest =
            serde_json::from_str(r#"{"title": "Dune", "pages": 0}"#).unwrap();
        assert!(matches!(
            request.try_into_command(),
            Err(BookError::InvalidPages(_))
        ));

        let request: CreateBookRequest =
            serde_json::from_str(r#"{"title": "Dune", "pages": 1, "author_id": "nope"}"#)
                .unwrap();
        assert!(matches!(
            request.try_into_command(),
            Err(BookError::InvalidId(_))
        ));
    }
}
