use auth::AuthError;
use axum::http::header;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::author::errors::AuthorError;
use crate::domain::book::errors::BookError;
use crate::domain::genre::errors::GenreError;
use crate::domain::models::Page;
use crate::domain::user::errors::UserError;

pub mod authors;
pub mod book_genres;
pub mod books;
pub mod genres;
pub mod token;
pub mod users;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    /// Missing or rejected bearer credentials; `scope` is echoed in the challenge
    Unauthorized {
        message: String,
        scope: Option<String>,
    },
    /// Authenticated but not allowed; `scope` lists the missing scopes, if any
    Forbidden {
        message: String,
        scope: Option<String>,
    },
}

impl ApiError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized {
            message: message.into(),
            scope: None,
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden {
            message: message.into(),
            scope: None,
        }
    }

    /// `WWW-Authenticate` value for 401 and 403 responses.
    fn challenge(&self) -> Option<String> {
        match self {
            ApiError::Unauthorized { scope: None, .. } => Some("Bearer".to_string()),
            ApiError::Unauthorized {
                scope: Some(scope), ..
            } => Some(format!("Bearer scope=\"{scope}\"")),
            ApiError::Forbidden {
                scope: Some(scope), ..
            } => Some(format!(
                "Bearer error=\"insufficient_scope\", scope=\"{scope}\""
            )),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let challenge = self.challenge();
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized { message, .. } => (StatusCode::UNAUTHORIZED, message),
            ApiError::Forbidden { message, .. } => (StatusCode::FORBIDDEN, message),
        };

        let body = Json(ApiResponseBody::new_error(status, message));
        match challenge {
            Some(challenge) => {
                (status, [(header::WWW_AUTHENTICATE, challenge)], body).into_response()
            }
            None => (status, body).into_response(),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => {
                ApiError::unauthorized("Incorrect username or password")
            }
            AuthError::InvalidToken => ApiError::unauthorized(err.to_string()),
            AuthError::Forbidden { ref missing } => ApiError::Forbidden {
                scope: Some(missing.join(" ")),
                message: err.to_string(),
            },
            AuthError::Password(_)
            | AuthError::ExpirationOutOfRange
            | AuthError::Jwt(_)
            | AuthError::Store(_) => {
                tracing::error!(error = %err, "Authentication failed unexpectedly");
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::UsernameAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            UserError::InvalidUsername(_) | UserError::InvalidDescription(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            UserError::Password(_) | UserError::DatabaseError(_) | UserError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<AuthorError> for ApiError {
    fn from(err: AuthorError) -> Self {
        match err {
            AuthorError::NotFound(_) => ApiError::NotFound(err.to_string()),
            AuthorError::NameAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            AuthorError::InvalidAuthorId(_) | AuthorError::InvalidName(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            AuthorError::DatabaseError(_) | AuthorError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<GenreError> for ApiError {
    fn from(err: GenreError) -> Self {
        match err {
            GenreError::NotFound(_) => ApiError::NotFound(err.to_string()),
            GenreError::NameAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            GenreError::InvalidGenreId(_) | GenreError::InvalidName(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            GenreError::DatabaseError(_) | GenreError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<BookError> for ApiError {
    fn from(err: BookError) -> Self {
        match err {
            BookError::NotFound(_)
            | BookError::AuthorNotFound(_)
            | BookError::GenreNotFound(_)
            | BookError::GenreNotLinked { .. } => ApiError::NotFound(err.to_string()),
            BookError::TitleAlreadyExists(_)
            | BookError::IsbnAlreadyExists(_)
            | BookError::GenreAlreadyLinked { .. } => ApiError::Conflict(err.to_string()),
            BookError::InvalidId(_)
            | BookError::InvalidTitle(_)
            | BookError::InvalidPublisher(_)
            | BookError::InvalidIsbn(_)
            | BookError::InvalidPages(_) => ApiError::UnprocessableEntity(err.to_string()),
            BookError::DatabaseError(_) | BookError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Confirmation body for delete operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteResponseData {
    pub message: String,
}

impl DeleteResponseData {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// `?skip=&limit=` query parameters of list endpoints.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    skip: Option<i64>,
    limit: Option<i64>,
}

impl From<PageQuery> for Page {
    fn from(query: PageQuery) -> Self {
        Page::new(query.skip, query.limit)
    }
}
