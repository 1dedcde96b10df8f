use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::authors;
use super::handlers::book_genres;
use super::handlers::books;
use super::handlers::genres;
use super::handlers::token;
use super::handlers::users;
use super::middleware::authenticate;
use super::middleware::BearerGuard;
use crate::domain::author::ports::AuthorServicePort;
use crate::domain::book::ports::BookServicePort;
use crate::domain::genre::ports::GenreServicePort;
use crate::domain::user::ports::UserServicePort;
use crate::domain::user::service::UserCredentialStore;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub author_service: Arc<dyn AuthorServicePort>,
    pub genre_service: Arc<dyn GenreServicePort>,
    pub book_service: Arc<dyn BookServicePort>,
    pub authenticator: Arc<Authenticator<UserCredentialStore>>,
}

pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/api/token", post(token::login))
        .route("/api/users", get(users::list_users))
        .route("/api/user", post(users::create_user))
        .route("/api/user/:username", get(users::get_user))
        .route("/api/books", get(books::list_books))
        .route("/api/book", post(books::create_book))
        .route(
            "/api/book/:title",
            get(books::get_book)
                .patch(books::update_book)
                .delete(books::delete_book),
        )
        .route("/api/book/:title/author", put(books::change_author))
        .route("/api/authors", get(authors::list_authors))
        .route("/api/author", post(authors::create_author))
        .route(
            "/api/author/:name",
            get(authors::get_author)
                .patch(authors::update_author)
                .delete(authors::delete_author),
        )
        .route("/api/genres", get(genres::list_genres))
        .route("/api/genre", post(genres::create_genre))
        .route(
            "/api/genre/:name",
            get(genres::get_genre)
                .patch(genres::update_genre)
                .delete(genres::delete_genre),
        );

    let protected_routes = Router::new()
        .route("/api/user/:username", patch(users::update_user))
        .route("/api/user/:username", delete(users::delete_user))
        .route(
            "/api/book_genres",
            get(book_genres::list_book_genres).post(book_genres::create_book_genre),
        )
        .route("/api/book_genres/book/:book_id", get(book_genres::get_book))
        .route(
            "/api/book_genres/genre/:genre_id",
            get(book_genres::get_genre),
        )
        .route(
            "/api/book_genres/:book_id/:genre_id",
            delete(book_genres::delete_book_genre),
        )
        .route_layer(middleware::from_fn_with_state(
            BearerGuard::new(state.clone()),
            authenticate,
        ));

    let me_routes = Router::new()
        .route("/api/users/me", get(users::get_me))
        .route_layer(middleware::from_fn_with_state(
            BearerGuard::with_scopes(state.clone(), &["me"]),
            authenticate,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(me_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use auth::AuthSettings;
    use auth::PasswordHasher;
    use auth::ScopeSet;
    use axum::http::header;
    use axum::http::StatusCode;
    use chrono::Utc;
    use http_body_util::BodyExt;
    use mockall::mock;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::domain::author::errors::AuthorError;
    use crate::domain::author::models::Author;
    use crate::domain::author::models::AuthorDetails;
    use crate::domain::author::models::AuthorId;
    use crate::domain::author::models::AuthorName;
    use crate::domain::author::models::CreateAuthorCommand;
    use crate::domain::author::models::UpdateAuthorCommand;
    use crate::domain::book::errors::BookError;
    use crate::domain::book::models::Book;
    use crate::domain::book::models::BookDetails;
    use crate::domain::book::models::BookGenre;
    use crate::domain::book::models::BookId;
    use crate::domain::book::models::BookTitle;
    use crate::domain::book::models::CreateBookCommand;
    use crate::domain::book::models::UpdateBookCommand;
    use crate::domain::book::service::tests::sample_book;
    use crate::domain::genre::errors::GenreError;
    use crate::domain::genre::models::CreateGenreCommand;
    use crate::domain::genre::models::Genre;
    use crate::domain::genre::models::GenreDetails;
    use crate::domain::genre::models::GenreId;
    use crate::domain::genre::models::GenreName;
    use crate::domain::genre::models::UpdateGenreCommand;
    use crate::domain::models::Page;
    use crate::domain::user::errors::UserError;
    use crate::domain::user::models::CreateUserCommand;
    use crate::domain::user::models::UpdateUserCommand;
    use crate::domain::user::models::User;
    use crate::domain::user::models::Username;
    use crate::domain::user::service::tests::sample_user;

    const SECRET: &str = "router_test_secret_at_least_32_bytes";
    const PASSWORD: &str = "correct horse battery staple";

    mock! {
        pub UserPort {}

        #[async_trait]
        impl UserServicePort for UserPort {
            async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError>;
            async fn get_user(&self, username: &Username) -> Result<User, UserError>;
            async fn list_users(&self, page: Page) -> Result<Vec<User>, UserError>;
            async fn update_user(&self, username: &Username, command: UpdateUserCommand) -> Result<User, UserError>;
            async fn delete_user(&self, username: &Username) -> Result<(), UserError>;
        }
    }

    mock! {
        pub AuthorPort {}

        #[async_trait]
        impl AuthorServicePort for AuthorPort {
            async fn create_author(&self, command: CreateAuthorCommand) -> Result<Author, AuthorError>;
            async fn get_author(&self, name: &AuthorName) -> Result<AuthorDetails, AuthorError>;
            async fn list_authors(&self, page: Page) -> Result<Vec<Author>, AuthorError>;
            async fn update_author(&self, name: &AuthorName, command: UpdateAuthorCommand) -> Result<Author, AuthorError>;
            async fn delete_author(&self, name: &AuthorName) -> Result<(), AuthorError>;
        }
    }

    mock! {
        pub GenrePort {}

        #[async_trait]
        impl GenreServicePort for GenrePort {
            async fn create_genre(&self, command: CreateGenreCommand) -> Result<Genre, GenreError>;
            async fn get_genre(&self, name: &GenreName) -> Result<GenreDetails, GenreError>;
            async fn get_genre_by_id(&self, id: &GenreId) -> Result<GenreDetails, GenreError>;
            async fn list_genres(&self, page: Page) -> Result<Vec<Genre>, GenreError>;
            async fn update_genre(&self, name: &GenreName, command: UpdateGenreCommand) -> Result<Genre, GenreError>;
            async fn delete_genre(&self, name: &GenreName) -> Result<(), GenreError>;
        }
    }

    mock! {
        pub BookPort {}

        #[async_trait]
        impl BookServicePort for BookPort {
            async fn create_book(&self, command: CreateBookCommand) -> Result<Book, BookError>;
            async fn get_book(&self, title: &BookTitle) -> Result<BookDetails, BookError>;
            async fn get_book_by_id(&self, id: &BookId) -> Result<BookDetails, BookError>;
            async fn list_books(&self, page: Page) -> Result<Vec<Book>, BookError>;
            async fn update_book(&self, title: &BookTitle, command: UpdateBookCommand) -> Result<Book, BookError>;
            async fn delete_book(&self, title: &BookTitle) -> Result<(), BookError>;
            async fn change_author(&self, title: &BookTitle, author_id: &AuthorId) -> Result<BookDetails, BookError>;
            async fn add_genre(&self, book_id: &BookId, genre_id: &GenreId) -> Result<BookGenre, BookError>;
            async fn list_book_genres(&self, page: Page) -> Result<Vec<BookGenre>, BookError>;
            async fn remove_genre(&self, book_id: &BookId, genre_id: &GenreId) -> Result<(), BookError>;
        }
    }

    /// User port that knows a single user, "alice", with a real Argon2 hash.
    fn user_port_with_alice() -> MockUserPort {
        let mut alice = sample_user("alice");
        alice.password_hash = PasswordHasher::new().hash(PASSWORD).unwrap();

        let mut users = MockUserPort::new();
        users.expect_get_user().returning(move |username| {
            if username.as_str() == "alice" {
                Ok(alice.clone())
            } else {
                Err(UserError::NotFound(username.to_string()))
            }
        });
        users
    }

    fn app(users: MockUserPort, books: MockBookPort) -> (Router, AppState) {
        let user_service: Arc<dyn UserServicePort> = Arc::new(users);
        let store = UserCredentialStore::new(user_service.clone());
        let settings = AuthSettings::new(SECRET, "HS256", 30);
        let state = AppState {
            user_service,
            author_service: Arc::new(MockAuthorPort::new()),
            genre_service: Arc::new(MockGenrePort::new()),
            book_service: Arc::new(books),
            authenticator: Arc::new(Authenticator::new(&settings, Arc::new(store)).unwrap()),
        };
        (create_router(state.clone()), state)
    }

    fn token_for(state: &AppState, subject: &str, scopes: &str) -> String {
        state
            .authenticator
            .token_service()
            .issue(subject, &ScopeSet::from_space_delimited(scopes), None)
            .unwrap()
    }

    fn get(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    fn login_request(username: &str, password: &str, scope: &str) -> Request<Body> {
        let body = format!("username={username}&password={password}&scope={scope}")
            .replace(' ', "+");
        Request::builder()
            .method("POST")
            .uri("/api/token")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    fn challenge(response: &Response<Body>) -> Option<String> {
        response
            .headers()
            .get(header::WWW_AUTHENTICATE)
            .map(|v| v.to_str().unwrap().to_string())
    }

    async fn json_body(response: Response<Body>) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_login_issues_bearer_token() {
        let (router, state) = app(user_port_with_alice(), MockBookPort::new());

        let response = router
            .oneshot(login_request("alice", PASSWORD, "me"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["token_type"], "bearer");

        let token = body["access_token"].as_str().unwrap();
        let claims = state
            .authenticator
            .token_service()
            .verify_and_decode(token)
            .unwrap();
        assert_eq!(claims.subject, "alice");
        assert!(claims.scopes.contains("me"));
    }

    #[tokio::test]
    async fn test_login_rejects_bad_credentials_uniformly() {
        for (username, password) in [("alice", "wrong"), ("mallory", PASSWORD)] {
            let (router, _) = app(user_port_with_alice(), MockBookPort::new());

            let response = router
                .oneshot(login_request(username, password, ""))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            assert_eq!(challenge(&response).as_deref(), Some("Bearer"));
            let body = json_body(response).await;
            assert_eq!(body["data"]["message"], "Incorrect username or password");
        }
    }

    #[tokio::test]
    async fn test_me_requires_token() {
        let (router, _) = app(user_port_with_alice(), MockBookPort::new());

        let response = router.oneshot(get("/api/users/me", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            challenge(&response).as_deref(),
            Some("Bearer scope=\"me\"")
        );
    }

    #[tokio::test]
    async fn test_me_requires_me_scope() {
        let (router, state) = app(user_port_with_alice(), MockBookPort::new());
        let token = token_for(&state, "alice", "");

        let response = router
            .oneshot(get("/api/users/me", Some(&token)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            challenge(&response).as_deref(),
            Some("Bearer error=\"insufficient_scope\", scope=\"me\"")
        );
    }

    #[tokio::test]
    async fn test_me_returns_token_owner() {
        let (router, state) = app(user_port_with_alice(), MockBookPort::new());
        let token = token_for(&state, "alice", "me");

        let response = router
            .oneshot(get("/api/users/me", Some(&token)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["data"]["username"], "alice");
        assert!(body["data"].get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_expired_token_is_rejected() {
        let (router, state) = app(user_port_with_alice(), MockBookPort::new());
        let token = state
            .authenticator
            .token_service()
            .issue_at(
                "alice",
                &ScopeSet::from_space_delimited("me"),
                Some(chrono::Duration::minutes(30)),
                Utc::now() - chrono::Duration::hours(1),
            )
            .unwrap();

        let response = router
            .oneshot(get("/api/users/me", Some(&token)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_token_for_deleted_user_is_rejected() {
        let (router, state) = app(user_port_with_alice(), MockBookPort::new());
        let token = token_for(&state, "bob", "me");

        let response = router
            .oneshot(get("/api/users/me", Some(&token)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_book_genres_require_token() {
        let (router, _) = app(user_port_with_alice(), MockBookPort::new());

        let response = router.oneshot(get("/api/book_genres", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(challenge(&response).as_deref(), Some("Bearer"));
    }

    #[tokio::test]
    async fn test_book_genres_with_token() {
        let mut books = MockBookPort::new();
        books
            .expect_list_book_genres()
            .withf(|page| page.skip() == 0 && page.limit() == 10)
            .times(1)
            .returning(|_| Ok(vec![]));
        let (router, state) = app(user_port_with_alice(), books);
        let token = token_for(&state, "alice", "");

        let response = router
            .oneshot(get("/api/book_genres?limit=10", Some(&token)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cannot_modify_another_user() {
        let mut users = user_port_with_alice();
        users.expect_delete_user().never();
        let (router, state) = app(users, MockBookPort::new());
        let token = token_for(&state, "alice", "");

        let request = Request::builder()
            .method("DELETE")
            .uri("/api/user/bob")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_public_book_listing() {
        let mut books = MockBookPort::new();
        books
            .expect_list_books()
            .times(1)
            .returning(|_| Ok(vec![sample_book("Dune")]));
        let (router, _) = app(MockUserPort::new(), books);

        let response = router.oneshot(get("/api/books", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status_code"], 200);
        assert_eq!(body["data"][0]["title"], "Dune");
    }

    #[tokio::test]
    async fn test_missing_book_is_not_found() {
        let mut books = MockBookPort::new();
        books
            .expect_get_book()
            .returning(|title| Err(BookError::NotFound(title.to_string())));
        let (router, _) = app(MockUserPort::new(), books);

        let response = router
            .oneshot(get("/api/book/Unknown", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_body(response).await;
        assert_eq!(body["data"]["message"], "Book not found: Unknown");
    }
}
