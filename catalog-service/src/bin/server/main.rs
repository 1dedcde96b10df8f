use std::sync::Arc;

use auth::Authenticator;
use catalog_service::config::Config;
use catalog_service::domain::author::service::AuthorService;
use catalog_service::domain::book::service::BookService;
use catalog_service::domain::genre::service::GenreService;
use catalog_service::domain::user::ports::UserServicePort;
use catalog_service::domain::user::service::UserCredentialStore;
use catalog_service::domain::user::service::UserService;
use catalog_service::inbound::http::router::create_router;
use catalog_service::inbound::http::router::AppState;
use catalog_service::outbound::repositories::PostgresAuthorRepository;
use catalog_service::outbound::repositories::PostgresBookRepository;
use catalog_service::outbound::repositories::PostgresGenreRepository;
use catalog_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const MAX_CONNECTIONS: u32 = 5;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_service=debug,auth=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "catalog-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;
    // Invalid auth settings stop the process before any database work.
    config.validate()?;

    tracing::info!(
        http_port = config.server.http_port,
        algorithm = %config.auth.algorithm,
        access_token_expire_minutes = config.auth.access_token_expire_minutes,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = MAX_CONNECTIONS,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let author_repository = Arc::new(PostgresAuthorRepository::new(pg_pool.clone()));
    let genre_repository = Arc::new(PostgresGenreRepository::new(pg_pool.clone()));
    let book_repository = Arc::new(PostgresBookRepository::new(pg_pool));

    let user_service: Arc<dyn UserServicePort> = Arc::new(UserService::new(user_repository));
    let author_service = Arc::new(AuthorService::new(Arc::clone(&author_repository)));
    let genre_service = Arc::new(GenreService::new(Arc::clone(&genre_repository)));
    let book_service = Arc::new(BookService::new(
        book_repository,
        author_repository,
        genre_repository,
    ));

    let credential_store = Arc::new(UserCredentialStore::new(Arc::clone(&user_service)));
    let authenticator = Arc::new(Authenticator::new(&config.auth, credential_store)?);

    let state = AppState {
        user_service,
        author_service,
        genre_service,
        book_service,
        authenticator,
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    if let Err(e) = axum::serve(http_listener, create_router(state)).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
