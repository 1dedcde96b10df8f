pub mod author;
pub mod book;
pub mod genre;
pub mod user;

pub use author::PostgresAuthorRepository;
pub use book::PostgresBookRepository;
pub use genre::PostgresGenreRepository;
pub use user::PostgresUserRepository;
