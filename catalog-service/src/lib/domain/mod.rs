pub mod author;
pub mod book;
pub mod errors;
pub mod genre;
pub mod models;
pub mod user;
