//! Remote backend adapters (auth and document database).

pub mod auth_client;
pub mod database_client;
mod dto;

pub use auth_client::HttpAuthClient;
pub use database_client::HttpDatabaseClient;
