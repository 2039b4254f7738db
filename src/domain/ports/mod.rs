//! Port (interface) definitions for external collaborators.

mod auth_port;
mod database_port;
mod fetcher_port;
mod image_cache_port;

pub use auth_port::AuthPort;
pub use database_port::{RemoteDatabasePort, WriteMethod};
pub use fetcher_port::FetcherPort;
pub use image_cache_port::{ImageCachePort, ImageLoaderPort};

#[cfg(test)]
pub use auth_port::MockAuthPort;
#[cfg(test)]
pub use database_port::MockRemoteDatabasePort;
#[cfg(test)]
pub use fetcher_port::mock::MockFetcher;
