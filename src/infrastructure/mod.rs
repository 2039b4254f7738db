//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// Cache subsystem composition root.
pub mod factory;
/// Image handling (caching, fetching, loading).
pub mod image;
/// Remote backend clients.
pub mod remote;

pub use config::{AppConfig, CacheConfig, CliArgs, LogLevel, RemoteConfig, StorageManager};
pub use factory::CacheFactory;
pub use image::{
    CacheStats, DiskImageCache, FetcherConfig, HttpFetcher, ImageLoadedEvent, ImageLoader,
    ImageLoaderConfig, MemoryImageCache,
};
pub use remote::{HttpAuthClient, HttpDatabaseClient};
