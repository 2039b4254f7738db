//! Image handling infrastructure.
//!
//! This module provides:
//! - Memory caching with LRU eviction
//! - Disk caching for persistence
//! - HTTP byte fetching
//! - Async image loading pipeline

pub mod disk_cache;
pub mod fetcher;
pub mod loader;
pub mod memory_cache;

pub use disk_cache::DiskImageCache;
pub use fetcher::{FetcherConfig, HttpFetcher};
pub use loader::{ImageLoadedEvent, ImageLoader, ImageLoaderConfig};
pub use memory_cache::{CacheStats, MemoryImageCache};
