//! Domain types for image payloads.

use bytes::Bytes;

use super::CacheKey;

/// Status of an image in the loading pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ImageStatus {
    /// Image loading has not started.
    #[default]
    NotStarted,
    /// Image is being fetched from cache or network.
    Loading,
    /// Image is fully loaded and ready to consume.
    Ready,
    /// Image loading failed with an error message.
    Failed(String),
}

impl ImageStatus {
    /// Returns true if the image is ready to consume.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    /// Returns true if the image is currently being loaded.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns true if loading failed.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// A successfully loaded image payload.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    /// Cache key the payload is stored under.
    pub key: CacheKey,
    /// Raw image bytes as fetched from the source.
    pub bytes: Bytes,
    /// Which tier served this load.
    pub source: ImageSource,
}

/// Where an image was loaded from, ordered fastest to slowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    /// Served from the in-memory LRU tier.
    MemoryCache,
    /// Served from the on-disk tier.
    DiskCache,
    /// Downloaded from the network.
    Network,
}

impl std::fmt::Display for ImageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MemoryCache => write!(f, "memory"),
            Self::DiskCache => write!(f, "disk"),
            Self::Network => write!(f, "network"),
        }
    }
}
