//! Cache and load error types.

use thiserror::Error;

/// Result type for cache operations.
pub type CacheResult<T> = std::result::Result<T, CacheError>;

/// Errors that can occur while loading or caching an image.
///
/// Cloneable so a single failure can be fanned out to every caller
/// attached to a coalesced in-flight load.
#[derive(Debug, Clone, Error)]
pub enum CacheError {
    /// Resource absent at every tier.
    #[error("not found: {0}")]
    NotFound(String),
    /// I/O error in the disk tier. Recovered locally as a miss and
    /// never propagated past the loader.
    #[error("cache I/O error: {0}")]
    Io(String),
    /// Network or HTTP failure. The terminal failure of a load.
    #[error("fetch failed: {0}")]
    Fetch(String),
}

impl CacheError {
    /// Creates an I/O error.
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io(message.into())
    }

    /// Creates a fetch error.
    #[must_use]
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch(message.into())
    }

    /// Creates a not-found error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Returns whether this failure came from the network path.
    #[must_use]
    pub const fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch(_))
    }
}
