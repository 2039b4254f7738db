//! Stable identifier for cached resources.

/// Unique identifier for a cached image.
/// Derived from a hash of the source URL, so it is deterministic,
/// collision-free for distinct resources, and safe as a file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(pub String);

impl CacheKey {
    /// Creates a new `CacheKey` from any string-like input.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Creates a `CacheKey` from a URL by hashing it.
    #[must_use]
    pub fn from_url(url: &str) -> Self {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(url.as_bytes());
        let result = hasher.finalize();
        Self(hex::encode(&result[..16]))
    }

    /// Returns the inner string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CacheKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for CacheKey {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_from_url() {
        let url = "https://example.com/artworks/123/image.png";
        let key = CacheKey::from_url(url);
        assert!(!key.0.is_empty());
        assert_eq!(key.0.len(), 32);
    }

    #[test]
    fn test_key_determinism() {
        let url = "https://example.com/image.png";
        let key1 = CacheKey::from_url(url);
        let key2 = CacheKey::from_url(url);
        assert_eq!(key1, key2);
    }

    #[test]
    fn test_distinct_urls_distinct_keys() {
        let key1 = CacheKey::from_url("https://example.com/a.png");
        let key2 = CacheKey::from_url("https://example.com/b.png");
        assert_ne!(key1, key2);
    }
}
