//! Remote database port definition.

use async_trait::async_trait;

use crate::domain::errors::AuthError;

/// HTTP method used for a remote database write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMethod {
    /// Replace the document at the path.
    Put,
    /// Create a new document under the path.
    Post,
    /// Merge fields into the document at the path.
    Patch,
}

impl WriteMethod {
    /// Returns the HTTP method name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Put => "PUT",
            Self::Post => "POST",
            Self::Patch => "PATCH",
        }
    }
}

impl std::fmt::Display for WriteMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Port for the remote key-addressed document database.
///
/// The backend is opaque; writes either succeed or fail as a unit.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteDatabasePort: Send + Sync {
    /// Writes a JSON document to `path` with the given method and
    /// extra request headers.
    async fn write(
        &self,
        path: &str,
        body: serde_json::Value,
        method: WriteMethod,
        headers: Vec<(String, String)>,
    ) -> Result<(), AuthError>;
}
