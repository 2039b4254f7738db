//! Remote document database HTTP client.

use async_trait::async_trait;
use reqwest::{Client, Method};
use tracing::{debug, warn};

use crate::domain::errors::AuthError;
use crate::domain::ports::{RemoteDatabasePort, WriteMethod};

/// HTTP client for the remote key-addressed document database.
pub struct HttpDatabaseClient {
    client: Client,
    base_url: String,
}

impl HttpDatabaseClient {
    /// Creates a client against the given base URL.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(base_url: impl Into<String>) -> Result<Self, AuthError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| AuthError::unexpected(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn method_for(method: WriteMethod) -> Method {
        match method {
            WriteMethod::Put => Method::PUT,
            WriteMethod::Post => Method::POST,
            WriteMethod::Patch => Method::PATCH,
        }
    }
}

#[async_trait]
impl RemoteDatabasePort for HttpDatabaseClient {
    async fn write(
        &self,
        path: &str,
        body: serde_json::Value,
        method: WriteMethod,
        headers: Vec<(String, String)>,
    ) -> Result<(), AuthError> {
        let url = format!("{}/{}.json", self.base_url, path.trim_matches('/'));

        debug!(path = %path, method = %method, "Writing document to remote database");

        let mut request = self
            .client
            .request(Self::method_for(method), &url)
            .json(&body);

        for (name, value) in headers {
            request = request.header(name, value);
        }

        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "Failed to reach remote database");
            AuthError::network(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::profile_write(format!("HTTP {status}")));
        }

        debug!(path = %path, "Document write accepted");
        Ok(())
    }
}
