//! Remote auth service HTTP client.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use super::dto::{AccountResponse, CredentialsRequest, ErrorResponse};
use crate::domain::entities::Account;
use crate::domain::errors::AuthError;
use crate::domain::ports::AuthPort;

/// HTTP client for the remote authentication service.
pub struct HttpAuthClient {
    client: Client,
    base_url: String,
}

impl HttpAuthClient {
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

    async fn submit_credentials(
        &self,
        endpoint: &str,
        email: &str,
        password: &str,
    ) -> Result<Account, AuthError> {
        let url = format!("{}/{endpoint}", self.base_url);

        debug!(endpoint = %endpoint, "Submitting credentials to auth service");

        let response = self
            .client
            .post(&url)
            .json(&CredentialsRequest { email, password })
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to reach auth service");
                if e.is_timeout() {
                    AuthError::network("request timed out")
                } else if e.is_connect() {
                    AuthError::network("failed to connect to auth service")
                } else {
                    AuthError::network(e.to_string())
                }
            })?;

        let status = response.status();

        if !status.is_success() {
            return Err(Self::handle_error_response(status, response).await);
        }

        let account: AccountResponse = response.json().await.map_err(|e| {
            warn!(error = %e, "Failed to parse auth response");
            AuthError::unexpected(format!("failed to parse response: {e}"))
        })?;

        debug!(uid = %account.uid, "Credentials accepted");

        Ok(Account::new(account.uid, account.email))
    }

    async fn handle_error_response(status: StatusCode, response: reqwest::Response) -> AuthError {
        let error_message = match response.json::<ErrorResponse>().await {
            Ok(error) => error.message,
            Err(_) => format!("HTTP {status}"),
        };

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::BAD_REQUEST => {
                AuthError::rejected(error_message)
            }
            StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
                AuthError::network("auth service is temporarily unavailable")
            }
            _ => AuthError::unexpected(format!("unexpected response: {status} - {error_message}")),
        }
    }
}

#[async_trait]
impl AuthPort for HttpAuthClient {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Account, AuthError> {
        self.submit_credentials("accounts:signUp", email, password)
            .await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Account, AuthError> {
        self.submit_credentials("accounts:signInWithPassword", email, password)
            .await
    }
}
