//! Remote auth service port definition.

use async_trait::async_trait;

use crate::domain::entities::Account;
use crate::domain::errors::AuthError;

/// Port for the remote authentication service.
///
/// The backend is opaque; only the request/response contract is
/// specified here.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthPort: Send + Sync {
    /// Registers a new account with the given credentials.
    async fn sign_up(&self, email: &str, password: &str) -> Result<Account, AuthError>;

    /// Authenticates an existing account.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Account, AuthError>;
}
