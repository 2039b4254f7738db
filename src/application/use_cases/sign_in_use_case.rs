//! Sign-in use case implementation.

use std::sync::Arc;

use tracing::{debug, info};

use crate::application::dto::{SignInRequest, SignInResponse};
use crate::application::use_cases::validation;
use crate::domain::errors::AuthError;
use crate::domain::ports::AuthPort;

/// Handles authentication of existing accounts.
#[derive(Clone)]
pub struct SignInUseCase {
    auth_port: Arc<dyn AuthPort>,
}

impl SignInUseCase {
    /// Creates new sign-in use case.
    #[must_use]
    pub const fn new(auth_port: Arc<dyn AuthPort>) -> Self {
        Self { auth_port }
    }

    /// Executes sign-in with the provided request.
    ///
    /// # Errors
    /// Returns error if validation fails or the credentials are
    /// rejected.
    pub async fn execute(&self, request: SignInRequest) -> Result<SignInResponse, AuthError> {
        validation::validate_email(&request.email)?;
        validation::validate_password(&request.password)?;

        debug!(email = %request.email, "Attempting sign-in");

        let account = self
            .auth_port
            .sign_in(&request.email, request.password.as_str())
            .await?;

        info!(uid = %account.uid, "Signed in");

        Ok(SignInResponse { account })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Account;
    use crate::domain::ports::MockAuthPort;

    #[tokio::test]
    async fn test_sign_in_success() {
        let mut auth = MockAuthPort::new();
        auth.expect_sign_in()
            .returning(|email, _| Ok(Account::new("uid-9", email)));

        let use_case = SignInUseCase::new(Arc::new(auth));
        let response = use_case
            .execute(SignInRequest::new("a@b.com", "secret1"))
            .await
            .unwrap();

        assert_eq!(response.account.uid, "uid-9");
    }

    #[tokio::test]
    async fn test_sign_in_invalid_email_never_reaches_service() {
        let mut auth = MockAuthPort::new();
        auth.expect_sign_in().times(0);

        let use_case = SignInUseCase::new(Arc::new(auth));
        let result = use_case
            .execute(SignInRequest::new("not-an-email", "secret1"))
            .await;

        assert!(matches!(result, Err(AuthError::InvalidEmail { .. })));
    }
}
