//! Sign-up use case implementation.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::dto::{SignUpRequest, SignUpResponse};
use crate::application::use_cases::validation;
use crate::domain::entities::UserProfile;
use crate::domain::errors::AuthError;
use crate::domain::ports::{AuthPort, RemoteDatabasePort, WriteMethod};

/// Path of the user profile collection in the remote database.
const USERS_PATH: &str = "root/users";

/// Handles account registration: validates input, registers the
/// account, then writes the initial profile document.
#[derive(Clone)]
pub struct SignUpUseCase {
    auth_port: Arc<dyn AuthPort>,
    database_port: Arc<dyn RemoteDatabasePort>,
}

impl SignUpUseCase {
    /// Creates new sign-up use case.
    #[must_use]
    pub const fn new(
        auth_port: Arc<dyn AuthPort>,
        database_port: Arc<dyn RemoteDatabasePort>,
    ) -> Self {
        Self {
            auth_port,
            database_port,
        }
    }

    /// Executes sign-up with the provided request.
    ///
    /// # Errors
    /// Returns error if validation fails, the auth service rejects the
    /// credentials, or the profile document cannot be written.
    pub async fn execute(&self, request: SignUpRequest) -> Result<SignUpResponse, AuthError> {
        validation::validate_email(&request.email)?;
        validation::validate_password(&request.password)?;
        validation::validate_name(&request.name)?;

        debug!(email = %request.email, "Attempting sign-up");

        let account = self
            .auth_port
            .sign_up(&request.email, request.password.as_str())
            .await?;

        info!(uid = %account.uid, "Account registered");

        let profile = UserProfile::new_account(&account, &request.name);
        let profile_value = serde_json::to_value(&profile)
            .map_err(|e| AuthError::unexpected(format!("failed to encode profile: {e}")))?;
        let body = serde_json::Value::Object(
            std::iter::once((account.uid.clone(), profile_value)).collect(),
        );

        if let Err(e) = self
            .database_port
            .write(USERS_PATH, body, WriteMethod::Patch, Vec::new())
            .await
        {
            warn!(uid = %account.uid, error = %e, "Profile write failed after registration");
            return Err(AuthError::profile_write(e.to_string()));
        }

        Ok(SignUpResponse {
            account,
            profile_written: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Account;
    use crate::domain::ports::{MockAuthPort, MockRemoteDatabasePort};
    use mockall::predicate;

    fn accepting_auth() -> MockAuthPort {
        let mut auth = MockAuthPort::new();
        auth.expect_sign_up()
            .returning(|email, _| Ok(Account::new("uid-1", email)));
        auth
    }

    #[tokio::test]
    async fn test_sign_up_writes_profile() {
        let auth = accepting_auth();

        let mut database = MockRemoteDatabasePort::new();
        database
            .expect_write()
            .with(
                predicate::eq(USERS_PATH),
                predicate::function(|body: &serde_json::Value| {
                    body.get("uid-1")
                        .and_then(|p| p.get("nickName"))
                        .and_then(|n| n.as_str())
                        == Some("tester")
                }),
                predicate::eq(WriteMethod::Patch),
                predicate::eq(Vec::new()),
            )
            .times(1)
            .returning(|_, _, _, _| Ok(()));

        let use_case = SignUpUseCase::new(Arc::new(auth), Arc::new(database));
        let response = use_case
            .execute(SignUpRequest::new("a@b.com", "secret1", "tester"))
            .await
            .unwrap();

        assert_eq!(response.account.uid, "uid-1");
        assert!(response.profile_written);
    }

    #[tokio::test]
    async fn test_sign_up_rejects_short_password() {
        let mut auth = MockAuthPort::new();
        auth.expect_sign_up().times(0);
        let mut database = MockRemoteDatabasePort::new();
        database.expect_write().times(0);

        let use_case = SignUpUseCase::new(Arc::new(auth), Arc::new(database));
        let result = use_case
            .execute(SignUpRequest::new("a@b.com", "short", "tester"))
            .await;

        assert!(matches!(result, Err(AuthError::InvalidPassword { .. })));
    }

    #[tokio::test]
    async fn test_sign_up_surfaces_auth_rejection() {
        let mut auth = MockAuthPort::new();
        auth.expect_sign_up()
            .returning(|_, _| Err(AuthError::rejected("email already in use")));
        let mut database = MockRemoteDatabasePort::new();
        database.expect_write().times(0);

        let use_case = SignUpUseCase::new(Arc::new(auth), Arc::new(database));
        let result = use_case
            .execute(SignUpRequest::new("a@b.com", "secret1", "tester"))
            .await;

        assert!(matches!(result, Err(AuthError::Rejected { .. })));
    }

    #[tokio::test]
    async fn test_sign_up_surfaces_profile_write_failure() {
        let auth = accepting_auth();
        let mut database = MockRemoteDatabasePort::new();
        database
            .expect_write()
            .returning(|_, _, _, _| Err(AuthError::network("db unreachable")));

        let use_case = SignUpUseCase::new(Arc::new(auth), Arc::new(database));
        let result = use_case
            .execute(SignUpRequest::new("a@b.com", "secret1", "tester"))
            .await;

        assert!(matches!(result, Err(AuthError::ProfileWriteFailed { .. })));
    }
}
