//! Authentication error types.

use thiserror::Error;

/// Authentication error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum AuthError {
    #[error("invalid email address: {reason}")]
    InvalidEmail { reason: String },

    #[error("invalid password: {reason}")]
    InvalidPassword { reason: String },

    #[error("invalid display name: {reason}")]
    InvalidName { reason: String },

    #[error("credentials rejected by the auth service: {message}")]
    Rejected { message: String },

    #[error("failed to persist account profile: {message}")]
    ProfileWriteFailed { message: String },

    #[error("network error during authentication: {message}")]
    NetworkError { message: String },

    #[error("unexpected authentication error: {message}")]
    Unexpected { message: String },
}

impl AuthError {
    /// Creates an invalid email error.
    #[must_use]
    pub fn invalid_email(reason: impl Into<String>) -> Self {
        Self::InvalidEmail {
            reason: reason.into(),
        }
    }

    /// Creates an invalid password error.
    #[must_use]
    pub fn invalid_password(reason: impl Into<String>) -> Self {
        Self::InvalidPassword {
            reason: reason.into(),
        }
    }

    /// Creates an invalid name error.
    #[must_use]
    pub fn invalid_name(reason: impl Into<String>) -> Self {
        Self::InvalidName {
            reason: reason.into(),
        }
    }

    /// Creates a rejected-credentials error.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// Creates a profile write error.
    #[must_use]
    pub fn profile_write(message: impl Into<String>) -> Self {
        Self::ProfileWriteFailed {
            message: message.into(),
        }
    }

    /// Creates a network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkError {
            message: message.into(),
        }
    }

    /// Creates an unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns whether the caller can sensibly retry.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. } | Self::Rejected { .. } | Self::ProfileWriteFailed { .. }
        )
    }

    /// Returns whether error is network related.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::NetworkError { .. })
    }
}
