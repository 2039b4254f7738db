//! Authentication DTOs.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::domain::entities::Account;

/// A password held only as long as needed and wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Password(String);

impl Password {
    /// Wraps a raw password.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Exposes the raw password for transmission.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the password length in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    /// Returns true if the password is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Password(***)")
    }
}

/// Sign-up request data.
#[derive(Debug, Clone)]
pub struct SignUpRequest {
    /// Email address to register.
    pub email: String,
    /// Chosen password.
    pub password: Password,
    /// Display name for the new profile.
    pub name: String,
}

impl SignUpRequest {
    /// Creates a new sign-up request.
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: Password::new(password),
            name: name.into(),
        }
    }
}

/// Sign-up response data.
#[derive(Debug, Clone)]
pub struct SignUpResponse {
    /// The registered account.
    pub account: Account,
    /// Whether the profile document was written.
    pub profile_written: bool,
}

/// Sign-in request data.
#[derive(Debug, Clone)]
pub struct SignInRequest {
    /// Email address.
    pub email: String,
    /// Password.
    pub password: Password,
}

impl SignInRequest {
    /// Creates a new sign-in request.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: Password::new(password),
        }
    }
}

/// Sign-in response data.
#[derive(Debug, Clone)]
pub struct SignInResponse {
    /// The authenticated account.
    pub account: Account,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_debug_never_prints_contents() {
        let password = Password::new("hunter2");
        assert_eq!(format!("{password:?}"), "Password(***)");
    }
}
