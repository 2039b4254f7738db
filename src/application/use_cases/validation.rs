//! Credential validation shared by the auth use cases.

use crate::application::dto::Password;
use crate::domain::errors::AuthError;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Validates an email address.
///
/// # Errors
/// Returns `AuthError::InvalidEmail` when the address is malformed.
pub fn validate_email(email: &str) -> Result<(), AuthError> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Err(AuthError::invalid_email("email is empty"));
    }

    let mut parts = trimmed.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();

    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(AuthError::invalid_email(format!(
            "'{trimmed}' is not a valid address"
        )));
    }
    if trimmed.contains(char::is_whitespace) {
        return Err(AuthError::invalid_email("address contains whitespace"));
    }

    Ok(())
}

/// Validates a password.
///
/// # Errors
/// Returns `AuthError::InvalidPassword` when shorter than
/// [`MIN_PASSWORD_LENGTH`].
pub fn validate_password(password: &Password) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::invalid_password(format!(
            "must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validates a display name.
///
/// # Errors
/// Returns `AuthError::InvalidName` when empty.
pub fn validate_name(name: &str) -> Result<(), AuthError> {
    if name.trim().is_empty() {
        return Err(AuthError::invalid_name("name is empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("user@example.com" => true; "plain address")]
    #[test_case("a.b@sub.example.co" => true; "dotted local part")]
    #[test_case("" => false; "empty")]
    #[test_case("no-at-sign.com" => false; "missing at")]
    #[test_case("@example.com" => false; "missing local part")]
    #[test_case("user@" => false; "missing domain")]
    #[test_case("user@nodot" => false; "domain without dot")]
    #[test_case("user name@example.com" => false; "whitespace")]
    fn test_validate_email(input: &str) -> bool {
        validate_email(input).is_ok()
    }

    #[test_case("123456" => true; "exactly minimum")]
    #[test_case("longenoughpassword" => true; "long")]
    #[test_case("12345" => false; "one short")]
    #[test_case("" => false; "empty")]
    fn test_validate_password(input: &str) -> bool {
        validate_password(&Password::new(input)).is_ok()
    }

    #[test]
    fn test_validate_name_rejects_blank() {
        assert!(validate_name("seonghun").is_ok());
        assert!(validate_name("   ").is_err());
    }
}
