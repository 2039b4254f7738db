//! Wire DTOs for the remote auth service.

use serde::{Deserialize, Serialize};

/// Credentials payload for sign-up and sign-in.
#[derive(Debug, Serialize)]
pub struct CredentialsRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Successful auth response.
#[derive(Debug, Deserialize)]
pub struct AccountResponse {
    /// Server-assigned account identifier.
    #[serde(alias = "localId")]
    pub uid: String,
    pub email: String,
}

/// Error body returned by the auth service.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}
