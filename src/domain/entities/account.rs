//! Account entity for the remote auth boundary.

use serde::{Deserialize, Serialize};

/// An authenticated account returned by the remote auth service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Server-assigned unique identifier.
    pub uid: String,
    /// Email address the account was registered with.
    pub email: String,
}

impl Account {
    /// Creates a new account.
    #[must_use]
    pub fn new(uid: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: email.into(),
        }
    }
}

/// Profile document written to the remote database after sign-up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Server-assigned unique identifier.
    pub uid: String,
    /// Free-form profile description, empty for new accounts.
    pub description: String,
    /// Display name chosen at sign-up.
    #[serde(rename = "nickName")]
    pub nickname: String,
    /// Email address.
    pub email: String,
    /// Artwork references owned by this user, keyed by artwork id.
    pub artworks: std::collections::HashMap<String, serde_json::Value>,
}

impl UserProfile {
    /// Creates a fresh profile for a newly registered account.
    #[must_use]
    pub fn new_account(account: &Account, nickname: impl Into<String>) -> Self {
        Self {
            uid: account.uid.clone(),
            description: String::new(),
            nickname: nickname.into(),
            email: account.email.clone(),
            artworks: std::collections::HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account_profile_is_empty() {
        let account = Account::new("uid-1", "a@b.c");
        let profile = UserProfile::new_account(&account, "tester");

        assert_eq!(profile.uid, "uid-1");
        assert_eq!(profile.email, "a@b.c");
        assert_eq!(profile.nickname, "tester");
        assert!(profile.description.is_empty());
        assert!(profile.artworks.is_empty());
    }
}
