/**
 * Authentication Handler Types
 *
 * This module defines the request and response types used by the
 * register and login handlers.
 */

use serde::{Deserialize, Serialize};

/// Credentials submitted to register or login
#[derive(Deserialize, Serialize)]
pub struct CredentialsRequest {
    /// Username, already trimmed by validation
    pub username: String,
    /// Password exactly as submitted
    pub password: String,
}

impl std::fmt::Debug for CredentialsRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Login response
#[derive(Serialize, Deserialize, Debug)]
pub struct TokenResponse {
    /// Bearer token, valid for one hour
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_password() {
        let request = CredentialsRequest {
            username: "alice".to_string(),
            password: "secret1".to_string(),
        };
        let debug = format!("{request:?}");
        assert!(debug.contains("alice"));
        assert!(!debug.contains("secret1"));
    }
}
