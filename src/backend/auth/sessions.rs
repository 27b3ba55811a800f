/**
 * Session Tokens
 *
 * This module issues and verifies the signed bearer tokens that carry a
 * caller's identity between requests.
 *
 * # Token Format
 *
 * HS256 JWT with claims `{userId, username, iat, exp}`, where
 * `exp = iat + 1 hour`. The secret is loaded once at startup and is
 * read-only afterwards.
 *
 * # Expiry
 *
 * A token is valid while `now < exp` and rejected from the expiry instant
 * on. There is no leeway and no revocation list: expiry is the only way a
 * token stops working.
 */

use std::fmt;

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::error::AuthError;
use crate::shared::{CallerIdentity, UserId};

/// Token lifetime in seconds
pub const TOKEN_LIFETIME_SECS: i64 = 60 * 60;

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject user ID
    #[serde(rename = "userId")]
    pub user_id: UserId,
    /// Subject username
    pub username: String,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Issues and verifies bearer tokens with a process-wide secret
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl TokenService {
    /// Create a service signing with `secret`
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked by `verify_at` so that `now == exp` is rejected.
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Issue a token for a subject, valid for one hour from now
    pub fn issue(&self, user_id: UserId, username: &str) -> Result<String, AuthError> {
        self.issue_at(user_id, username, Utc::now().timestamp())
    }

    /// Issue a token as if the current time were `now` (Unix seconds)
    pub fn issue_at(&self, user_id: UserId, username: &str, now: i64) -> Result<String, AuthError> {
        let claims = Claims {
            user_id,
            username: username.to_string(),
            iat: now,
            exp: now + TOKEN_LIFETIME_SECS,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(AuthError::Signing)
    }

    /// Verify a token against the current time
    pub fn verify(&self, token: &str) -> Result<CallerIdentity, AuthError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verify a token as if the current time were `now` (Unix seconds)
    ///
    /// # Errors
    ///
    /// * `AuthError::Invalid` - bad signature, wrong key or malformed payload
    /// * `AuthError::Expired` - `now >= exp`
    pub fn verify_at(&self, token: &str, now: i64) -> Result<CallerIdentity, AuthError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!("Token rejected: {:?}", e.kind());
                AuthError::Invalid
            })?
            .claims;

        if now >= claims.exp {
            return Err(AuthError::Expired);
        }

        Ok(CallerIdentity {
            user_id: claims.user_id,
            username: claims.username,
        })
    }
}
