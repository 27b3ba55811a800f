//! Authentication and registration errors.
//!
//! These stay free of HTTP concerns; `backend::error` maps them onto status
//! codes.

use thiserror::Error;

use super::password::PasswordError;
use crate::backend::store::StoreError;

/// Failures while authenticating a caller or verifying a token
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown username or wrong password; the two are never distinguished
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No `Authorization` header, or it does not use the `Bearer` scheme
    #[error("authorization header missing or malformed")]
    MissingOrMalformed,

    /// Token is past its expiry instant
    #[error("token expired")]
    Expired,

    /// Signature does not validate or payload is malformed
    #[error("token invalid")]
    Invalid,

    /// Token could not be signed
    #[error("token signing failed: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    /// Credential lookup failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failures while registering a user
#[derive(Debug, Error)]
pub enum RegError {
    /// A user with this username already exists
    #[error("username already taken")]
    UsernameTaken,

    /// Password could not be hashed
    #[error(transparent)]
    Hashing(#[from] PasswordError),

    /// Store write failed for a reason other than uniqueness
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for RegError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation(_) => Self::UsernameTaken,
            other => Self::Store(other),
        }
    }
}
