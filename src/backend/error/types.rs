/**
 * Backend Error Types
 *
 * `BackendError` is the HTTP-facing error taxonomy. Each pipeline stage and
 * handler resolves its own failure into one of these variants and the
 * request stops there.
 *
 * # Status Code Mapping
 *
 * | Variant | Status | Code |
 * |---|---|---|
 * | `Validation` | 400 | `validation_failed` |
 * | `InvalidCredentials` | 401 | `invalid_credentials` |
 * | `AuthMissingOrMalformed` | 401 | `auth_missing_or_malformed` |
 * | `AuthInvalidOrExpired` | 401 | `auth_invalid_or_expired` |
 * | `Forbidden` | 403 | `forbidden` |
 * | `NotFound` | 404 | `not_found` |
 * | `Conflict` | 409 | `conflict` |
 * | `Internal` | 500 | `internal_error` |
 *
 * Internal errors keep their detail for the server log only; the client
 * sees a generic message.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::auth::{AuthError, RegError};
use crate::backend::store::StoreError;
use crate::shared::FieldViolation;

/// Backend-specific error types
#[derive(Debug, Error)]
pub enum BackendError {
    /// One or more validation rules failed
    #[error("validation failed: {} violation(s)", .0.len())]
    Validation(Vec<FieldViolation>),

    /// Login rejected; deliberately says nothing about which part was wrong
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No bearer credential, or not in `Bearer <token>` form
    #[error("authorization header missing or malformed")]
    AuthMissingOrMalformed,

    /// Bearer token failed verification
    #[error("invalid or expired token")]
    AuthInvalidOrExpired,

    /// Authenticated, but not the owner of the resource
    #[error("forbidden: {message}")]
    Forbidden {
        /// Human-readable error message
        message: String,
    },

    /// Resource does not exist
    #[error("not found: {message}")]
    NotFound {
        /// Human-readable error message
        message: String,
    },

    /// Write conflicts with existing state
    #[error("conflict: {message}")]
    Conflict {
        /// Human-readable error message
        message: String,
    },

    /// Unexpected store or crypto fault
    #[error("internal error: {detail}")]
    Internal {
        /// Detail for the server log, never sent to the client
        detail: String,
    },
}

impl BackendError {
    /// Create a forbidden error
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    /// Create a not-found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Create an internal error; `detail` is only ever logged
    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials
            | Self::AuthMissingOrMalformed
            | Self::AuthInvalidOrExpired => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-stable error identifier
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_failed",
            Self::InvalidCredentials => "invalid_credentials",
            Self::AuthMissingOrMalformed => "auth_missing_or_malformed",
            Self::AuthInvalidOrExpired => "auth_invalid_or_expired",
            Self::Forbidden { .. } => "forbidden",
            Self::NotFound { .. } => "not_found",
            Self::Conflict { .. } => "conflict",
            Self::Internal { .. } => "internal_error",
        }
    }

    /// Client-facing message
    pub fn message(&self) -> String {
        match self {
            Self::Validation(_) => "Validation failed".to_string(),
            Self::InvalidCredentials => "Invalid credentials".to_string(),
            Self::AuthMissingOrMalformed => {
                "Authorization header missing or malformed".to_string()
            }
            Self::AuthInvalidOrExpired => "Invalid or expired token".to_string(),
            Self::Forbidden { message }
            | Self::NotFound { message }
            | Self::Conflict { message } => message.clone(),
            Self::Internal { .. } => "Internal server error".to_string(),
        }
    }
}

impl From<AuthError> for BackendError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => Self::InvalidCredentials,
            AuthError::MissingOrMalformed => Self::AuthMissingOrMalformed,
            AuthError::Expired | AuthError::Invalid => Self::AuthInvalidOrExpired,
            AuthError::Signing(e) => Self::internal(format!("token signing failed: {e}")),
            AuthError::Store(e) => e.into(),
        }
    }
}

impl From<RegError> for BackendError {
    fn from(err: RegError) -> Self {
        match err {
            RegError::UsernameTaken => Self::conflict("Username already exists"),
            RegError::Hashing(e) => Self::internal(e.to_string()),
            RegError::Store(e) => e.into(),
        }
    }
}

impl From<StoreError> for BackendError {
    fn from(err: StoreError) -> Self {
        Self::internal(err.to_string())
    }
}
