//! Shared Error Types
//!
//! A [`FieldViolation`] records one failed validation rule. The validation
//! stage collects every violation for a request before failing, so clients
//! see all problems in a single 400 response.
//!
//! # Usage
//!
//! ```rust
//! use quill::shared::error::FieldViolation;
//!
//! let violation = FieldViolation::body("title", "Title is required");
//! assert_eq!(violation.to_string(), "body.title: Title is required");
//! ```
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Where in the request a validated field lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldLocation {
    /// JSON request body
    Body,
    /// URL path parameter
    Params,
}

impl FieldLocation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Body => "body",
            Self::Params => "params",
        }
    }
}

impl fmt::Display for FieldLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single violated validation rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{location}.{field}: {message}")]
pub struct FieldViolation {
    /// The field that failed validation
    pub field: String,
    /// Where the field was read from
    pub location: FieldLocation,
    /// Human-readable rule message
    pub message: String,
}

impl FieldViolation {
    /// Create a violation for a body field
    pub fn body(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            location: FieldLocation::Body,
            message: message.into(),
        }
    }

    /// Create a violation for a path parameter
    pub fn params(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            location: FieldLocation::Params,
            message: message.into(),
        }
    }
}
