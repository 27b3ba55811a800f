//! Backend Error Module
//!
//! This module defines the HTTP-facing error taxonomy and its conversion
//! into JSON responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - BackendError and conversions from service errors
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! # Propagation
//!
//! Each pipeline stage resolves its own error class and stops the request.
//! Nothing is retried, and no stage swallows another stage's error. Stack
//! traces and internal details are logged, never returned.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::BackendError;
