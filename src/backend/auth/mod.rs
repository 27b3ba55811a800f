//! Authentication Module
//!
//! This module handles credential verification, token issuance and
//! registration, plus the HTTP handlers for the `/auth` endpoints.
//!
//! # Architecture
//!
//! - **`password`** - bcrypt hashing and verification
//! - **`sessions`** - signed, one-hour bearer tokens
//! - **`controller`** - login and registration orchestration
//! - **`error`** - `AuthError` and `RegError`
//! - **`handlers`** - HTTP handlers for authentication endpoints
//!
//! # Authentication Flow
//!
//! 1. **Register**: username and password validated -> password hashed ->
//!    user stored -> `{id, username}` returned
//! 2. **Login**: user looked up -> password verified -> token returned
//! 3. **Authenticated request**: `Authorization: Bearer <token>` verified by
//!    the authentication stage -> caller identity attached to the request
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Tokens are stateless and expire one hour after issuance
//! - Invalid credentials return 401 without saying which part was wrong

/// Password hashing and verification
pub mod password;

/// Bearer token issuance and verification
pub mod sessions;

/// Login and registration orchestration
pub mod controller;

/// Authentication error types
pub mod error;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use controller::AuthController;
pub use error::{AuthError, RegError};
pub use handlers::{login, register};
pub use password::PasswordService;
pub use sessions::TokenService;
