//! Authentication Handlers Module
//!
//! This module contains the HTTP handlers for authentication endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs       - Module exports and documentation
//! ├── types.rs     - Request and response types
//! ├── register.rs  - User registration handler
//! └── login.rs     - User authentication handler
//! ```
//!
//! # Handlers
//!
//! - **`register`** - POST /auth/register - User registration
//! - **`login`** - POST /auth/login - User authentication
//!
//! Both run their route's validation pipeline before calling into the
//! [`AuthController`](crate::backend::auth::AuthController).

/// Request and response types
pub mod types;

/// Register handler
pub mod register;

/// Login handler
pub mod login;

pub use types::{CredentialsRequest, TokenResponse};

pub use login::login;
pub use register::register;
