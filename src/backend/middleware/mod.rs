//! Middleware Module
//!
//! This module contains the request stages that run before handlers on
//! protected routes.
//!
//! # Architecture
//!
//! - **`auth`** - Authentication stage: bearer token -> caller identity
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use quill::backend::auth::TokenService;
//! use quill::backend::middleware::AuthenticateStage;
//!
//! let tokens = Arc::new(TokenService::new(b"secret"));
//! let stage = AuthenticateStage::new(tokens);
//! ```

pub mod auth;

pub use auth::{bearer_token, AuthenticateStage, BEARER_PREFIX};
