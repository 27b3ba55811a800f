//! Quill - Blog Backend Library
//!
//! Quill is a small blog backend built on Axum. Users register and log in,
//! receive a short-lived bearer token, and use it to create, edit and delete
//! their own posts. Listing and reading posts is public.
//!
//! # Module Structure
//!
//! - **`shared`** - Records and error types that cross the HTTP boundary
//!   - Users, posts, caller identity
//!   - Field-level validation violations
//!
//! - **`backend`** - Server-side code
//!   - Credential store (PostgreSQL or in-memory)
//!   - Password hashing and token signing
//!   - The per-request pipeline: validation, authentication, ownership
//!   - Handlers, routing and server bootstrap
//!
//! # Request Pipeline
//!
//! Every mutating request runs through a fixed sequence of stages before a
//! handler is allowed to write anything:
//!
//! ```text
//! Received -> Validated -> Authenticated -> Authorized -> Executed
//!    |            |              |               |
//!    +-> 400      +-> 401        +-> 403 / 404   +-> write
//! ```
//!
//! Read-only routes skip authentication entirely.
//!
//! # Usage
//!
//! ```rust,no_run
//! use quill::backend::server::{config::ServerConfig, init::create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(&config).await?;
//! # Ok(())
//! # }
//! ```

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
