//! Backend Module
//!
//! This module contains all server-side code for the Quill blog backend:
//! an Axum HTTP server with bearer-token authentication and per-post
//! ownership enforcement.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Configuration, application state, app construction
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`store`** - Credential store trait with PostgreSQL and in-memory backends
//! - **`auth`** - Password hashing, tokens, login and registration
//! - **`pipeline`** - Request context and ordered stage executor
//! - **`validation`** - Input validation stage and per-route rules
//! - **`middleware`** - Authentication stage
//! - **`posts`** - Ownership authorization stage and post handlers
//! - **`error`** - Backend error taxonomy
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── store/          - Persistence
//! ├── auth/           - Authentication
//! ├── pipeline/       - Stage executor
//! ├── validation/     - Input validation
//! ├── middleware/     - Authentication stage
//! ├── posts/          - Post endpoints and ownership
//! └── error/          - Error types
//! ```
//!
//! # Request Flow
//!
//! Mutating requests pass Validation -> Authentication -> Ownership before
//! the handler writes anything. Reads of posts are public and skip the
//! pipeline. Every failure becomes a JSON [`BackendError`] response.
//!
//! # Thread Safety
//!
//! Handlers share only `AppState`, which is immutable after startup. The
//! store synchronizes its own writes: a connection pool for PostgreSQL, a
//! tokio `RwLock` for the in-memory backend.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Credential store
pub mod store;

/// Authentication and user management
pub mod auth;

/// Request pipeline
pub mod pipeline;

/// Input validation stage
pub mod validation;

/// Middleware for request processing
pub mod middleware;

/// Blog posts
pub mod posts;

/// Backend error types
pub mod error;

/// Re-export commonly used types
pub use error::BackendError;
pub use server::create_app;
