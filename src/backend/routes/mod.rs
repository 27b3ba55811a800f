//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation, fallback and layers
//! └── api_routes.rs   - Authentication and post endpoints
//! ```
//!
//! # Routes
//!
//! - `GET /health` - Liveness check
//! - `POST /auth/register` - User registration
//! - `POST /auth/login` - User login
//! - `GET /posts`, `GET /posts/{id}` - Public reads
//! - `POST /posts`, `PUT /posts/{id}`, `DELETE /posts/{id}` - Authenticated writes

/// Main router creation
pub mod router;

/// API endpoint handlers
pub mod api_routes;

// Re-export commonly used functions
pub use router::create_router;
