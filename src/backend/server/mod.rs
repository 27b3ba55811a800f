//! Server Module
//!
//! This module contains the code that configures and assembles the Axum
//! application.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Environment configuration and store loading
//! └── init.rs         - Application construction
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: `ServerConfig::from_env` (fatal without `JWT_SECRET`)
//! 2. **Store**: PostgreSQL with migrations, or in-memory when no database is set
//! 3. **Services**: password hashing and token signing
//! 4. **Pipelines**: validation, authentication and ownership per route
//! 5. **Router Creation**: routes, fallback, tracing and CORS layers
//!
//! # Example
//!
//! ```rust,no_run
//! use quill::backend::server::{config::ServerConfig, create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(&config).await?;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use config::{ConfigError, ServerConfig};
pub use init::{build_state, create_app, InitError};
pub use state::AppState;
