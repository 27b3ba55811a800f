//! Posts Module
//!
//! Blog post endpoints and the ownership authorization stage that guards
//! their mutations.
//!
//! # Module Structure
//!
//! ```text
//! posts/
//! ├── mod.rs        - Module exports and documentation
//! ├── ownership.rs  - Ownership authorization stage
//! ├── handlers.rs   - HTTP handlers for /posts
//! └── types.rs      - Request types
//! ```

/// Ownership authorization stage
pub mod ownership;

/// HTTP handlers for post endpoints
pub mod handlers;

/// Request types
pub mod types;

pub use handlers::{create_post, delete_post, get_post, list_posts, update_post};
pub use ownership::OwnershipStage;
