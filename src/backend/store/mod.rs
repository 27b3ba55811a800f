//! Credential Store
//!
//! The store persists users and posts and is the only component that knows
//! how they are kept. Everything above it talks to the [`Store`] trait, which
//! is constructed once at startup and threaded through `AppState`.
//!
//! # Backends
//!
//! - **`postgres`** - `PgStore`, sqlx over PostgreSQL (production)
//! - **`memory`** - `MemoryStore`, tokio `RwLock` over ordered maps (tests,
//!   and the fallback when no `DATABASE_URL` is configured)
//!
//! # Guarantees
//!
//! Both backends enforce the same constraints:
//!
//! - usernames are unique; a second insert fails with
//!   [`StoreError::UniqueViolation`] even if two registrations race past
//!   validation together
//! - a post must reference an existing user, otherwise
//!   [`StoreError::MissingReference`]
//! - deleting a user deletes all of their posts

use async_trait::async_trait;
use thiserror::Error;

use crate::shared::{Post, PostId, User, UserId};

/// In-memory backend
pub mod memory;

/// PostgreSQL backend
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Errors raised by a store backend
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique constraint rejected the write
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    /// A referenced row does not exist
    #[error("referenced row does not exist: {0}")]
    MissingReference(String),

    /// Any other database failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failed at startup
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Result alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Fields needed to insert a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}

/// Fields needed to insert a post
#[derive(Debug, Clone)]
pub struct NewPost {
    pub owner_id: UserId,
    pub title: String,
    pub content: String,
}

/// Persistence interface for users and posts
#[async_trait]
pub trait Store: Send + Sync {
    /// Find a user by exact (case-sensitive) username
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    /// Find a user by id
    async fn find_user(&self, id: UserId) -> StoreResult<Option<User>>;

    /// Insert a user
    ///
    /// Returns `StoreError::UniqueViolation` if the username is taken.
    async fn insert_user(&self, user: NewUser) -> StoreResult<User>;

    /// Delete a user and, by cascade, all of their posts
    ///
    /// Returns `false` if no such user existed.
    async fn delete_user(&self, id: UserId) -> StoreResult<bool>;

    /// All posts with their owners, newest first
    async fn list_posts(&self) -> StoreResult<Vec<Post>>;

    /// Find a post (with owner) by id
    async fn find_post(&self, id: PostId) -> StoreResult<Option<Post>>;

    /// Insert a post
    ///
    /// Returns `StoreError::MissingReference` if the owner does not exist.
    async fn insert_post(&self, post: NewPost) -> StoreResult<Post>;

    /// Persist the title and content of `post`
    ///
    /// The owner is never written. Returns `None` if the post no longer exists.
    async fn update_post(&self, post: &Post) -> StoreResult<Option<Post>>;

    /// Delete a post; returns `false` if it did not exist
    async fn delete_post(&self, id: PostId) -> StoreResult<bool>;
}
