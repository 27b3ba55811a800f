//! Shared Module
//!
//! This module contains the records and error types that cross the HTTP
//! boundary. Handlers serialize them into responses, the store produces
//! them, and the request pipeline carries them between stages.

/// User, post and identity records
pub mod models;

/// Shared error types
pub mod error;

/// Re-export commonly used types for convenience
pub use models::{CallerIdentity, Post, PostId, PostOwner, PublicUser, User, UserId};
pub use error::{FieldLocation, FieldViolation};
