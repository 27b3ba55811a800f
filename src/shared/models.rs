//! User, post and identity records.
//!
//! `User` is the only type here that carries a password hash, and it is
//! deliberately not `Serialize`. Anything that leaves the process goes
//! through [`PublicUser`] or [`PostOwner`] instead.

use serde::{Deserialize, Serialize};

/// Store-assigned user identifier
pub type UserId = i64;

/// Store-assigned post identifier
pub type PostId = i64;

/// A registered user as persisted by the credential store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Unique, immutable identifier
    pub id: UserId,
    /// Unique, case-sensitive username
    pub username: String,
    /// Opaque bcrypt hash, never exposed outward
    pub password_hash: String,
}

impl User {
    /// Public projection of this user (no password hash)
    pub fn public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            username: self.username.clone(),
        }
    }
}

/// Public projection of a user, returned by registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: UserId,
    pub username: String,
}

/// Owner of a post as projected into responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostOwner {
    pub id: UserId,
    pub username: String,
}

/// A blog post together with its owner
///
/// The owner is fixed at creation. Updates only ever touch `title` and
/// `content`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub owner: PostOwner,
}

impl Post {
    /// Whether `caller` owns this post
    pub fn is_owned_by(&self, caller: &CallerIdentity) -> bool {
        self.owner.id == caller.user_id
    }
}

/// Identity of an authenticated caller, derived from a verified token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    pub user_id: UserId,
    pub username: String,
}
