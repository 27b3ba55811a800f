//! In-memory store backend
//!
//! Thread-safe via a tokio `RwLock`; every write happens under the write
//! lock, so the username check-and-insert is atomic here just as the unique
//! index makes it atomic in PostgreSQL. Not persistent: data is lost on drop.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{NewPost, NewUser, Store, StoreError, StoreResult};
use crate::shared::{Post, PostId, PostOwner, User, UserId};

#[derive(Debug, Clone)]
struct PostRow {
    id: PostId,
    title: String,
    content: String,
    owner_id: UserId,
}

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    posts: BTreeMap<PostId, PostRow>,
    last_user_id: UserId,
    last_post_id: PostId,
}

impl Tables {
    fn hydrate(&self, row: &PostRow) -> Option<Post> {
        let owner = self.users.get(&row.owner_id)?;
        Some(Post {
            id: row.id,
            title: row.title.clone(),
            content: row.content.clone(),
            owner: PostOwner {
                id: owner.id,
                username: owner.username.clone(),
            },
        })
    }
}

/// In-memory users and posts
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }

    /// Number of stored posts
    pub async fn post_count(&self) -> usize {
        self.tables.read().await.posts.len()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn find_user(&self, id: UserId) -> StoreResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn insert_user(&self, user: NewUser) -> StoreResult<User> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.username == user.username) {
            return Err(StoreError::UniqueViolation(format!(
                "username '{}' already exists",
                user.username
            )));
        }

        tables.last_user_id += 1;
        let stored = User {
            id: tables.last_user_id,
            username: user.username,
            password_hash: user.password_hash,
        };
        tables.users.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn delete_user(&self, id: UserId) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.users.remove(&id).is_none() {
            return Ok(false);
        }
        tables.posts.retain(|_, post| post.owner_id != id);
        Ok(true)
    }

    async fn list_posts(&self) -> StoreResult<Vec<Post>> {
        let tables = self.tables.read().await;
        Ok(tables
            .posts
            .values()
            .rev()
            .filter_map(|row| tables.hydrate(row))
            .collect())
    }

    async fn find_post(&self, id: PostId) -> StoreResult<Option<Post>> {
        let tables = self.tables.read().await;
        Ok(tables.posts.get(&id).and_then(|row| tables.hydrate(row)))
    }

    async fn insert_post(&self, post: NewPost) -> StoreResult<Post> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&post.owner_id) {
            return Err(StoreError::MissingReference(format!(
                "user {} does not exist",
                post.owner_id
            )));
        }

        tables.last_post_id += 1;
        let row = PostRow {
            id: tables.last_post_id,
            title: post.title,
            content: post.content,
            owner_id: post.owner_id,
        };
        tables.posts.insert(row.id, row.clone());
        tables
            .hydrate(&row)
            .ok_or_else(|| StoreError::MissingReference(format!("user {}", row.owner_id)))
    }

    async fn update_post(&self, post: &Post) -> StoreResult<Option<Post>> {
        let mut tables = self.tables.write().await;
        let Some(row) = tables.posts.get_mut(&post.id) else {
            return Ok(None);
        };
        row.title = post.title.clone();
        row.content = post.content.clone();
        let row = row.clone();
        Ok(tables.hydrate(&row))
    }

    async fn delete_post(&self, id: PostId) -> StoreResult<bool> {
        Ok(self.tables.write().await.posts.remove(&id).is_some())
    }
}
