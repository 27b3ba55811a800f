/**
 * PostgreSQL Store
 *
 * This module implements the `Store` trait over a sqlx `PgPool`.
 *
 * # Constraints
 *
 * The schema (see `migrations/`) carries the invariants the application
 * relies on:
 * - `users_username_key` makes username registration race-safe
 * - `posts.user_id` references `users(id)` with `ON DELETE CASCADE`
 *
 * Constraint failures are mapped onto `StoreError::UniqueViolation` and
 * `StoreError::MissingReference` so callers never inspect SQLSTATE codes.
 */

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::{NewPost, NewUser, Store, StoreError, StoreResult};
use crate::shared::{Post, PostId, PostOwner, User, UserId};

const MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    password_hash: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            password_hash: row.password_hash,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PostRow {
    id: i64,
    title: String,
    content: String,
    owner_id: i64,
    owner_username: String,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            content: row.content,
            owner: PostOwner {
                id: row.owner_id,
                username: row.owner_username,
            },
        }
    }
}

/// Map constraint failures onto their store-level meaning
fn map_write_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return StoreError::UniqueViolation(db_err.message().to_string());
        }
        if db_err.is_foreign_key_violation() {
            return StoreError::MissingReference(db_err.message().to_string());
        }
    }
    StoreError::Database(err)
}

/// `Store` backed by PostgreSQL
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wrap an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to `database_url`
    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Apply pending migrations from `migrations/`
    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::migrate!().run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl Store for PgStore {
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn find_user(&self, id: UserId) -> StoreResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn insert_user(&self, user: NewUser) -> StoreResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            RETURNING id, username, password_hash
            "#,
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(row.into())
    }

    async fn delete_user(&self, id: UserId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_posts(&self) -> StoreResult<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT p.id, p.title, p.content, u.id AS owner_id, u.username AS owner_username
            FROM posts p
            JOIN users u ON u.id = p.user_id
            ORDER BY p.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn find_post(&self, id: PostId) -> StoreResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT p.id, p.title, p.content, u.id AS owner_id, u.username AS owner_username
            FROM posts p
            JOIN users u ON u.id = p.user_id
            WHERE p.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Post::from))
    }

    async fn insert_post(&self, post: NewPost) -> StoreResult<Post> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            WITH inserted AS (
                INSERT INTO posts (title, content, user_id)
                VALUES ($1, $2, $3)
                RETURNING id, title, content, user_id
            )
            SELECT i.id, i.title, i.content, u.id AS owner_id, u.username AS owner_username
            FROM inserted i
            JOIN users u ON u.id = i.user_id
            "#,
        )
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(row.into())
    }

    async fn update_post(&self, post: &Post) -> StoreResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            WITH updated AS (
                UPDATE posts
                SET title = $1, content = $2
                WHERE id = $3
                RETURNING id, title, content, user_id
            )
            SELECT d.id, d.title, d.content, u.id AS owner_id, u.username AS owner_username
            FROM updated d
            JOIN users u ON u.id = d.user_id
            "#,
        )
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(row.map(Post::from))
    }

    async fn delete_post(&self, id: PostId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
