/**
 * Auth Controller
 *
 * Orchestrates login (verify credentials, issue token) and registration
 * (hash, persist). Handlers call into this after the validation stage has
 * accepted the payload.
 *
 * # Security
 *
 * - Unknown username and wrong password produce the same
 *   `AuthError::InvalidCredentials`, and both pay for one bcrypt check
 * - Registration returns the public projection only, never the hash
 * - Username uniqueness is re-checked by the store at write time, so a
 *   registration that raced past validation still ends in `UsernameTaken`
 */

use std::sync::Arc;

use super::error::{AuthError, RegError};
use super::password::PasswordService;
use super::sessions::TokenService;
use crate::backend::store::{NewUser, Store};
use crate::shared::PublicUser;

/// Login and registration orchestration
#[derive(Clone)]
pub struct AuthController {
    store: Arc<dyn Store>,
    passwords: PasswordService,
    tokens: Arc<TokenService>,
}

impl AuthController {
    pub fn new(store: Arc<dyn Store>, passwords: PasswordService, tokens: Arc<TokenService>) -> Self {
        Self {
            store,
            passwords,
            tokens,
        }
    }

    /// Verify credentials and issue a token
    ///
    /// # Errors
    ///
    /// * `AuthError::InvalidCredentials` - unknown username or wrong password
    /// * `AuthError::Store` / `AuthError::Signing` - internal failures
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let Some(user) = self.store.find_user_by_username(username).await? else {
            self.passwords.verify_decoy(password);
            tracing::warn!("Login failed for unknown username");
            return Err(AuthError::InvalidCredentials);
        };

        if !self.passwords.verify(password, &user.password_hash) {
            tracing::warn!("Login failed for user id {}", user.id);
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(user.id, &user.username)?;
        tracing::info!("User logged in: {} ({})", user.username, user.id);
        Ok(token)
    }

    /// Hash the password and persist a new user
    ///
    /// # Errors
    ///
    /// * `RegError::UsernameTaken` - the username exists (checked up front
    ///   and again by the store's unique constraint)
    /// * `RegError::Hashing` / `RegError::Store` - internal failures
    pub async fn register(&self, username: &str, password: &str) -> Result<PublicUser, RegError> {
        if self.store.find_user_by_username(username).await?.is_some() {
            tracing::warn!("Username already exists: {}", username);
            return Err(RegError::UsernameTaken);
        }

        let password_hash = self.passwords.hash(password)?;
        let user = self
            .store
            .insert_user(NewUser {
                username: username.to_string(),
                password_hash,
            })
            .await
            .map_err(|e| {
                let err = RegError::from(e);
                if matches!(err, RegError::UsernameTaken) {
                    tracing::warn!("Username taken at write time: {}", username);
                }
                err
            })?;

        tracing::info!("User registered: {} ({})", user.username, user.id);
        Ok(user.public())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::store::{MemoryStore, NewPost, StoreResult};
    use crate::shared::{Post, PostId, User, UserId};
    use assert_matches::assert_matches;

    fn controller() -> AuthController {
        AuthController::new(
            Arc::new(MemoryStore::new()),
            PasswordService::new(4).unwrap(),
            Arc::new(TokenService::new(b"test-secret")),
        )
    }

    #[tokio::test]
    async fn test_register_returns_public_user() {
        let auth = controller();
        let user = auth.register("alice", "secret1").await.unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(user.id, 1);
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let auth = controller();
        auth.register("alice", "secret1").await.unwrap();
        let result = auth.register("alice", "other12").await;
        assert_matches!(result, Err(RegError::UsernameTaken));
    }

    #[tokio::test]
    async fn test_concurrent_registrations_one_wins() {
        let auth = controller();
        let (first, second) = tokio::join!(
            auth.register("alice", "secret1"),
            auth.register("alice", "secret2"),
        );

        let outcomes = [first, second];
        assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(outcomes
            .iter()
            .any(|r| matches!(r, Err(RegError::UsernameTaken))));
    }

    /// Store whose username lookup always misses, as if a concurrent
    /// registration had not committed yet when the pre-check ran.
    struct StaleLookupStore(MemoryStore);

    #[async_trait::async_trait]
    impl Store for StaleLookupStore {
        async fn find_user_by_username(&self, _username: &str) -> StoreResult<Option<User>> {
            Ok(None)
        }

        async fn find_user(&self, id: UserId) -> StoreResult<Option<User>> {
            self.0.find_user(id).await
        }

        async fn insert_user(&self, user: NewUser) -> StoreResult<User> {
            self.0.insert_user(user).await
        }

        async fn delete_user(&self, id: UserId) -> StoreResult<bool> {
            self.0.delete_user(id).await
        }

        async fn list_posts(&self) -> StoreResult<Vec<Post>> {
            self.0.list_posts().await
        }

        async fn find_post(&self, id: PostId) -> StoreResult<Option<Post>> {
            self.0.find_post(id).await
        }

        async fn insert_post(&self, post: NewPost) -> StoreResult<Post> {
            self.0.insert_post(post).await
        }

        async fn update_post(&self, post: &Post) -> StoreResult<Option<Post>> {
            self.0.update_post(post).await
        }

        async fn delete_post(&self, id: PostId) -> StoreResult<bool> {
            self.0.delete_post(id).await
        }
    }

    #[tokio::test]
    async fn test_username_taken_surfaces_at_write_time() {
        let auth = AuthController::new(
            Arc::new(StaleLookupStore(MemoryStore::new())),
            PasswordService::new(4).unwrap(),
            Arc::new(TokenService::new(b"test-secret")),
        );
        auth.register("alice", "secret1").await.unwrap();
        assert_matches!(
            auth.register("alice", "secret2").await,
            Err(RegError::UsernameTaken)
        );
    }

    #[tokio::test]
    async fn test_login_success_issues_verifiable_token() {
        let tokens = Arc::new(TokenService::new(b"test-secret"));
        let auth = AuthController::new(
            Arc::new(MemoryStore::new()),
            PasswordService::new(4).unwrap(),
            tokens.clone(),
        );
        let user = auth.register("alice", "secret1").await.unwrap();

        let token = auth.login("alice", "secret1").await.unwrap();
        let caller = tokens.verify(&token).unwrap();
        assert_eq!(caller.user_id, user.id);
        assert_eq!(caller.username, "alice");
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let auth = controller();
        auth.register("alice", "secret1").await.unwrap();
        assert_matches!(
            auth.login("alice", "wrong").await,
            Err(AuthError::InvalidCredentials)
        );
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let auth = controller();
        assert_matches!(
            auth.login("nobody", "secret1").await,
            Err(AuthError::InvalidCredentials)
        );
    }

    #[tokio::test]
    async fn test_login_username_is_case_sensitive() {
        let auth = controller();
        auth.register("alice", "secret1").await.unwrap();
        assert_matches!(
            auth.login("Alice", "secret1").await,
            Err(AuthError::InvalidCredentials)
        );
    }
}
