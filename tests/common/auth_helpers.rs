//! Test application and authentication helpers
//!
//! `TestApp` runs the full router in process over a fresh `MemoryStore`,
//! with a cheap bcrypt cost so tests stay fast.

use std::sync::Arc;

use axum::http::{header::AUTHORIZATION, HeaderValue, StatusCode};
use axum_test::{TestResponse, TestServer};
use serde_json::{json, Value};

use quill::backend::auth::TokenService;
use quill::backend::routes::create_router;
use quill::backend::server::{build_state, ServerConfig};
use quill::backend::store::{MemoryStore, NewUser, Store};
use quill::shared::User;

pub const TEST_SECRET: &str = "integration-test-secret";

/// Full application with direct access to its store and signing key
pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<MemoryStore>,
    pub tokens: TokenService,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let mut config = ServerConfig::new(TEST_SECRET);
        config.bcrypt_cost = 4;

        let state = build_state(store.clone(), &config).expect("Failed to build app state");
        let server = TestServer::new(create_router(state)).expect("Failed to start test server");

        Self {
            server,
            store,
            tokens: TokenService::new(TEST_SECRET.as_bytes()),
        }
    }

    pub async fn register(&self, username: &str, password: &str) -> TestResponse {
        self.server
            .post("/auth/register")
            .json(&json!({ "username": username, "password": password }))
            .await
    }

    pub async fn login(&self, username: &str, password: &str) -> TestResponse {
        self.server
            .post("/auth/login")
            .json(&json!({ "username": username, "password": password }))
            .await
    }

    /// Register a user and log in, returning the bearer token
    pub async fn signup(&self, username: &str, password: &str) -> String {
        let response = self.register(username, password).await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
        let response = self.login(username, password).await;
        assert_eq!(response.status_code(), StatusCode::OK);
        response.json::<Value>()["token"]
            .as_str()
            .expect("token missing")
            .to_string()
    }

    /// Insert a user straight into the store, skipping HTTP and bcrypt
    pub async fn seed_user(&self, username: &str) -> User {
        self.store
            .insert_user(NewUser {
                username: username.to_string(),
                password_hash: "not-a-real-hash".to_string(),
            })
            .await
            .expect("Failed to seed user")
    }

    /// A valid token for a user, signed with the app's secret
    pub fn token_for(&self, user: &User) -> String {
        self.tokens
            .issue(user.id, &user.username)
            .expect("Failed to issue token")
    }

    pub async fn create_post(&self, token: &str, title: &str, content: &str) -> TestResponse {
        self.server
            .post("/posts")
            .add_header(AUTHORIZATION, bearer(token))
            .json(&json!({ "title": title, "content": content }))
            .await
    }

    /// Create a post and return its id
    pub async fn create_post_id(&self, token: &str) -> i64 {
        let response = self.create_post(token, "Hi", "Body").await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
        response.json::<Value>()["id"].as_i64().expect("id missing")
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// `Authorization` header value for a token
pub fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {token}")).expect("Invalid header value")
}
