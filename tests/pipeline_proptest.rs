//! Property-based tests for tokens, credentials and ownership
//!
//! Uses proptest to check the authentication and authorization rules
//! over generated inputs.

mod common;

use axum::http::{header::AUTHORIZATION, StatusCode};
use proptest::prelude::*;
use serde_json::{json, Value};

use common::{bearer, TestApp};
use quill::backend::auth::sessions::TOKEN_LIFETIME_SECS;
use quill::backend::auth::{AuthError, TokenService};

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("Failed to build runtime")
        .block_on(future)
}

fn signature_chars() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_-]{43}"
}

proptest! {
    #[test]
    fn prop_token_valid_strictly_before_expiry(
        issued in 0i64..4_000_000_000,
        offset in 0i64..TOKEN_LIFETIME_SECS,
        user_id in 1i64..1_000_000,
    ) {
        let tokens = TokenService::new(b"prop-secret");
        let token = tokens.issue_at(user_id, "user", issued).unwrap();

        let caller = tokens.verify_at(&token, issued + offset).unwrap();
        prop_assert_eq!(caller.user_id, user_id);
    }

    #[test]
    fn prop_token_rejected_from_expiry_on(
        issued in 0i64..4_000_000_000,
        late in 0i64..10_000_000,
    ) {
        let tokens = TokenService::new(b"prop-secret");
        let token = tokens.issue_at(1, "user", issued).unwrap();

        let result = tokens.verify_at(&token, issued + TOKEN_LIFETIME_SECS + late);
        prop_assert!(matches!(result, Err(AuthError::Expired)));
    }

    #[test]
    fn prop_tampered_signature_rejected(signature in signature_chars()) {
        let tokens = TokenService::new(b"prop-secret");
        let token = tokens.issue(7, "alice").unwrap();
        let (unsigned, original) = token.rsplit_once('.').unwrap();
        prop_assume!(signature != original);

        let forged = format!("{unsigned}.{signature}");
        prop_assert!(matches!(tokens.verify(&forged), Err(AuthError::Invalid)));
    }

    #[test]
    fn prop_other_key_rejected(secret in "[a-z]{8,32}") {
        prop_assume!(secret != "prop-secret");
        let theirs = TokenService::new(secret.as_bytes()).issue(7, "alice").unwrap();
        let ours = TokenService::new(b"prop-secret");

        prop_assert!(matches!(ours.verify(&theirs), Err(AuthError::Invalid)));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_taken_username_conflicts_for_any_password(password in ".{0,20}") {
        block_on(async {
            let app = TestApp::new();
            app.seed_user("alice").await;

            let response = app.register("alice", &password).await;
            assert_eq!(response.status_code(), StatusCode::CONFLICT);
        });
    }

    #[test]
    fn prop_login_failures_are_indistinguishable(
        username in "[a-z]{3,12}",
        password in "[a-zA-Z0-9]{6,16}",
    ) {
        block_on(async {
            let app = TestApp::new();
            let registered = app.register("alice", "secret1").await;
            assert_eq!(registered.status_code(), StatusCode::CREATED);

            let unknown = app.login(&format!("x{username}"), &password).await;
            let wrong = app.login("alice", &format!("{password}!")).await;

            assert_eq!(unknown.status_code(), StatusCode::UNAUTHORIZED);
            assert_eq!(wrong.status_code(), StatusCode::UNAUTHORIZED);
            assert_eq!(unknown.json::<Value>(), wrong.json::<Value>());
        });
    }

    #[test]
    fn prop_non_owner_is_forbidden_even_with_valid_body(
        title in "[a-zA-Z ]{0,10}[a-zA-Z]",
        content in "[a-zA-Z ]{0,20}[a-zA-Z]",
        delete in any::<bool>(),
    ) {
        block_on(async {
            let app = TestApp::new();
            let alice = app.seed_user("alice").await;
            let bob = app.seed_user("bob").await;
            let id = app.create_post_id(&app.token_for(&alice)).await;

            let path = format!("/posts/{id}");
            let request = if delete {
                app.server.delete(&path)
            } else {
                app.server.put(&path).json(&json!({ "title": title, "content": content }))
            };
            let response = request
                .add_header(AUTHORIZATION, bearer(&app.token_for(&bob)))
                .await;

            assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
        });
    }

    #[test]
    fn prop_missing_post_is_not_found_for_any_caller(
        missing in 2i64..1_000_000,
        as_owner in any::<bool>(),
        delete in any::<bool>(),
    ) {
        block_on(async {
            let app = TestApp::new();
            let alice = app.seed_user("alice").await;
            let bob = app.seed_user("bob").await;
            app.create_post_id(&app.token_for(&alice)).await;

            let caller = if as_owner { &alice } else { &bob };
            let path = format!("/posts/{missing}");
            let request = if delete {
                app.server.delete(&path)
            } else {
                app.server.put(&path).json(&json!({ "title": "x" }))
            };
            let response = request
                .add_header(AUTHORIZATION, bearer(&app.token_for(caller)))
                .await;

            assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        });
    }
}
