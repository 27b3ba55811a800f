/**
 * Application State Management
 *
 * This module defines the application state structure and implements the
 * `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` is built once at startup and cloned into every request:
 * - the credential store, behind `Arc<dyn Store>`
 * - the auth controller (password and token services)
 * - the per-route pipelines
 *
 * Nothing in it is mutable after construction; the store synchronizes its
 * own writes.
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::auth::{AuthController, PasswordService, TokenService};
use crate::backend::pipeline::{PipelineCatalog, PipelineError};
use crate::backend::store::Store;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Credential store
    pub store: Arc<dyn Store>,
    /// Login and registration
    pub auth: AuthController,
    /// Validation, authentication and ownership stages per route
    pub pipelines: Arc<PipelineCatalog>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn Store>,
        passwords: PasswordService,
        tokens: Arc<TokenService>,
    ) -> Result<Self, PipelineError> {
        let pipelines = PipelineCatalog::new(store.clone(), tokens.clone())?;
        Ok(Self {
            auth: AuthController::new(store.clone(), passwords, tokens),
            store,
            pipelines: Arc::new(pipelines),
        })
    }
}

/// Lets read-only handlers extract `State<Arc<dyn Store>>` directly
impl FromRef<AppState> for Arc<dyn Store> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.store.clone()
    }
}
