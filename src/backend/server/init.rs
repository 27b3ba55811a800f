/**
 * Server Initialization
 *
 * This module builds the application: it opens the store, constructs the
 * password and token services, assembles the request pipelines and hands
 * the resulting state to the router.
 *
 * # Initialization Process
 *
 * 1. Open the store named by the configuration (runs migrations)
 * 2. Compute the bcrypt decoy hash at the configured cost
 * 3. Load the signing secret into the token service
 * 4. Build the per-route pipelines
 * 5. Create the router
 *
 * Every step is fatal on failure.
 */

use std::sync::Arc;

use axum::Router;
use thiserror::Error;

use crate::backend::auth::{password::PasswordError, PasswordService, TokenService};
use crate::backend::pipeline::PipelineError;
use crate::backend::routes::create_router;
use crate::backend::server::config::{load_store, ServerConfig};
use crate::backend::server::state::AppState;
use crate::backend::store::{Store, StoreError};

/// Startup failure
#[derive(Debug, Error)]
pub enum InitError {
    #[error("store initialization failed: {0}")]
    Store(#[from] StoreError),

    #[error("password service initialization failed: {0}")]
    Password(#[from] PasswordError),

    #[error("pipeline assembly failed: {0}")]
    Pipeline(#[from] PipelineError),
}

/// Create and configure the Axum application
pub async fn create_app(config: &ServerConfig) -> Result<Router, InitError> {
    tracing::info!("Initializing Quill backend server");

    let store = load_store(config).await?;
    let state = build_state(store, config)?;

    tracing::info!("Router configured");
    Ok(create_router(state))
}

/// Build application state around an already-open store
pub fn build_state(store: Arc<dyn Store>, config: &ServerConfig) -> Result<AppState, InitError> {
    let passwords = PasswordService::new(config.bcrypt_cost)?;
    let tokens = Arc::new(TokenService::new(config.jwt_secret.as_bytes()));
    Ok(AppState::new(store, passwords, tokens)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::store::MemoryStore;

    #[test]
    fn test_build_state_rejects_invalid_cost() {
        let mut config = ServerConfig::new("s3cret");
        config.bcrypt_cost = 2;
        let result = build_state(Arc::new(MemoryStore::new()), &config);
        assert!(matches!(result, Err(InitError::Password(_))));
    }

    #[tokio::test]
    async fn test_create_app_in_memory() {
        let mut config = ServerConfig::new("s3cret");
        config.bcrypt_cost = 4;
        assert!(create_app(&config).await.is_ok());
    }
}
