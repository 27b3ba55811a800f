/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Layers
 *
 * - `TraceLayer` - one span per request
 * - `CorsLayer` - any origin; the frontend is served separately
 *
 * Unknown paths get a JSON 404 in the same shape as every other error.
 */

use axum::{
    http::{header, Method},
    response::Json,
    routing::get,
    Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// 1. **Health**: `GET /health`
/// 2. **API Routes**: authentication and posts
/// 3. **Fallback Handler**: JSON 404
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new().route("/health", get(health));

    let router = configure_api_routes(router);

    let router = router.fallback(|| async { BackendError::not_found("Route not found") });

    router
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_origin(Any)
        .max_age(std::time::Duration::from_secs(3600))
}
