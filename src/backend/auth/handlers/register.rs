/**
 * Register Handler
 *
 * This module implements the user registration handler for
 * POST /auth/register.
 *
 * # Registration Process
 *
 * 1. Validate username (3+ characters, not taken) and password (6+)
 * 2. Hash password using bcrypt
 * 3. Create user in the store
 * 4. Return the public user record
 *
 * A username that is taken, either at validation or when the store
 * rejects the insert, is a 409.
 */

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Json,
};

use crate::backend::auth::handlers::types::CredentialsRequest;
use crate::backend::error::BackendError;
use crate::backend::pipeline::{Phase, RequestContext};
use crate::backend::server::state::AppState;
use crate::shared::PublicUser;

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - username or password fails validation
/// * `409 Conflict` - username already exists
/// * `500 Internal Server Error` - hashing or store failure
///
/// # Example Response
///
/// ```json
/// { "id": 1, "username": "alice" }
/// ```
pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<PublicUser>), BackendError> {
    let ctx = RequestContext::from_http(&headers, &body);
    let mut ctx = state.pipelines.register.run(ctx).await?;
    let request: CredentialsRequest = ctx.payload_as()?;

    ctx.advance(Phase::Executed);
    let user = state
        .auth
        .register(&request.username, &request.password)
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}
