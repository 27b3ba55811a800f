/**
 * Login Handler
 *
 * This module implements the user authentication handler for
 * POST /auth/login.
 *
 * # Authentication Process
 *
 * 1. Validate that username and password are present
 * 2. Look up user by username
 * 3. Verify password using bcrypt
 * 4. Return a bearer token
 *
 * # Security
 *
 * - Unknown username and wrong password return the same 401
 * - Passwords and tokens are never logged
 */
use axum::{body::Bytes, extract::State, http::HeaderMap, response::Json};

use crate::backend::auth::handlers::types::{CredentialsRequest, TokenResponse};
use crate::backend::error::BackendError;
use crate::backend::pipeline::{Phase, RequestContext};
use crate::backend::server::state::AppState;

/// Login handler
///
/// # Errors
///
/// * `400 Bad Request` - username or password missing or blank
/// * `401 Unauthorized` - unknown user or wrong password
/// * `500 Internal Server Error` - store or signing failure
///
/// # Example Request
///
/// ```http
/// POST /auth/login HTTP/1.1
/// Content-Type: application/json
///
/// { "username": "alice", "password": "secret1" }
/// ```
///
/// # Example Response
///
/// ```json
/// { "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..." }
/// ```
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<TokenResponse>, BackendError> {
    let ctx = RequestContext::from_http(&headers, &body);
    let mut ctx = state.pipelines.login.run(ctx).await?;
    let request: CredentialsRequest = ctx.payload_as()?;

    ctx.advance(Phase::Executed);
    let token = state
        .auth
        .login(&request.username, &request.password)
        .await?;

    Ok(Json(TokenResponse { token }))
}
