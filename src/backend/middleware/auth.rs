/**
 * Authentication Middleware
 *
 * This stage protects routes that require a signed-in caller. It extracts
 * the bearer token from the Authorization header, verifies it, and puts the
 * caller's identity into the request context for later stages and the
 * handler.
 *
 * Any failure halts the request with 401 and leaves `caller` unset.
 */

use std::sync::Arc;

use async_trait::async_trait;

use crate::backend::auth::{AuthError, TokenService};
use crate::backend::error::BackendError;
use crate::backend::pipeline::{Outcome, RequestContext, Stage, StageKind};
use crate::shared::CallerIdentity;

/// Expected scheme prefix of the Authorization header
pub const BEARER_PREFIX: &str = "Bearer ";

/// Extract the token from an `Authorization: Bearer <token>` value
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.ok_or_else(|| {
        tracing::warn!("Missing Authorization header");
        AuthError::MissingOrMalformed
    })?;

    header
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            tracing::warn!("Invalid Authorization header format");
            AuthError::MissingOrMalformed
        })
}

/// Pipeline stage verifying the caller's bearer token
pub struct AuthenticateStage {
    tokens: Arc<TokenService>,
}

impl AuthenticateStage {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }

    /// Resolve the caller identity from a context's Authorization header
    pub fn authenticate(&self, ctx: &RequestContext) -> Result<CallerIdentity, AuthError> {
        let token = bearer_token(ctx.authorization.as_deref())?;
        self.tokens.verify(token).map_err(|e| {
            tracing::warn!("Invalid token: {}", e);
            e
        })
    }
}

#[async_trait]
impl Stage for AuthenticateStage {
    fn kind(&self) -> StageKind {
        StageKind::Authentication
    }

    async fn run(&self, mut ctx: RequestContext) -> Outcome {
        match self.authenticate(&ctx) {
            Ok(caller) => {
                tracing::debug!("Authenticated user id {}", caller.user_id);
                ctx.caller = Some(caller);
                Outcome::Continue(ctx)
            }
            Err(err) => Outcome::Halt(err.into()),
        }
    }
}
