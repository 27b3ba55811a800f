/**
 * Ownership Authorization
 *
 * The only authorization gate for post mutation. Loads the target post and
 * lets the request through only when its owner is the authenticated
 * caller. The loaded post is handed to the handler in the context, and the
 * handler does not check ownership again.
 *
 * Existence is checked before ownership: a missing post is 404 for every
 * caller, and 403 is reserved for posts that exist.
 */

use std::sync::Arc;

use async_trait::async_trait;

use crate::backend::error::BackendError;
use crate::backend::pipeline::{Outcome, RequestContext, Stage, StageKind};
use crate::backend::store::Store;
use crate::shared::Post;

pub const POST_NOT_FOUND: &str = "Post not found";
pub const NOT_OWNER: &str = "You are not the owner of this post";

/// Pipeline stage confirming the caller owns the target post
pub struct OwnershipStage {
    store: Arc<dyn Store>,
}

impl OwnershipStage {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    async fn authorize(&self, ctx: &RequestContext) -> Result<Post, BackendError> {
        let caller = ctx.caller.as_ref().ok_or_else(|| {
            tracing::error!("Ownership check reached without a caller");
            BackendError::AuthMissingOrMalformed
        })?;
        let post_id = ctx
            .post_id
            .ok_or_else(|| BackendError::internal("ownership check without a validated post id"))?;

        let post = self
            .store
            .find_post(post_id)
            .await?
            .ok_or_else(|| BackendError::not_found(POST_NOT_FOUND))?;

        if !post.is_owned_by(caller) {
            tracing::warn!(
                "User {} denied access to post {} owned by {}",
                caller.user_id,
                post.id,
                post.owner.id
            );
            return Err(BackendError::forbidden(NOT_OWNER));
        }

        Ok(post)
    }
}

#[async_trait]
impl Stage for OwnershipStage {
    fn kind(&self) -> StageKind {
        StageKind::Authorization
    }

    async fn run(&self, mut ctx: RequestContext) -> Outcome {
        match self.authorize(&ctx).await {
            Ok(post) => {
                ctx.post = Some(post);
                Outcome::Continue(ctx)
            }
            Err(err) => Outcome::Halt(err),
        }
    }
}
