/**
 * Post Handlers
 *
 * Handlers for `/posts`. Reads are public. Mutations first run their
 * route's pipeline and only then touch the store; the request is in the
 * `Executed` phase whenever a write happens.
 *
 * # Routes
 *
 * - `GET /posts` - all posts, newest first
 * - `GET /posts/{id}` - one post
 * - `POST /posts` - create (bearer)
 * - `PUT /posts/{id}` - partial update (bearer, owner only)
 * - `DELETE /posts/{id}` - delete (bearer, owner only)
 */

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};

use super::ownership::POST_NOT_FOUND;
use super::types::{CreatePostRequest, UpdatePostRequest};
use crate::backend::error::BackendError;
use crate::backend::pipeline::{Phase, RequestContext};
use crate::backend::server::state::AppState;
use crate::backend::store::{NewPost, Store, StoreError};
use crate::backend::validation::rules::parse_positive_id;
use crate::shared::Post;

const USER_NOT_FOUND: &str = "User not found";

/// List all posts, newest first
pub async fn list_posts(
    State(store): State<Arc<dyn Store>>,
) -> Result<Json<Vec<Post>>, BackendError> {
    let posts = store.list_posts().await?;
    Ok(Json(posts))
}

/// Fetch one post
///
/// An id that is not a positive integer cannot name a post, so it is a 404
/// like any other missing id.
pub async fn get_post(
    State(store): State<Arc<dyn Store>>,
    Path(id): Path<String>,
) -> Result<Json<Post>, BackendError> {
    let Some(id) = parse_positive_id(&id) else {
        return Err(BackendError::not_found(POST_NOT_FOUND));
    };
    store
        .find_post(id)
        .await?
        .map(Json)
        .ok_or_else(|| BackendError::not_found(POST_NOT_FOUND))
}

/// Create a post owned by the caller
///
/// # Errors
///
/// * `400` - missing or empty title/content
/// * `401` - missing, malformed, invalid or expired bearer token
/// * `404` - the caller's user record no longer exists
pub async fn create_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<Post>), BackendError> {
    let ctx = RequestContext::from_http(&headers, &body);
    let mut ctx = state.pipelines.create_post.run(ctx).await?;

    let request: CreatePostRequest = ctx.payload_as()?;
    let caller = ctx
        .caller
        .clone()
        .ok_or(BackendError::AuthMissingOrMalformed)?;

    // The token can outlive its user.
    let owner = state
        .store
        .find_user(caller.user_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Token for vanished user id {}", caller.user_id);
            BackendError::not_found(USER_NOT_FOUND)
        })?;

    ctx.advance(Phase::Executed);
    let post = state
        .store
        .insert_post(NewPost {
            owner_id: owner.id,
            title: request.title,
            content: request.content,
        })
        .await
        .map_err(|e| match e {
            StoreError::MissingReference(_) => BackendError::not_found(USER_NOT_FOUND),
            other => other.into(),
        })?;

    tracing::info!("Post {} created by user {}", post.id, owner.id);
    Ok((StatusCode::CREATED, Json(post)))
}

/// Update title and/or content of a post the caller owns
///
/// # Errors
///
/// * `400` - invalid id, or a present field is empty
/// * `401` - bad bearer token
/// * `403` - caller is not the owner
/// * `404` - no such post
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Post>, BackendError> {
    let ctx = RequestContext::from_http(&headers, &body).with_path_id(id);
    let mut ctx = state.pipelines.update_post.run(ctx).await?;

    let request: UpdatePostRequest = ctx.payload_as()?;
    let post = ctx
        .post
        .take()
        .ok_or_else(|| BackendError::internal("update reached handler without a post"))?;

    ctx.advance(Phase::Executed);
    let post = state
        .store
        .update_post(&request.apply(post))
        .await?
        .ok_or_else(|| BackendError::not_found(POST_NOT_FOUND))?;

    tracing::info!("Post {} updated", post.id);
    Ok(Json(post))
}

/// Delete a post the caller owns
///
/// Deleting an id that is already gone is a 404.
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, BackendError> {
    let ctx = RequestContext::from_http(&headers, &body).with_path_id(id);
    let mut ctx = state.pipelines.delete_post.run(ctx).await?;

    let post = ctx
        .post
        .take()
        .ok_or_else(|| BackendError::internal("delete reached handler without a post"))?;

    ctx.advance(Phase::Executed);
    if !state.store.delete_post(post.id).await? {
        return Err(BackendError::not_found(POST_NOT_FOUND));
    }

    tracing::info!("Post {} deleted", post.id);
    Ok(StatusCode::NO_CONTENT)
}
