/**
 * API Routes
 *
 * This module wires the authentication and post handlers into the router.
 *
 * # Routes
 *
 * ## Authentication
 * - `POST /auth/register` - User registration
 * - `POST /auth/login` - User login
 *
 * ## Posts
 * - `GET /posts` - List posts (public)
 * - `POST /posts` - Create post (bearer)
 * - `GET /posts/{id}` - Get post (public)
 * - `PUT /posts/{id}` - Update post (bearer, owner)
 * - `DELETE /posts/{id}` - Delete post (bearer, owner)
 *
 * Authentication and ownership are enforced by each route's pipeline, not
 * by router layers, so the stage order is fixed per route.
 */

use axum::{
    routing::{get, post},
    Router,
};

use crate::backend::auth::{login, register};
use crate::backend::posts::{create_post, delete_post, get_post, list_posts, update_post};
use crate::backend::server::state::AppState;

/// Configure API routes
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Authentication endpoints
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        // Post endpoints
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/{id}",
            get(get_post).put(update_post).delete(delete_post),
        )
}
