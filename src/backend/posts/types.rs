/**
 * Post Handler Types
 *
 * Request bodies for the post endpoints, read from the payload after the
 * validation stage has trimmed and checked it. Responses use
 * [`crate::shared::Post`] directly.
 */

use serde::{Deserialize, Serialize};

use crate::shared::Post;

/// Create post request
#[derive(Deserialize, Serialize, Debug)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
}

/// Update post request
///
/// Absent fields keep their stored value.
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl UpdatePostRequest {
    /// Apply the present fields to `post`; the owner is never touched
    pub fn apply(self, mut post: Post) -> Post {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(content) = self.content {
            post.content = content;
        }
        post
    }
}
