/**
 * Error Conversion
 *
 * `BackendError` implements `IntoResponse`, so handlers and pipeline stages
 * can return it directly.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "error": "validation_failed",
 *   "message": "Validation failed",
 *   "status": 400,
 *   "errors": [{ "field": "title", "location": "body", "message": "Title is required" }]
 * }
 * ```
 *
 * `errors` is only present for validation failures.
 */

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::backend::error::types::BackendError;

impl BackendError {
    /// JSON body for this error
    pub fn body(&self) -> serde_json::Value {
        let mut body = json!({
            "error": self.code(),
            "message": self.message(),
            "status": self.status_code().as_u16(),
        });
        if let Self::Validation(violations) = self {
            body["errors"] = json!(violations);
        }
        body
    }
}

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if let Self::Internal { detail } = &self {
            tracing::error!("Internal error: {}", detail);
        }
        (status, Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::FieldViolation;
    use axum::http::StatusCode;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_validation_body_lists_violations() {
        let error = BackendError::Validation(vec![
            FieldViolation::body("title", "Title is required"),
            FieldViolation::params("id", "Invalid post ID"),
        ]);
        assert_eq!(
            error.body(),
            json!({
                "error": "validation_failed",
                "message": "Validation failed",
                "status": 400,
                "errors": [
                    { "field": "title", "location": "body", "message": "Title is required" },
                    { "field": "id", "location": "params", "message": "Invalid post ID" },
                ],
            })
        );
    }

    #[test]
    fn test_forbidden_body() {
        let error = BackendError::forbidden("You are not the owner of this post");
        assert_eq!(
            error.body(),
            json!({
                "error": "forbidden",
                "message": "You are not the owner of this post",
                "status": 403,
            })
        );
    }

    #[test]
    fn test_into_response_status() {
        let response = BackendError::internal("db down").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
