/**
 * Request Context
 *
 * The typed, per-request value threaded through the pipeline. Each stage
 * receives it by value and hands back a (possibly enriched) copy; nothing
 * is attached to the HTTP request itself.
 *
 * # Fields Filled In By Stage
 *
 * | Field | Set by |
 * |---|---|
 * | `payload`, `path_id`, `authorization` | construction from the HTTP request |
 * | `post_id` | validation (parsed path identifier) |
 * | `caller` | authentication |
 * | `post` | ownership authorization |
 */

use axum::body::Bytes;
use axum::http::{header::AUTHORIZATION, HeaderMap};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::backend::error::BackendError;
use crate::shared::{CallerIdentity, FieldViolation, Post, PostId};

/// Lifecycle of a request as it moves through the pipeline
///
/// Phases only ever move forward. `Executed` is the only phase in which a
/// handler performs a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Received,
    Validated,
    Authenticated,
    Authorized,
    Executed,
}

/// Per-request state shared between pipeline stages and the handler
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Raw JSON body; `Value::Null` when the body was not valid JSON
    pub payload: Value,
    /// Raw `:id` path segment, if the route has one
    pub path_id: Option<String>,
    /// Raw `Authorization` header value
    pub authorization: Option<String>,
    /// Parsed post identifier, present once validation accepted `path_id`
    pub post_id: Option<PostId>,
    /// Verified caller, present only after authentication succeeded
    pub caller: Option<CallerIdentity>,
    /// Target post, present only after ownership was confirmed
    pub post: Option<Post>,
    phase: Phase,
}

impl RequestContext {
    /// Context for a request carrying `payload` and nothing else
    pub fn new(payload: Value) -> Self {
        Self {
            payload,
            path_id: None,
            authorization: None,
            post_id: None,
            caller: None,
            post: None,
            phase: Phase::Received,
        }
    }

    /// Build a context from the raw HTTP pieces
    ///
    /// An empty body is treated as `{}`. A body that does not parse as JSON
    /// becomes `Value::Null` and is reported by the validation stage.
    pub fn from_http(headers: &HeaderMap, body: &Bytes) -> Self {
        let payload = if body.iter().all(u8::is_ascii_whitespace) {
            Value::Object(Map::new())
        } else {
            serde_json::from_slice(body).unwrap_or(Value::Null)
        };

        let authorization = headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .map(str::to_string);

        Self {
            authorization,
            ..Self::new(payload)
        }
    }

    pub fn with_path_id(mut self, id: impl Into<String>) -> Self {
        self.path_id = Some(id.into());
        self
    }

    pub fn with_authorization(mut self, value: impl Into<String>) -> Self {
        self.authorization = Some(value.into());
        self
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Move to a later phase; moving backwards is ignored
    pub fn advance(&mut self, to: Phase) {
        if to > self.phase {
            tracing::debug!("Request phase {:?} -> {:?}", self.phase, to);
            self.phase = to;
        }
    }

    /// The payload as a JSON object, if it is one
    pub fn body(&self) -> Option<&Map<String, Value>> {
        self.payload.as_object()
    }

    /// String body field, if present and a string
    pub fn body_str(&self, field: &str) -> Option<&str> {
        self.body()?.get(field)?.as_str()
    }

    /// Deserialize the (validated) payload into a typed request
    pub fn payload_as<T: DeserializeOwned>(&self) -> Result<T, BackendError> {
        serde_json::from_value(self.payload.clone()).map_err(|e| {
            tracing::warn!("Payload did not match request type: {}", e);
            BackendError::Validation(vec![FieldViolation::body("body", "Malformed request body")])
        })
    }
}
