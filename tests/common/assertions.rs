//! Custom assertion macros
//!
//! Every error response carries `{"error", "message", "status"}`; these
//! macros check a response against that shape.

/// Assert a response's status and stable error code
///
/// Evaluates to the parsed JSON body.
#[macro_export]
macro_rules! assert_error {
    ($response:expr, $status:expr, $code:expr) => {{
        let response = $response;
        assert_eq!(
            response.status_code(),
            $status,
            "unexpected status, body: {}",
            response.text()
        );
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], $code, "body: {body}");
        assert_eq!(body["status"], $status.as_u16(), "body: {body}");
        assert!(body["message"].is_string(), "body: {body}");
        body
    }};
}

/// Assert a response's status and evaluate to its JSON body
#[macro_export]
macro_rules! assert_json {
    ($response:expr, $status:expr) => {{
        let response = $response;
        assert_eq!(
            response.status_code(),
            $status,
            "unexpected status, body: {}",
            response.text()
        );
        response.json::<serde_json::Value>()
    }};
}
