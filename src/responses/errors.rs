use crate::errors::ServerError;
use crate::responses::json::JSON_CONTENT_TYPE;
use astra::{Body, Response, ResponseBuilder};
use serde_json::json;

pub use crate::errors::ResultResp;

/// Convert a ServerError into a JSON error response:
/// `{"ok": false, "error": ..., "detail"?: ...}`.
pub fn error_to_response(err: ServerError) -> Response {
    let status = err.status();
    let body = match &err {
        ServerError::Upstream { detail, .. } => json!({
            "ok": false,
            "error": err.to_string(),
            "detail": detail,
        }),
        _ => json!({ "ok": false, "error": err.to_string() }),
    };

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", JSON_CONTENT_TYPE)
        .body(Body::from(body.to_string()))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
