use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};
use serde::Serialize;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Serialize `value` as the JSON body of a response with `status`.
pub fn json_response<T: Serialize + ?Sized>(status: u16, value: &T) -> ResultResp {
    let body = serde_json::to_vec(value).map_err(|e| {
        tracing::error!(error = %e, "response serialization failed");
        ServerError::InternalError
    })?;

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", JSON_CONTENT_TYPE)
        .body(Body::from(body))
        .map_err(|_| ServerError::InternalError)
}

pub fn json_ok<T: Serialize + ?Sized>(value: &T) -> ResultResp {
    json_response(200, value)
}
