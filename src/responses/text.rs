use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};

pub fn text_response(content: &str) -> ResultResp {
    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", "text/plain; charset=utf-8")
        .body(Body::from(content.to_string()))
        .map_err(|_| ServerError::InternalError)
}

pub fn empty_response(status: u16) -> ResultResp {
    ResponseBuilder::new()
        .status(status)
        .body(Body::empty())
        .map_err(|_| ServerError::InternalError)
}
