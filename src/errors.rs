// errors.rs
use astra::Response;
use thiserror::Error;

/// Errors surfaced by route handlers. Each variant maps to one HTTP status
/// in `responses::error_to_response`.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,

    #[error("{0}")]
    BadRequest(String),

    /// Non-success answer from an upstream API; status is passed through.
    #[error("Upstream error")]
    Upstream { status: u16, detail: String },

    #[error("{0}")]
    ScrapeFailed(String),

    #[error("Server exception")]
    InternalError,
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::BadRequest(_) => 400,
            ServerError::Upstream { status, .. } => *status,
            ServerError::ScrapeFailed(_) | ServerError::InternalError => 500,
        }
    }
}
