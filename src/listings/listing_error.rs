use thiserror::Error;

#[derive(Debug, Error)]
pub enum ListingError {
    #[error("HTTP client setup failed: {0}")]
    Client(String),

    #[error("Invalid listings endpoint: {0}")]
    InvalidUrl(String),

    #[error("Request failed: {0}")]
    Network(String),

    /// The listings API answered with a non-success status.
    #[error("Upstream HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Response was not valid JSON: {0}")]
    Decode(String),
}
