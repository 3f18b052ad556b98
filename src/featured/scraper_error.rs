use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP client setup failed: {0}")]
    Client(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Upstream fetch failed with HTTP {status} for {url}")]
    UpstreamStatus { status: u16, url: String },

    #[error("Invalid widget URL: {0}")]
    InvalidUrl(String),
}
