// config.rs
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_LISTINGS_API_BASE: &str = "https://api.repliers.com/v1/listings";
pub const DEFAULT_HAR_ORIGIN: &str = "https://www.har.com";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing {0} in environment")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Process-wide settings, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub max_workers: usize,

    pub api_key: String,
    pub listings_api_base: String,

    pub har_origin: String,
    /// `{id}` is replaced with the agent number.
    pub har_agent_url: String,
    /// `{id}` is replaced with the client id.
    pub har_cid_url: String,
    pub har_default_cid: Option<String>,

    pub http_timeout: Duration,
    pub featured_cache_ttl: Duration,
}

impl AppConfig {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get("REPLIERS_API_KEY").ok_or(ConfigError::Missing("REPLIERS_API_KEY"))?;

        let har_origin = get("HAR_ORIGIN")
            .unwrap_or_else(|| DEFAULT_HAR_ORIGIN.to_string())
            .trim_end_matches('/')
            .to_string();
        url::Url::parse(&har_origin).map_err(|_| ConfigError::Invalid {
            key: "HAR_ORIGIN",
            value: har_origin.clone(),
        })?;

        let har_agent_url = get("HAR_AGENT_URL")
            .unwrap_or_else(|| format!("{har_origin}/idx/featured?agent_number={{id}}"));
        let har_cid_url =
            get("HAR_CID_URL").unwrap_or_else(|| format!("{har_origin}/idx/featured?cid={{id}}"));

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or("PORT", get("PORT"), DEFAULT_PORT)?,
            max_workers: parse_or("MAX_WORKERS", get("MAX_WORKERS"), 8)?,
            api_key,
            listings_api_base: get("REPLIERS_API_BASE")
                .unwrap_or_else(|| DEFAULT_LISTINGS_API_BASE.to_string())
                .trim_end_matches('/')
                .to_string(),
            har_origin,
            har_agent_url,
            har_cid_url,
            har_default_cid: get("HAR_DEFAULT_CID"),
            http_timeout: Duration::from_secs(parse_or(
                "HTTP_TIMEOUT_SECS",
                get("HTTP_TIMEOUT_SECS"),
                10,
            )?),
            featured_cache_ttl: Duration::from_secs(parse_or(
                "FEATURED_CACHE_TTL_SECS",
                get("FEATURED_CACHE_TTL_SECS"),
                600,
            )?),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}
