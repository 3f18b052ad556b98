// client.rs
use crate::config::AppConfig;
use crate::listings::mapper::{map_listing, select_raw};
use crate::listings::{ListingError, MappedListing};
use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use url::Url;

/// Bearer-authenticated client for the MLS listings API.
pub struct ListingsClient {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl ListingsClient {
    pub fn new(config: &AppConfig) -> Result<Self, ListingError> {
        let base_url = Url::parse(&config.listings_api_base)
            .map_err(|e| ListingError::InvalidUrl(format!("{}: {e}", config.listings_api_base)))?;

        let client = Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|e| ListingError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    /// `{base}/{mls_id}`, with the id percent-encoded as one path segment.
    pub fn endpoint(&self, mls_id: &str) -> Result<Url, ListingError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ListingError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(mls_id);
        Ok(url)
    }

    /// Raw JSON body for one listing.
    pub fn fetch(&self, mls_id: &str) -> Result<Value, ListingError> {
        let url = self.endpoint(mls_id)?;

        let resp = self
            .client
            .get(url)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .send()
            .map_err(|e| ListingError::Network(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .map_err(|e| ListingError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(ListingError::Upstream {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| ListingError::Decode(e.to_string()))
    }

    pub fn fetch_mapped(&self, mls_id: &str) -> Result<MappedListing, ListingError> {
        let body = self.fetch(mls_id)?;
        Ok(map_listing(select_raw(&body)))
    }
}
