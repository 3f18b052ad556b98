use crate::config::AppConfig;
use crate::featured::{FeaturedScraper, ListingCache, ScraperError};
use crate::listings::{ListingError, ListingsClient};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StateError {
    #[error(transparent)]
    Listings(#[from] ListingError),

    #[error(transparent)]
    Scraper(#[from] ScraperError),
}

/// Everything the handlers share. Built once in `main` and borrowed by every
/// worker thread for the life of the server.
pub struct AppState {
    pub listings: ListingsClient,
    pub featured: FeaturedScraper,
}

impl AppState {
    pub fn new(config: &AppConfig, cache: Arc<ListingCache>) -> Result<Self, StateError> {
        Ok(Self {
            listings: ListingsClient::new(config)?,
            featured: FeaturedScraper::new(config, cache)?,
        })
    }
}
