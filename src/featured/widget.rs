// widget.rs
use crate::cache::ExpiringCache;
use crate::config::AppConfig;
use crate::featured::extract::extract_from_html;
use crate::featured::models::{ListingRecord, WidgetTarget};
use crate::featured::ScraperError;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER};
use std::sync::Arc;
use url::Url;

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0 Safari/537.36";

pub type ListingCache = ExpiringCache<Vec<ListingRecord>>;

/// A fetched widget page, whatever its status.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: u16,
    pub url: String,
    pub body: String,
}

impl FetchedPage {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Scrapes the featured-listings widget and memoizes results per identifier.
pub struct FeaturedScraper {
    client: Client,
    origin: Url,
    agent_url: String,
    cid_url: String,
    default_cid: Option<String>,
    cache: Arc<ListingCache>,
}

impl FeaturedScraper {
    pub fn new(config: &AppConfig, cache: Arc<ListingCache>) -> Result<Self, ScraperError> {
        let origin = Url::parse(&config.har_origin)
            .map_err(|e| ScraperError::InvalidUrl(format!("{}: {e}", config.har_origin)))?;

        // The widget host turns away requests that don't look like a browser.
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(
            REFERER,
            HeaderValue::from_str(origin.as_str())
                .map_err(|e| ScraperError::Client(e.to_string()))?,
        );

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(config.http_timeout)
            .build()
            .map_err(|e| ScraperError::Client(e.to_string()))?;

        Ok(Self {
            client,
            origin,
            agent_url: config.har_agent_url.clone(),
            cid_url: config.har_cid_url.clone(),
            default_cid: config.har_default_cid.clone(),
            cache,
        })
    }

    /// Listings for `target`. When an agent page comes back empty, the
    /// provided client id (else the configured default) is scraped instead.
    pub fn featured(
        &self,
        target: &WidgetTarget,
        fallback_cid: Option<&str>,
    ) -> Result<Vec<ListingRecord>, ScraperError> {
        let listings = self.scrape(target)?;
        if !listings.is_empty() {
            return Ok(listings);
        }
        let WidgetTarget::Agent(agent) = target else {
            return Ok(listings);
        };

        match fallback_cid.or(self.default_cid.as_deref()) {
            Some(cid) => {
                tracing::info!(agent = %agent, cid, "agent widget empty, trying client id");
                self.scrape(&WidgetTarget::Client(cid.to_string()))
            }
            None => Ok(listings),
        }
    }

    /// Scrape one widget page, served from cache when fresh.
    pub fn scrape(&self, target: &WidgetTarget) -> Result<Vec<ListingRecord>, ScraperError> {
        let key = target.cache_key();
        if let Some(hit) = self.cache.get(&key) {
            tracing::debug!(key = %key, count = hit.len(), "featured cache hit");
            return Ok(hit);
        }

        let page = self.fetch_page(&self.target_url(target))?;
        if !page.is_success() {
            tracing::warn!(url = %page.url, status = page.status, "widget fetch rejected");
            return Err(ScraperError::UpstreamStatus {
                status: page.status,
                url: page.url,
            });
        }

        let listings = extract_from_html(&page.body, &self.origin);
        self.cache.insert(key.clone(), listings.clone());
        tracing::info!(
            key = %key,
            count = listings.len(),
            cached_keys = self.cache.len(),
            "featured listings extracted"
        );
        Ok(listings)
    }

    /// Plain GET of a widget page. Non-2xx answers are returned, not rejected.
    pub fn fetch_page(&self, url: &str) -> Result<FetchedPage, ScraperError> {
        let start = std::time::Instant::now();

        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| ScraperError::Network(e.to_string()))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .map_err(|e| ScraperError::Network(e.to_string()))?;

        tracing::debug!(url, status, bytes = body.len(), elapsed = ?start.elapsed(), "widget fetched");

        Ok(FetchedPage {
            status,
            url: url.to_string(),
            body,
        })
    }

    pub fn target_url(&self, target: &WidgetTarget) -> String {
        target.url(&self.agent_url, &self.cid_url)
    }
}
