use serde::Serialize;

/// One listing card recovered from the featured-listings widget.
///
/// Every field is best effort and defaults to an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListingRecord {
    /// Absolute link to the detail page.
    pub url: String,
    /// Absolute photo URL.
    pub image: String,
    /// Currency text as shown on the card, e.g. `$325,000`.
    pub price: String,
    pub beds: String,
    pub baths: String,
    /// Digits only, separators stripped.
    pub sqft: String,
    pub address: String,
}

impl ListingRecord {
    /// A card is worth returning when it links somewhere and shows either a
    /// photo or a price. Bare navigation links fail this check.
    pub fn is_listing(&self) -> bool {
        !self.url.is_empty() && (!self.image.is_empty() || !self.price.is_empty())
    }

    pub fn dedup_key(&self) -> (String, String) {
        (self.url.clone(), self.image.clone())
    }
}

/// Which widget page to scrape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetTarget {
    Agent(String),
    Client(String),
}

impl WidgetTarget {
    pub fn cache_key(&self) -> String {
        match self {
            WidgetTarget::Agent(id) => format!("agent:{id}"),
            WidgetTarget::Client(id) => format!("cid:{id}"),
        }
    }

    /// Fill the `{id}` placeholder of the matching URL template.
    pub fn url(&self, agent_template: &str, cid_template: &str) -> String {
        let (template, id) = match self {
            WidgetTarget::Agent(id) => (agent_template, id),
            WidgetTarget::Client(id) => (cid_template, id),
        };
        let encoded: String = url::form_urlencoded::byte_serialize(id.as_bytes()).collect();
        template.replace("{id}", &encoded)
    }
}
