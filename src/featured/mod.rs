mod extract;
mod models;
mod scraper_error;
mod urls;
mod widget;

pub use models::{ListingRecord, WidgetTarget};
pub use scraper_error::ScraperError;
pub use widget::{FeaturedScraper, ListingCache};
