mod client;
mod listing_error;
mod mapper;
mod models;

pub use client::ListingsClient;
pub use listing_error::ListingError;
pub use models::MappedListing;
