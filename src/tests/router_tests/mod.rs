mod featured_tests;
mod listing_tests;
