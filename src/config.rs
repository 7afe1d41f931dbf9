//! Run configuration.
//!
//! A run is unparameterized: the defaults below are the whole surface.
//! Tests swap in a mock server base URL and zero delays.

use std::time::Duration;

use url::Url;

#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Site root; relative recipe hrefs resolve against this.
    pub base_url: Url,
    /// First listing page; page N is reached via `&page=N`.
    pub search_url: Url,
    /// Total attempts per request, including the first.
    pub max_retries: u32,
    /// Backoff between failed attempts of the same request.
    pub retry_delay: Duration,
    /// Courtesy delay after every successful fetch.
    pub rate_limit_delay: Duration,
    /// Listing page size, a discovered site constant.
    pub results_per_page: u32,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse("https://www.bbcgoodfood.com").expect("valid base url"),
            search_url: Url::parse("https://www.bbcgoodfood.com/search?").expect("valid search url"),
            max_retries: 3,
            retry_delay: Duration::from_secs(5),
            rate_limit_delay: Duration::from_secs(1),
            results_per_page: 30,
        }
    }
}
