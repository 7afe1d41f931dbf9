pub mod collector;
pub mod fetcher;
pub mod http;
pub mod paginator;
pub mod pipeline;

pub use fetcher::Fetcher;
pub use pipeline::Scraper;
