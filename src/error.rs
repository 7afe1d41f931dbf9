//! Error types for the recipe scraper.
//!
//! The taxonomy mirrors the three ways a run can go wrong:
//! - `Fetch`: a request kept failing until its retry budget ran out
//! - `Parse`: an expected structural element was absent from a page
//! - `Load`: the database rejected the replace-then-append
//!
//! Per-page and per-recipe fetch failures are recovered locally by the
//! pipeline (logged and skipped). A failed listing fetch, a failed
//! result-count parse, and any load failure surface to `main` and
//! terminate the run non-zero.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Network request failed after exhausting retries
    #[error("fetch failed for {url} after {attempts} attempts: {source}")]
    Fetch {
        url: String,
        attempts: u32,
        #[source]
        source: reqwest::Error,
    },

    /// Expected structural element absent
    #[error("parse error: {0}")]
    Parse(String),

    /// Database operation failed
    #[error("load error: {0}")]
    Load(#[from] sqlx::Error),
}

/// Result type alias using ScrapeError.
pub type Result<T> = std::result::Result<T, ScrapeError>;
