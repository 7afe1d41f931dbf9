//! Listing pagination: result-count discovery and page URL generation.

use std::sync::OnceLock;

use scraper::{Html, Selector};
use url::Url;

use crate::error::{Result, ScrapeError};

/// Paragraph carrying the total result count on the first listing page.
const RESULTS_TEXT_SELECTOR: &str = "p.search-results__results-text";

/// Position of the count inside the results text, split on whitespace.
/// "Showing 1 to 30 of 61 results" -> token 5 is "61".
const COUNT_TOKEN_INDEX: usize = 5;

/// Number of listing pages, derived from the first page's results text.
///
/// Fatal for the run when the text is absent or malformed: without it no
/// pages can be enumerated at all.
pub fn page_count(doc: &Html, results_per_page: u32) -> Result<u32> {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    let selector = SELECTOR.get_or_init(|| Selector::parse(RESULTS_TEXT_SELECTOR).unwrap());

    let text = doc
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>())
        .ok_or_else(|| ScrapeError::Parse("results-count text not found on listing page".into()))?;

    let token = text
        .split_whitespace()
        .nth(COUNT_TOKEN_INDEX)
        .ok_or_else(|| ScrapeError::Parse(format!("results text too short: {text:?}")))?;

    let total: u32 = token
        .parse()
        .map_err(|_| ScrapeError::Parse(format!("expected result count, got {token:?}")))?;

    Ok(total.div_ceil(results_per_page))
}

/// Listing URL for page `page` (1-based).
pub fn page_url(search_url: &Url, page: u32) -> Result<Url> {
    Url::parse(&format!("{search_url}&page={page}"))
        .map_err(|e| ScrapeError::Parse(format!("invalid page url: {e}")))
}
