//! Crawl orchestration.
//!
//! Coordinates the scraping pipeline:
//! 1. Result-count discovery on the first listing page (fatal on failure)
//! 2. Per-page link collection against the visited set
//! 3. Per-recipe fetch, extraction, and aggregation (skip-and-continue)
//!
//! Single logical thread of control: fetches are sequential, with rate
//! limiting handled inside the fetcher.

use scraper::Html;
use url::Url;

use crate::aggregate::{Aggregator, Dataset};
use crate::config::ScrapeConfig;
use crate::error::Result;
use crate::extract;
use crate::nutrition::NutritionRecord;
use crate::service::collector;
use crate::service::fetcher::Fetcher;
use crate::service::paginator;

pub struct Scraper {
    fetcher: Fetcher,
    config: ScrapeConfig,
}

impl Scraper {
    pub fn new(fetcher: Fetcher, config: ScrapeConfig) -> Self {
        Self { fetcher, config }
    }

    /// Run the full crawl and return the accumulated dataset.
    ///
    /// The first listing fetch and the result-count parse are fatal;
    /// everything downstream recovers locally. A link that fails keeps
    /// its place in the visited set so a later page cannot retry it.
    pub async fn run(&self) -> Result<Dataset> {
        let first_page = self.fetcher.fetch(&self.config.search_url).await?;
        let pages = {
            let doc = Html::parse_document(&first_page);
            paginator::page_count(&doc, self.config.results_per_page)?
        };
        log::info!("[PAGES] {} listing pages discovered", pages);

        let mut aggregator = Aggregator::new();

        for page in 1..=pages {
            log::info!("[PAGES] Scraping page {} of {}...", page, pages);
            let page_url = paginator::page_url(&self.config.search_url, page)?;

            let body = match self.fetcher.fetch(&page_url).await {
                Ok(body) => body,
                Err(e) => {
                    log::warn!("[PAGES] Skipping page {}: {}", page, e);
                    continue;
                }
            };

            let links = {
                let doc = Html::parse_document(&body);
                collector::collect_new_links(&doc, &self.config.base_url, aggregator.visited())
            };
            log::debug!("[PAGES] {} new recipe links on page {}", links.len(), page);

            for link in links {
                if let Err(e) = self.scrape_recipe(&link, &mut aggregator).await {
                    log::warn!("[RECIPE] Skipping {}: {}", link, e);
                }
                aggregator.mark_visited(link);
            }
        }

        log::info!("[PAGES] Crawl complete: {} recipes", aggregator.recipe_count());
        Ok(aggregator.into_dataset())
    }

    /// Fetch and extract one recipe, appending it to the aggregator.
    ///
    /// A fetch failure or a missing name skips the recipe without
    /// consuming an identifier. The caller marks the link visited in
    /// both cases.
    async fn scrape_recipe(&self, link: &Url, aggregator: &mut Aggregator) -> Result<()> {
        let body = self.fetcher.fetch(link).await?;
        let cooking_time = extract::cooking_time(&body);

        let doc = Html::parse_document(&body);
        let name = extract::recipe_name(&doc)?;
        let categories = extract::categories(&doc);
        let nutrition = NutritionRecord::from_pairs(&extract::nutrition_pairs(&doc));
        let ingredients = extract::ingredients(&doc);

        let id = aggregator.push_recipe(name, link, cooking_time, &categories, nutrition, ingredients);
        log::debug!("[RECIPE] #{} {}", id, link);
        Ok(())
    }
}
