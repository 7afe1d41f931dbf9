// src/main.rs

use std::process;

use recipe_scraper::config::ScrapeConfig;
use recipe_scraper::db;
use recipe_scraper::repository::RecipeRepository;
use recipe_scraper::service::{http, Fetcher, Scraper};

#[tokio::main]
async fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(e) = run().await {
        log::error!("Run failed: {e:#}");
        process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = ScrapeConfig::default();
    let client = http::create_client()?;
    let scraper = Scraper::new(Fetcher::new(client, &config), config);

    let dataset = scraper.run().await?;
    log::info!(
        "[LOAD] Scraped {} recipes ({} ingredient rows); loading...",
        dataset.recipes.len(),
        dataset.ingredients.len()
    );

    let pool = db::connect(&db::database_url()).await?;
    RecipeRepository::new(pool).replace_all(&dataset).await?;
    log::info!("[LOAD] Store replaced successfully");

    Ok(())
}
