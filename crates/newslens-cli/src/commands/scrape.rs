use anyhow::Result;
use tracing::{info, warn};

use newslens_core::pipeline::scrape_and_store;
use newslens_core::AppConfig;

pub async fn run(config: &AppConfig) -> Result<()> {
    println!("Scraping {} feeds...\n", config.feeds.len());

    let report = scrape_and_store(config).await?;
    println!("{}", report);

    match &report.saved_to {
        Some(path) => {
            info!("Raw corpus written to {}", path.display());
            println!("\nNext: run `newslens analyze` to enrich the articles.");
        }
        None => warn!("Scrape produced no articles, existing corpus left as is"),
    }
    Ok(())
}
