use anyhow::{bail, Result};

use newslens_core::services::{find_language, TranslationService};
use newslens_core::{AppConfig, Outcome};

use super::{find_article, load_enriched};

pub async fn run(config: &AppConfig, key: &str, code: &str) -> Result<()> {
    let article = find_article(load_enriched(config)?, key)?;
    let service = TranslationService::new(config)?;

    let language = find_language(code).map_or(code, |l| l.name);
    println!("{}\n", article.title());
    println!("Translating to {}...\n", language);

    match service.translate(&article.article.text, code).await {
        Outcome::Success(text) => println!("{}", text),
        Outcome::Degraded { value, reason } => {
            println!("{}", value);
            eprintln!("\nNote: {}", reason);
        }
        Outcome::Failed { reason } => bail!("Translation failed: {}", reason),
    }
    Ok(())
}
