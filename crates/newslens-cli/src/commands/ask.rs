use anyhow::{bail, Result};

use newslens_core::services::QaService;
use newslens_core::{AppConfig, Outcome};

use super::{find_article, load_enriched};

pub async fn run(config: &AppConfig, key: &str, question: &str) -> Result<()> {
    let article = find_article(load_enriched(config)?, key)?;
    let service = QaService::new(config)?;

    println!("{}\n", article.title());
    println!("Q: {}", question);

    match service.ask(question, &article.article.text).await {
        Outcome::Success(answer) => println!("A: {}", answer),
        Outcome::Degraded { value, reason } => {
            println!("A: {}", value);
            eprintln!("\nNote: {}", reason);
        }
        Outcome::Failed { reason } => bail!("Could not answer: {}", reason),
    }
    Ok(())
}
