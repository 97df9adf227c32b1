use anyhow::Result;
use tracing::{info, warn};

use newslens_core::pipeline::run_analysis;
use newslens_core::AppConfig;

use super::load_raw;

pub async fn run(config: &AppConfig) -> Result<()> {
    // Surface the guidance message before starting the pipeline
    let count = load_raw(config)?.len();
    println!("Running NLP analysis on {} articles...", count);

    let report = run_analysis(config).await?;
    println!("{}", report);

    if report.without_topic > 0 {
        warn!("{} articles had no text to model a topic from", report.without_topic);
    }
    info!("Enriched corpus written to {}", report.saved_to.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use newslens_core::corpus::{Article, CorpusStore};

    #[tokio::test]
    async fn test_analyze_writes_enriched_corpus() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut config = AppConfig::default();
        config.general.data_dir = dir.path().to_path_buf();
        CorpusStore::from_config(&config)
            .write_raw(&[Article::new("u1", "BBC").with_text("Heavy rain fell in Chennai.")])
            .unwrap();

        run(&config).await.unwrap();
        assert!(config.enriched_corpus_path().is_file());
    }
}
