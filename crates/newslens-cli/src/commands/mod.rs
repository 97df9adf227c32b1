pub mod analyze;
pub mod ask;
pub mod export;
pub mod languages;
pub mod list;
pub mod run;
pub mod scrape;
pub mod show;
pub mod translate;

use anyhow::{anyhow, bail, Result};

use newslens_core::corpus::{Article, CorpusStore, EnrichedArticle};
use newslens_core::{AppConfig, Error};

/// Load the raw corpus, turning a missing file into guidance
pub fn load_raw(config: &AppConfig) -> Result<Vec<Article>> {
    CorpusStore::from_config(config).read_raw().map_err(|e| match e {
        Error::CorpusMissing(path) => anyhow!(
            "No raw corpus at {}.\nRun `newslens scrape` to fetch the configured feeds.",
            path.display()
        ),
        other => other.into(),
    })
}

/// Load the enriched corpus, turning a missing file into guidance
pub fn load_enriched(config: &AppConfig) -> Result<Vec<EnrichedArticle>> {
    CorpusStore::from_config(config).read_enriched().map_err(|e| match e {
        Error::CorpusMissing(path) => anyhow!(
            "No enriched corpus at {}.\nRun `newslens scrape` and then `newslens analyze`.",
            path.display()
        ),
        other => other.into(),
    })
}

/// Find an article by 1-based row number or URL
pub fn find_article(articles: Vec<EnrichedArticle>, key: &str) -> Result<EnrichedArticle> {
    if let Ok(row) = key.parse::<usize>() {
        let count = articles.len();
        if row == 0 || row > count {
            bail!("Row {} is out of range (1..={})", row, count);
        }
        return articles
            .into_iter()
            .nth(row - 1)
            .ok_or_else(|| anyhow!("Row {} not found", row));
    }

    articles
        .into_iter()
        .find(|a| a.url() == key)
        .ok_or_else(|| anyhow!("No article with URL {}", key))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(url: &str) -> EnrichedArticle {
        EnrichedArticle {
            article: Article::new(url, "BBC"),
            sentiment: 0.0,
            entities: Vec::new(),
            top_keywords: Vec::new(),
            summary_auto: String::new(),
            topics: String::new(),
        }
    }

    #[test]
    fn test_find_article_by_row_or_url() {
        let rows = || vec![row("https://a"), row("https://b")];
        assert_eq!(find_article(rows(), "2").unwrap().url(), "https://b");
        assert_eq!(find_article(rows(), "https://a").unwrap().url(), "https://a");
        assert!(find_article(rows(), "0").is_err());
        assert!(find_article(rows(), "3").is_err());
        assert!(find_article(rows(), "https://c").is_err());
    }

    #[test]
    fn test_missing_corpus_gives_guidance() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut config = AppConfig::default();
        config.general.data_dir = dir.path().to_path_buf();

        let message = load_enriched(&config).unwrap_err().to_string();
        assert!(message.contains("newslens analyze"));
        let message = load_raw(&config).unwrap_err().to_string();
        assert!(message.contains("newslens scrape"));
    }
}
