use std::fmt;
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::corpus::{Article, CorpusStore};
use crate::extract::ArticleExtractor;
use crate::feed::{FeedFetcher, SourceEntries};
use crate::nlp::{Enricher, NO_TOPIC};
use crate::outcome::Outcome;
use crate::{Error, Result};

/// Per-source tally of one scrape
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceReport {
    pub name: String,
    /// Feed entries considered
    pub entries: usize,
    /// Full pages extracted
    pub extracted: usize,
    /// Records built from the feed entry instead
    pub fallbacks: usize,
    /// Entries dropped (no link, or nothing usable)
    pub skipped: usize,
}

/// Outcome of a scrape run
#[derive(Debug, Clone, Default)]
pub struct ScrapeReport {
    pub sources: Vec<SourceReport>,
    /// Sources whose feed could not be fetched, with the reason
    pub failures: Vec<(String, String)>,
    pub articles: usize,
    /// Where the raw corpus was written; `None` when nothing was scraped
    pub saved_to: Option<PathBuf>,
}

impl fmt::Display for ScrapeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for source in &self.sources {
            writeln!(
                f,
                "{}: {} entries, {} extracted, {} from feed summary, {} skipped",
                source.name, source.entries, source.extracted, source.fallbacks, source.skipped
            )?;
        }
        for (name, reason) in &self.failures {
            writeln!(f, "{}: failed ({})", name, reason)?;
        }
        match &self.saved_to {
            Some(path) => write!(f, "Saved {} articles to {}", self.articles, path.display()),
            None => write!(f, "No articles scraped"),
        }
    }
}

/// Outcome of an enrichment run
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub articles: usize,
    /// Rows that ended up with the "No topic" label
    pub without_topic: usize,
    pub saved_to: PathBuf,
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Enriched {} articles ({} without topic), saved to {}",
            self.articles,
            self.without_topic,
            self.saved_to.display()
        )
    }
}

/// Turn fetched feed entries into corpus records, one source at a time
pub async fn collect_articles(
    extractor: &ArticleExtractor,
    fetched: Vec<SourceEntries>,
) -> (Vec<Article>, Vec<SourceReport>) {
    let mut articles = Vec::new();
    let mut reports = Vec::new();

    for SourceEntries { source, entries } in fetched {
        tracing::info!("Scraping source: {}", source);
        let mut report = SourceReport {
            name: source.clone(),
            entries: entries.len(),
            ..SourceReport::default()
        };

        for entry in &entries {
            let Some(link) = entry.link.as_deref() else {
                tracing::warn!("Skipping entry without link in {}", source);
                report.skipped += 1;
                continue;
            };

            match extractor.extract(link, &source, Some(entry)).await {
                Outcome::Success(article) => {
                    report.extracted += 1;
                    articles.push(article);
                }
                Outcome::Degraded { value, .. } => {
                    report.fallbacks += 1;
                    articles.push(value);
                }
                Outcome::Failed { reason } => {
                    tracing::warn!("Dropping {}: {}", link, reason);
                    report.skipped += 1;
                }
            }
        }

        reports.push(report);
    }

    (articles, reports)
}

/// Fetch every configured feed and extract its articles
pub async fn scrape_feeds(config: &AppConfig) -> Result<(Vec<Article>, ScrapeReport)> {
    let fetcher = FeedFetcher::new(&config.sync)?;
    let extractor = ArticleExtractor::with_client(fetcher.client().clone(), config);

    let (fetched, failures) = fetcher.fetch_all(&config.feeds).await;
    let (articles, sources) = collect_articles(&extractor, fetched).await;

    let report = ScrapeReport {
        sources,
        failures: failures
            .into_iter()
            .map(|(name, e)| (name, e.to_string()))
            .collect(),
        articles: articles.len(),
        saved_to: None,
    };
    Ok((articles, report))
}

/// Scrape and overwrite the raw corpus. An empty scrape leaves the previous corpus in place.
pub async fn scrape_and_store(config: &AppConfig) -> Result<ScrapeReport> {
    let (articles, mut report) = scrape_feeds(config).await?;

    if articles.is_empty() {
        tracing::warn!("No articles scraped");
        return Ok(report);
    }

    let store = CorpusStore::from_config(config);
    store.write_raw(&articles)?;
    report.saved_to = Some(config.raw_corpus_path());
    Ok(report)
}

/// Enrich the raw corpus and overwrite the enriched corpus
pub async fn run_analysis(config: &AppConfig) -> Result<AnalysisReport> {
    let store = CorpusStore::from_config(config);
    let articles = store.read_raw()?;
    let nlp = config.nlp.clone();

    let enriched = tokio::task::spawn_blocking(move || Enricher::new(&nlp).enrich_all(&articles))
        .await
        .map_err(|e| Error::Other(format!("Enrichment task failed: {}", e)))?;

    store.write_enriched(&enriched)?;

    let report = AnalysisReport {
        articles: enriched.len(),
        without_topic: enriched.iter().filter(|a| a.topics == NO_TOPIC).count(),
        saved_to: config.enriched_corpus_path(),
    };
    tracing::info!("{}", report);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::FeedEntry;
    use tempfile::TempDir;

    fn config(dir: &TempDir) -> AppConfig {
        let mut config = AppConfig::default();
        config.general.data_dir = dir.path().to_path_buf();
        config.sync.extract_articles = false;
        config
    }

    fn entry(title: &str, link: Option<&str>) -> FeedEntry {
        FeedEntry {
            title: Some(title.to_string()),
            link: link.map(str::to_string),
            published: None,
            summary: Some(format!("{} summary.", title)),
        }
    }

    #[tokio::test]
    async fn test_collect_articles_counts_per_source() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir);
        let extractor = ArticleExtractor::new(&config).unwrap();

        let fetched = vec![
            SourceEntries {
                source: "BBC".to_string(),
                entries: vec![
                    entry("One", Some("https://example.com/1")),
                    entry("Two", None),
                ],
            },
            SourceEntries {
                source: "NDTV".to_string(),
                entries: vec![entry("Three", Some("https://example.com/3"))],
            },
        ];

        let (articles, reports) = collect_articles(&extractor, fetched).await;

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[1].source, "NDTV");
        assert_eq!(reports[0].entries, 2);
        assert_eq!(reports[0].fallbacks, 1);
        assert_eq!(reports[0].skipped, 1);
        assert_eq!(reports[1].fallbacks, 1);
    }

    #[tokio::test]
    async fn test_run_analysis_requires_raw_corpus() {
        let dir = TempDir::new().unwrap();
        let result = run_analysis(&config(&dir)).await;
        assert!(matches!(result, Err(Error::CorpusMissing(_))));
    }

    #[tokio::test]
    async fn test_run_analysis_writes_enriched_corpus() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir);
        let store = CorpusStore::from_config(&config);
        store
            .write_raw(&[
                Article::new("u1", "BBC")
                    .with_text("Apple reported strong growth in California.")
                    .with_summary("Apple grew."),
                Article::new("u2", "NDTV"),
            ])
            .unwrap();

        let report = run_analysis(&config).await.unwrap();
        assert_eq!(report.articles, 2);
        assert_eq!(report.without_topic, 1);

        let enriched = store.read_enriched().unwrap();
        assert_eq!(enriched.len(), 2);
        assert_eq!(enriched[1].topics, NO_TOPIC);
    }

    #[test]
    fn test_scrape_report_display() {
        let report = ScrapeReport {
            sources: vec![SourceReport {
                name: "BBC".to_string(),
                entries: 10,
                extracted: 8,
                fallbacks: 2,
                skipped: 0,
            }],
            failures: vec![("NDTV".to_string(), "timeout".to_string())],
            articles: 10,
            saved_to: Some(PathBuf::from("data/articles.csv")),
        };
        let text = report.to_string();
        assert!(text.contains("BBC: 10 entries, 8 extracted, 2 from feed summary"));
        assert!(text.contains("NDTV: failed (timeout)"));
        assert!(text.ends_with("Saved 10 articles to data/articles.csv"));
    }
}
