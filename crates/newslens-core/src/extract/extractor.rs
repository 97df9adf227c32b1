use chrono::Utc;
use reqwest::Client;

use super::html::parse_article_html;
use crate::config::AppConfig;
use crate::corpus::Article;
use crate::feed::{build_client, get_bytes, FeedEntry};
use crate::nlp::{FrequencyKeywords, LsaSummarizer};
use crate::outcome::Outcome;
use crate::{Error, Result};

/// Downloads article pages and turns them into corpus records.
///
/// When a page cannot be used the feed entry stands in for it, so a record
/// is only lost when there is no feed entry to fall back on.
pub struct ArticleExtractor {
    client: Client,
    enabled: bool,
    summary_sentences: usize,
    keyword_count: usize,
    summarizer: LsaSummarizer,
    keywords: FrequencyKeywords,
}

impl ArticleExtractor {
    pub fn new(config: &AppConfig) -> Result<Self> {
        Ok(Self::with_client(build_client(&config.sync)?, config))
    }

    pub fn with_client(client: Client, config: &AppConfig) -> Self {
        Self {
            client,
            enabled: config.sync.extract_articles,
            summary_sentences: config.nlp.article_summary_sentences,
            keyword_count: config.nlp.article_keyword_count,
            summarizer: LsaSummarizer::new(),
            keywords: FrequencyKeywords::new(),
        }
    }

    /// Extract one article.
    ///
    /// `Success` carries the parsed page, `Degraded` the record built from
    /// `fallback`, and `Failed` means the page was unusable and there was no
    /// fallback.
    pub async fn extract(
        &self,
        url: &str,
        source: &str,
        fallback: Option<&FeedEntry>,
    ) -> Outcome<Article> {
        if !self.enabled {
            return fallback_outcome(url, source, fallback, "article extraction disabled".into());
        }

        tracing::debug!("Extracting {}", url);
        match self.download(url, source, fallback).await {
            Ok(article) => Outcome::Success(article),
            Err(e) => {
                tracing::warn!("Error scraping {}: {}", url, e);
                fallback_outcome(url, source, fallback, e.to_string())
            }
        }
    }

    async fn download(
        &self,
        url: &str,
        source: &str,
        fallback: Option<&FeedEntry>,
    ) -> Result<Article> {
        let bytes = get_bytes(&self.client, url).await?;
        let html = String::from_utf8_lossy(&bytes);
        self.article_from_html(&html, url, source, fallback)
    }

    /// Build a record from an already downloaded page
    pub fn article_from_html(
        &self,
        html: &str,
        url: &str,
        source: &str,
        fallback: Option<&FeedEntry>,
    ) -> Result<Article> {
        let page = parse_article_html(html);
        if page.text.trim().is_empty() {
            return Err(Error::Extract(format!("no article body found at {}", url)));
        }

        let title = page
            .title
            .or_else(|| fallback.and_then(|entry| entry.title.clone()))
            .unwrap_or_default();
        let published = page
            .published
            .or_else(|| fallback.and_then(|entry| entry.published))
            .unwrap_or_else(Utc::now);
        let summary = self
            .summarizer
            .summarize_sentences(&page.text, self.summary_sentences)
            .join(" ");
        let keywords = self.keywords.top(&page.text, self.keyword_count);

        Ok(Article {
            title,
            text: page.text,
            published,
            summary,
            keywords,
            authors: page.authors,
            url: url.to_string(),
            source: source.to_string(),
        })
    }
}

/// Record built from the feed entry alone
pub fn fallback_article(url: &str, source: &str, entry: &FeedEntry) -> Article {
    Article {
        title: entry.title.clone().unwrap_or_else(|| "No title".to_string()),
        text: entry.summary.clone().unwrap_or_else(|| "No text".to_string()),
        published: entry.published.unwrap_or_else(Utc::now),
        summary: entry.summary.clone().unwrap_or_else(|| "No summary".to_string()),
        keywords: Vec::new(),
        authors: Vec::new(),
        url: entry.link.clone().unwrap_or_else(|| url.to_string()),
        source: source.to_string(),
    }
}

fn fallback_outcome(
    url: &str,
    source: &str,
    fallback: Option<&FeedEntry>,
    reason: String,
) -> Outcome<Article> {
    match fallback {
        Some(entry) => {
            tracing::info!("Falling back to feed summary for {}", url);
            Outcome::degraded(fallback_article(url, source, entry), reason)
        }
        None => Outcome::failed(reason),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn extractor(extract: bool) -> ArticleExtractor {
        let mut config = AppConfig::default();
        config.sync.extract_articles = extract;
        ArticleExtractor::with_client(Client::new(), &config)
    }

    fn entry() -> FeedEntry {
        FeedEntry {
            title: Some("Feed title".to_string()),
            link: Some("https://example.com/story".to_string()),
            published: Some(Utc.with_ymd_and_hms(2024, 2, 1, 6, 0, 0).unwrap()),
            summary: Some("Feed summary text.".to_string()),
        }
    }

    #[test]
    fn test_article_from_html() {
        let html = r#"<html><head><title>Budget passes</title></head><body><article>
            <p>Parliament passed the budget on Friday. The budget raises rail spending.</p>
            <p>Opposition members walked out. Rail unions welcomed the budget.</p>
            </article></body></html>"#;

        let article = extractor(true)
            .article_from_html(html, "https://example.com/budget", "BBC", Some(&entry()))
            .unwrap();

        assert_eq!(article.title, "Budget passes");
        assert_eq!(article.source, "BBC");
        assert_eq!(article.url, "https://example.com/budget");
        assert!(article.text.starts_with("Parliament passed the budget"));
        assert_eq!(article.keywords.first().map(String::as_str), Some("budget"));
        assert!(article.keywords.len() <= 10);
        assert!(!article.summary.is_empty());
        // page has no date, the feed entry's is used
        assert_eq!(article.published, entry().published.unwrap());
    }

    #[test]
    fn test_empty_body_is_an_error() {
        let result = extractor(true).article_from_html(
            "<html><body><div>menu</div></body></html>",
            "https://example.com",
            "BBC",
            None,
        );
        assert!(matches!(result, Err(Error::Extract(_))));
    }

    #[tokio::test]
    async fn test_failure_falls_back_to_feed_entry() {
        let outcome = extractor(true)
            .extract("not a url", "NDTV", Some(&entry()))
            .await;

        assert!(matches!(outcome, Outcome::Degraded { .. }));
        let article = outcome.value().unwrap();
        assert_eq!(article.title, "Feed title");
        assert_eq!(article.text, "Feed summary text.");
        assert_eq!(article.summary, "Feed summary text.");
        assert_eq!(article.url, "https://example.com/story");
        assert_eq!(article.source, "NDTV");
        assert!(article.keywords.is_empty());
        assert!(article.authors.is_empty());
    }

    #[tokio::test]
    async fn test_failure_without_fallback_is_failed() {
        let outcome = extractor(true).extract("not a url", "NDTV", None).await;
        assert!(outcome.is_failed());
    }

    #[tokio::test]
    async fn test_disabled_extraction_uses_feed_entry() {
        let outcome = extractor(false)
            .extract("https://example.com/story", "BBC", Some(&entry()))
            .await;
        assert_eq!(outcome.reason(), Some("article extraction disabled"));
        assert_eq!(outcome.value().map(|a| a.title.as_str()), Some("Feed title"));
    }

    #[test]
    fn test_fallback_defaults() {
        let article = fallback_article("https://example.com/x", "BBC", &FeedEntry::default());
        assert_eq!(article.title, "No title");
        assert_eq!(article.text, "No text");
        assert_eq!(article.summary, "No summary");
        assert_eq!(article.url, "https://example.com/x");
    }
}
