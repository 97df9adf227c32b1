use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One scraped article, the row of the raw corpus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub text: String,
    pub published: DateTime<Utc>,
    pub summary: String,
    pub keywords: Vec<String>,
    pub authors: Vec<String>,
    /// Natural key of the corpus
    pub url: String,
    pub source: String,
}

impl Article {
    /// Bare record for `url`, everything else empty and published now
    pub fn new(url: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            title: String::new(),
            text: String::new(),
            published: Utc::now(),
            summary: String::new(),
            keywords: Vec::new(),
            authors: Vec::new(),
            url: url.into(),
            source: source.into(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn with_published(mut self, published: DateTime<Utc>) -> Self {
        self.published = published;
        self
    }

    /// First `max_len` characters of the text, with an ellipsis when cut
    pub fn text_preview(&self, max_len: usize) -> String {
        if self.text.chars().count() <= max_len {
            self.text.clone()
        } else {
            let preview: String = self.text.chars().take(max_len).collect();
            format!("{}...", preview)
        }
    }
}

/// An article with the five derived fields of the enrichment pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedArticle {
    pub article: Article,
    /// Polarity of the summary in [-1, 1]
    pub sentiment: f64,
    /// Distinct PERSON, ORG and GPE mentions in first-seen order
    pub entities: Vec<String>,
    pub top_keywords: Vec<String>,
    pub summary_auto: String,
    /// Comma-joined words of the dominant topic, or "No topic"
    pub topics: String,
}

impl EnrichedArticle {
    pub fn source(&self) -> &str {
        &self.article.source
    }

    pub fn url(&self) -> &str {
        &self.article.url
    }

    pub fn title(&self) -> &str {
        &self.article.title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_preview() {
        let article = Article::new("https://example.com/a", "BBC")
            .with_title("Headline")
            .with_text("abcdefghij");

        assert_eq!(article.title, "Headline");
        assert_eq!(article.text_preview(4), "abcd...");
        assert_eq!(article.text_preview(20), "abcdefghij");
        assert!(article.keywords.is_empty());
    }
}
