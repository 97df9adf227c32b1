use crate::corpus::EnrichedArticle;

pub const SENTIMENT_MIN: f64 = -1.0;
pub const SENTIMENT_MAX: f64 = 1.0;

/// Distinct sources in order of first appearance
pub fn available_sources(articles: &[EnrichedArticle]) -> Vec<String> {
    let mut sources: Vec<String> = Vec::new();
    for article in articles {
        if !sources.iter().any(|s| s == article.source()) {
            sources.push(article.source().to_string());
        }
    }
    sources
}

/// Source and sentiment selection applied to the enriched corpus.
///
/// A row passes when its source is selected and its sentiment lies in the
/// inclusive range `[min, max]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleFilter {
    selected_sources: Vec<String>,
    min_sentiment: f64,
    max_sentiment: f64,
}

impl ArticleFilter {
    pub fn new(selected_sources: Vec<String>, min_sentiment: f64, max_sentiment: f64) -> Self {
        let mut filter = Self {
            selected_sources,
            min_sentiment: SENTIMENT_MIN,
            max_sentiment: SENTIMENT_MAX,
        };
        filter.set_range(min_sentiment, max_sentiment);
        filter
    }

    /// Every source of `articles`, full sentiment range
    pub fn select_all(articles: &[EnrichedArticle]) -> Self {
        Self::new(available_sources(articles), SENTIMENT_MIN, SENTIMENT_MAX)
    }

    pub fn selected_sources(&self) -> &[String] {
        &self.selected_sources
    }

    pub fn range(&self) -> (f64, f64) {
        (self.min_sentiment, self.max_sentiment)
    }

    pub fn is_selected(&self, source: &str) -> bool {
        self.selected_sources.iter().any(|s| s == source)
    }

    pub fn toggle_source(&mut self, source: &str) {
        if let Some(pos) = self.selected_sources.iter().position(|s| s == source) {
            self.selected_sources.remove(pos);
        } else {
            self.selected_sources.push(source.to_string());
        }
    }

    /// Set the range, clamped to [-1, 1]; bounds are swapped if given in reverse
    pub fn set_range(&mut self, min: f64, max: f64) {
        let min = min.clamp(SENTIMENT_MIN, SENTIMENT_MAX);
        let max = max.clamp(SENTIMENT_MIN, SENTIMENT_MAX);
        (self.min_sentiment, self.max_sentiment) = if min <= max { (min, max) } else { (max, min) };
    }

    /// Move the lower bound by `delta`, never past the upper bound
    pub fn shift_min(&mut self, delta: f64) {
        let min = round2(self.min_sentiment + delta).min(self.max_sentiment);
        self.set_range(min, self.max_sentiment);
    }

    /// Move the upper bound by `delta`, never below the lower bound
    pub fn shift_max(&mut self, delta: f64) {
        let max = round2(self.max_sentiment + delta).max(self.min_sentiment);
        self.set_range(self.min_sentiment, max);
    }

    pub fn matches(&self, article: &EnrichedArticle) -> bool {
        self.is_selected(article.source())
            && article.sentiment >= self.min_sentiment
            && article.sentiment <= self.max_sentiment
    }

    pub fn apply<'a>(&self, articles: &'a [EnrichedArticle]) -> Vec<&'a EnrichedArticle> {
        articles.iter().filter(|a| self.matches(a)).collect()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Article;

    fn enriched(url: &str, source: &str, sentiment: f64) -> EnrichedArticle {
        EnrichedArticle {
            article: Article::new(url, source),
            sentiment,
            entities: Vec::new(),
            top_keywords: Vec::new(),
            summary_auto: String::new(),
            topics: String::new(),
        }
    }

    fn corpus() -> Vec<EnrichedArticle> {
        vec![
            enriched("b1", "BBC", -0.5),
            enriched("b2", "BBC", 0.8),
            enriched("n1", "NDTV", -0.5),
            enriched("n2", "NDTV", 0.8),
        ]
    }

    #[test]
    fn test_source_and_range_filter() {
        let corpus = corpus();
        let filter = ArticleFilter::new(vec!["BBC".to_string()], 0.0, 1.0);
        let urls: Vec<&str> = filter.apply(&corpus).iter().map(|a| a.url()).collect();
        assert_eq!(urls, vec!["b2"]);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let corpus = corpus();
        let filter = ArticleFilter::new(vec!["BBC".to_string(), "NDTV".to_string()], -0.5, 0.8);
        assert_eq!(filter.apply(&corpus).len(), 4);
    }

    #[test]
    fn test_select_all_defaults() {
        let corpus = corpus();
        let filter = ArticleFilter::select_all(&corpus);
        assert_eq!(filter.selected_sources(), ["BBC", "NDTV"]);
        assert_eq!(filter.range(), (-1.0, 1.0));
        assert_eq!(filter.apply(&corpus).len(), 4);
    }

    #[test]
    fn test_toggle_and_shift() {
        let corpus = corpus();
        let mut filter = ArticleFilter::select_all(&corpus);

        filter.toggle_source("NDTV");
        assert!(!filter.is_selected("NDTV"));
        filter.toggle_source("NDTV");
        assert!(filter.is_selected("NDTV"));

        for _ in 0..30 {
            filter.shift_min(0.1);
        }
        assert_eq!(filter.range(), (1.0, 1.0));

        filter.shift_max(-0.5);
        assert_eq!(filter.range(), (1.0, 1.0));
        filter.shift_min(-0.25);
        assert_eq!(filter.range(), (0.75, 1.0));
    }

    #[test]
    fn test_range_is_clamped_and_ordered() {
        let filter = ArticleFilter::new(Vec::new(), 3.0, -7.0);
        assert_eq!(filter.range(), (-1.0, 1.0));
    }
}
