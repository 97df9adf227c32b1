use std::collections::HashSet;

use super::{
    EntityRecognizer, FrequencyKeywords, GazetteerNer, KeywordExtractor, LdaTopicModel,
    LexiconSentiment, LsaSummarizer, SentimentAnalyzer, Summarizer, TopicModeler, NO_TOPIC,
};
use crate::config::NlpConfig;
use crate::corpus::{Article, EnrichedArticle};
use crate::outcome::Outcome;

/// Derives the five enrichment fields of an article.
///
/// Sentiment is scored on the feed summary, everything else on the full text.
/// Every transform degrades to a neutral value, so enrichment always yields a
/// complete record.
pub struct Enricher {
    sentiment: Box<dyn SentimentAnalyzer>,
    entities: Box<dyn EntityRecognizer>,
    keywords: Box<dyn KeywordExtractor>,
    summarizer: Box<dyn Summarizer>,
    topics: Box<dyn TopicModeler>,
    keyword_count: usize,
    summary_sentences: usize,
    topic_count: usize,
    topic_words: usize,
}

impl Enricher {
    /// Enricher with the built-in analyzers
    pub fn new(config: &NlpConfig) -> Self {
        Self {
            sentiment: Box::new(LexiconSentiment::new()),
            entities: Box::new(GazetteerNer::new()),
            keywords: Box::new(FrequencyKeywords::new()),
            summarizer: Box::new(LsaSummarizer::new()),
            topics: Box::new(LdaTopicModel::new()),
            keyword_count: config.keyword_count,
            summary_sentences: config.summary_sentences,
            topic_count: config.topic_count,
            topic_words: config.topic_words,
        }
    }

    pub fn with_sentiment(mut self, analyzer: impl SentimentAnalyzer + 'static) -> Self {
        self.sentiment = Box::new(analyzer);
        self
    }

    pub fn with_entities(mut self, recognizer: impl EntityRecognizer + 'static) -> Self {
        self.entities = Box::new(recognizer);
        self
    }

    pub fn with_keywords(mut self, extractor: impl KeywordExtractor + 'static) -> Self {
        self.keywords = Box::new(extractor);
        self
    }

    pub fn with_summarizer(mut self, summarizer: impl Summarizer + 'static) -> Self {
        self.summarizer = Box::new(summarizer);
        self
    }

    pub fn with_topics(mut self, modeler: impl TopicModeler + 'static) -> Self {
        self.topics = Box::new(modeler);
        self
    }

    pub fn enrich(&self, article: &Article) -> EnrichedArticle {
        let text = article.text.as_str();

        let sentiment = flatten(
            "sentiment",
            &article.url,
            self.sentiment.polarity(&article.summary),
            0.0,
        )
        .clamp(-1.0, 1.0);

        let entities = flatten(
            "entities",
            &article.url,
            self.entities.entities(text),
            Vec::new(),
        );
        let mut seen = HashSet::new();
        let entities: Vec<String> = entities
            .into_iter()
            .filter(|e| e.label.is_named())
            .filter_map(|e| seen.insert(e.text.clone()).then_some(e.text))
            .collect();

        let top_keywords = flatten(
            "keywords",
            &article.url,
            self.keywords.keywords(text, self.keyword_count),
            Vec::new(),
        );

        let summary_auto = flatten(
            "summary",
            &article.url,
            self.summarizer.summarize(text, self.summary_sentences),
            String::new(),
        );

        let topics = flatten(
            "topics",
            &article.url,
            self.topics.topics(text, self.topic_count, self.topic_words),
            Vec::new(),
        )
        .into_iter()
        .next()
        .unwrap_or_else(|| NO_TOPIC.to_string());

        EnrichedArticle {
            article: article.clone(),
            sentiment,
            entities,
            top_keywords,
            summary_auto,
            topics,
        }
    }

    pub fn enrich_all(&self, articles: &[Article]) -> Vec<EnrichedArticle> {
        tracing::info!("Enriching {} articles", articles.len());
        articles.iter().map(|article| self.enrich(article)).collect()
    }
}

/// Collapse an outcome into the persisted value, logging anything but success
fn flatten<T>(field: &str, url: &str, outcome: Outcome<T>, fallback: T) -> T {
    match &outcome {
        Outcome::Success(_) => {}
        Outcome::Degraded { reason, .. } => {
            tracing::debug!("{} degraded for {}: {}", field, url, reason)
        }
        Outcome::Failed { reason } => tracing::warn!("{} failed for {}: {}", field, url, reason),
    }
    outcome.into_value_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::{Entity, EntityLabel};

    struct FailingTopics;

    impl TopicModeler for FailingTopics {
        fn topics(&self, _: &str, _: usize, _: usize) -> Outcome<Vec<String>> {
            Outcome::failed("model exploded")
        }
    }

    struct RepeatingNer;

    impl EntityRecognizer for RepeatingNer {
        fn entities(&self, _: &str) -> Outcome<Vec<Entity>> {
            let entity = |text: &str, label| Entity {
                text: text.to_string(),
                label,
            };
            Outcome::Success(vec![
                entity("Apple", EntityLabel::Org),
                entity("Monday", EntityLabel::Date),
                entity("Apple", EntityLabel::Org),
                entity("Paris", EntityLabel::Gpe),
            ])
        }
    }

    fn article(text: &str, summary: &str) -> Article {
        Article::new("u1", "BBC").with_text(text).with_summary(summary)
    }

    #[test]
    fn test_enrich_populates_all_fields() {
        let enricher = Enricher::new(&NlpConfig::default());
        let enriched = enricher.enrich(&article(
            "Apple reported strong growth in California. Apple shares rose. Analysts were pleased.",
            "Apple grew.",
        ));

        assert!(enriched.sentiment > 0.0);
        assert!(enriched.entities.contains(&"Apple".to_string()));
        assert_eq!(enriched.top_keywords.first().map(String::as_str), Some("apple"));
        assert!(enriched.top_keywords.len() <= 5);
        assert!(!enriched.summary_auto.is_empty());
        assert_ne!(enriched.topics, NO_TOPIC);
    }

    #[test]
    fn test_empty_text_gets_placeholders() {
        let enriched = Enricher::new(&NlpConfig::default()).enrich(&article("", ""));
        assert_eq!(enriched.sentiment, 0.0);
        assert!(enriched.entities.is_empty());
        assert!(enriched.top_keywords.is_empty());
        assert_eq!(enriched.summary_auto, "");
        assert_eq!(enriched.topics, NO_TOPIC);
    }

    #[test]
    fn test_failed_transform_uses_sentinel() {
        let enricher = Enricher::new(&NlpConfig::default()).with_topics(FailingTopics);
        let enriched = enricher.enrich(&article("Markets rallied today.", ""));
        assert_eq!(enriched.topics, NO_TOPIC);
    }

    #[test]
    fn test_entities_are_named_and_deduplicated() {
        let enricher = Enricher::new(&NlpConfig::default()).with_entities(RepeatingNer);
        let enriched = enricher.enrich(&article("anything", ""));
        assert_eq!(enriched.entities, vec!["Apple", "Paris"]);
    }
}
