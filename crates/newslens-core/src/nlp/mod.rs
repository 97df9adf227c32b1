//! Text analysis used to enrich scraped articles.
//!
//! Each transform sits behind a small trait so the enrichment engine can be
//! built from any combination of implementations. Transforms never fail hard:
//! degenerate input yields a neutral value wrapped in [`Outcome`].

mod engine;
mod entities;
mod keywords;
mod sentiment;
pub mod stopwords;
mod summarize;
pub mod text;
mod topics;

pub use engine::Enricher;
pub use entities::{Entity, EntityLabel, GazetteerNer};
pub use keywords::FrequencyKeywords;
pub use sentiment::LexiconSentiment;
pub use summarize::LsaSummarizer;
pub use topics::{LdaTopicModel, NO_TOPIC};

use crate::outcome::Outcome;

/// Polarity scoring in [-1, 1]
pub trait SentimentAnalyzer: Send + Sync {
    fn polarity(&self, text: &str) -> Outcome<f64>;
}

/// Named entity recognition
pub trait EntityRecognizer: Send + Sync {
    fn entities(&self, text: &str) -> Outcome<Vec<Entity>>;
}

/// Ranked keyword extraction
pub trait KeywordExtractor: Send + Sync {
    /// At most `n` keywords, most significant first
    fn keywords(&self, text: &str, n: usize) -> Outcome<Vec<String>>;
}

/// Extractive summarization
pub trait Summarizer: Send + Sync {
    /// Up to `sentence_count` sentences in their original order, joined by a space
    fn summarize(&self, text: &str, sentence_count: usize) -> Outcome<String>;
}

/// Topic modelling
pub trait TopicModeler: Send + Sync {
    /// One label per topic, each the topic's top `word_count` words joined by ", "
    fn topics(&self, text: &str, topic_count: usize, word_count: usize) -> Outcome<Vec<String>>;
}
