//! Filtering and aggregate views over the enriched corpus.

mod filter;
mod insights;

pub use filter::{available_sources, ArticleFilter, SENTIMENT_MAX, SENTIMENT_MIN};
pub use insights::{
    average_sentiment_by_topic, sentiment_topic_matrix, top_entities, word_frequencies,
    SentimentTopicMatrix,
};
