use std::collections::{BTreeMap, HashMap};

use crate::corpus::EnrichedArticle;
use crate::nlp::stopwords::is_vectorizer_stopword;
use crate::nlp::text::words;

/// Count of an item and where it was first seen, for stable ranking
fn rank_counts(counts: HashMap<String, (usize, usize)>, n: usize) -> Vec<(String, usize)> {
    let mut ranked: Vec<(String, usize, usize)> = counts
        .into_iter()
        .map(|(item, (count, first))| (item, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked.into_iter().take(n).map(|(item, count, _)| (item, count)).collect()
}

/// Most frequent entities across the corpus
pub fn top_entities<'a>(
    articles: impl IntoIterator<Item = &'a EnrichedArticle>,
    n: usize,
) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    let mut position = 0;
    for article in articles {
        for entity in &article.entities {
            let entity = entity.trim();
            if entity.is_empty() {
                continue;
            }
            counts.entry(entity.to_string()).or_insert((0, position)).0 += 1;
            position += 1;
        }
    }
    rank_counts(counts, n)
}

/// Mean sentiment of each topic label, ordered by label
pub fn average_sentiment_by_topic<'a>(
    articles: impl IntoIterator<Item = &'a EnrichedArticle>,
) -> Vec<(String, f64)> {
    let mut sums: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for article in articles {
        let entry = sums.entry(article.topics.as_str()).or_insert((0.0, 0));
        entry.0 += article.sentiment;
        entry.1 += 1;
    }
    sums.into_iter()
        .map(|(topic, (sum, count))| (topic.to_string(), sum / count as f64))
        .collect()
}

/// Article counts per topic and sentiment value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SentimentTopicMatrix {
    /// Row labels, sorted
    pub topics: Vec<String>,
    /// Column labels: distinct sentiments rounded to two decimals, ascending
    pub sentiments: Vec<f64>,
    /// `counts[row][column]`
    pub counts: Vec<Vec<usize>>,
}

impl SentimentTopicMatrix {
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().flatten().copied().max().unwrap_or(0)
    }
}

/// Scores are rounded to two decimals so that near-equal scores share a column
pub fn sentiment_topic_matrix<'a>(
    articles: impl IntoIterator<Item = &'a EnrichedArticle>,
) -> SentimentTopicMatrix {
    // sentiment keys in hundredths so they order and compare exactly
    let mut cells: BTreeMap<&str, BTreeMap<i64, usize>> = BTreeMap::new();
    let mut columns: Vec<i64> = Vec::new();

    for article in articles {
        let key = (article.sentiment * 100.0).round() as i64;
        *cells
            .entry(article.topics.as_str())
            .or_default()
            .entry(key)
            .or_insert(0) += 1;
        if !columns.contains(&key) {
            columns.push(key);
        }
    }
    columns.sort_unstable();

    let counts = cells
        .values()
        .map(|row| columns.iter().map(|c| row.get(c).copied().unwrap_or(0)).collect())
        .collect();

    SentimentTopicMatrix {
        topics: cells.keys().map(|t| t.to_string()).collect(),
        sentiments: columns.iter().map(|&c| c as f64 / 100.0).collect(),
        counts,
    }
}

/// Most frequent content words in the articles' text
pub fn word_frequencies<'a>(
    articles: impl IntoIterator<Item = &'a EnrichedArticle>,
    n: usize,
) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    let mut position = 0;
    for article in articles {
        for token in words(&article.article.text) {
            let word = token.to_lowercase();
            if word.chars().count() < 3
                || !word.chars().all(char::is_alphabetic)
                || is_vectorizer_stopword(&word)
            {
                continue;
            }
            counts.entry(word).or_insert((0, position)).0 += 1;
            position += 1;
        }
    }
    rank_counts(counts, n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Article;

    fn enriched(text: &str, topic: &str, sentiment: f64, entities: &[&str]) -> EnrichedArticle {
        EnrichedArticle {
            article: Article::new("u", "BBC").with_text(text),
            sentiment,
            entities: entities.iter().map(|e| e.to_string()).collect(),
            top_keywords: Vec::new(),
            summary_auto: String::new(),
            topics: topic.to_string(),
        }
    }

    fn corpus() -> Vec<EnrichedArticle> {
        vec![
            enriched("Floods hit Chennai. Floods spread.", "floods, chennai, spread", -0.4, &["Chennai", "IMD"]),
            enriched("Markets rally as Sensex climbs.", "markets, rally, sensex", 0.5, &["Sensex", "Chennai"]),
            enriched("Markets dip.", "markets, rally, sensex", -0.1, &[" ", "Sensex", "Chennai"]),
        ]
    }

    #[test]
    fn test_top_entities() {
        let corpus = corpus();
        let top = top_entities(&corpus, 2);
        assert_eq!(top, vec![("Chennai".to_string(), 3), ("Sensex".to_string(), 2)]);
    }

    #[test]
    fn test_average_sentiment_by_topic() {
        let corpus = corpus();
        let averages = average_sentiment_by_topic(&corpus);
        assert_eq!(averages.len(), 2);
        assert_eq!(averages[0].0, "floods, chennai, spread");
        assert!((averages[0].1 + 0.4).abs() < 1e-9);
        assert!((averages[1].1 - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_sentiment_topic_matrix() {
        let corpus = corpus();
        let matrix = sentiment_topic_matrix(&corpus);
        assert_eq!(matrix.topics, vec!["floods, chennai, spread", "markets, rally, sensex"]);
        assert_eq!(matrix.sentiments, vec![-0.4, -0.1, 0.5]);
        assert_eq!(matrix.counts, vec![vec![1, 0, 0], vec![0, 1, 1]]);
        assert_eq!(matrix.max_count(), 1);
    }

    #[test]
    fn test_word_frequencies() {
        let corpus = corpus();
        let words = word_frequencies(&corpus, 2);
        assert_eq!(words, vec![("floods".to_string(), 2), ("markets".to_string(), 2)]);
    }

    #[test]
    fn test_empty_corpus() {
        let empty: Vec<EnrichedArticle> = Vec::new();
        assert!(top_entities(&empty, 10).is_empty());
        assert!(average_sentiment_by_topic(&empty).is_empty());
        assert!(sentiment_topic_matrix(&empty).is_empty());
        assert!(word_frequencies(&empty, 10).is_empty());
    }
}
