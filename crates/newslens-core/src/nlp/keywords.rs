use std::collections::HashMap;

use super::stopwords::is_keyword_stopword;
use super::KeywordExtractor;
use crate::outcome::Outcome;

/// Most-frequent-words keyword extractor.
///
/// Tokens are whitespace-separated words, lowercased, with surrounding
/// punctuation trimmed. Only purely alphabetic tokens outside the stopword list
/// are counted. Equal counts keep first-appearance order.
#[derive(Debug, Clone, Default)]
pub struct FrequencyKeywords;

impl FrequencyKeywords {
    pub fn new() -> Self {
        Self
    }

    /// Candidate tokens of `text` in order of appearance
    pub fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
        text.split_whitespace().filter_map(|raw| {
            let word = raw
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase();
            let keep = !word.is_empty()
                && word.chars().all(char::is_alphabetic)
                && !is_keyword_stopword(&word);
            keep.then_some(word)
        })
    }

    pub fn top(&self, text: &str, n: usize) -> Vec<String> {
        // word -> (count, first position)
        let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
        for (position, word) in Self::tokens(text).enumerate() {
            counts.entry(word).or_insert((0, position)).0 += 1;
        }

        let mut ranked: Vec<(String, usize, usize)> = counts
            .into_iter()
            .map(|(word, (count, first))| (word, count, first))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

        ranked.into_iter().take(n).map(|(word, _, _)| word).collect()
    }
}

impl KeywordExtractor for FrequencyKeywords {
    fn keywords(&self, text: &str, n: usize) -> Outcome<Vec<String>> {
        if text.trim().is_empty() {
            return Outcome::degraded(Vec::new(), "empty text");
        }

        let keywords = self.top(text, n);
        if keywords.is_empty() {
            Outcome::degraded(keywords, "no content words")
        } else {
            Outcome::Success(keywords)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::stopwords::is_keyword_stopword;

    #[test]
    fn test_orders_by_frequency_then_first_seen() {
        let text = "Rain hit Delhi. Rain flooded roads; traffic stalled. Roads closed, rain continued.";
        let keywords = FrequencyKeywords::new().top(text, 4);
        assert_eq!(keywords, vec!["rain", "roads", "hit", "delhi"]);
    }

    #[test]
    fn test_keyword_properties() {
        let samples = [
            "The quick brown fox jumps over the lazy dog. The dog sleeps!",
            "COVID-19 cases rose 20% in 2021, officials said; officials warned again.",
            "Ünïcode wörds and naïve café owners, café owners everywhere",
            "a an the of",
        ];

        for text in samples {
            for n in [1, 3, 5, 10] {
                let keywords = FrequencyKeywords::new().top(text, n);
                assert!(keywords.len() <= n);

                let counts: Vec<usize> = keywords
                    .iter()
                    .map(|k| FrequencyKeywords::tokens(text).filter(|t| t == k).count())
                    .collect();
                assert!(counts.windows(2).all(|w| w[0] >= w[1]), "{:?}", keywords);

                for keyword in &keywords {
                    assert_eq!(keyword, &keyword.to_lowercase());
                    assert!(keyword.chars().all(char::is_alphabetic));
                    assert!(!is_keyword_stopword(keyword));
                }
            }
        }
    }

    #[test]
    fn test_mixed_tokens_are_dropped() {
        let keywords = FrequencyKeywords::new().top("covid19 g20 summit summit", 5);
        assert_eq!(keywords, vec!["summit"]);
    }

    #[test]
    fn test_empty_and_stopword_only() {
        let extractor = FrequencyKeywords::new();
        let empty = extractor.keywords("", 5);
        assert_eq!(empty.value(), Some(&Vec::new()));

        let stop = extractor.keywords("and the of", 5);
        assert_eq!(stop.value(), Some(&Vec::new()));
        assert!(!stop.is_success());
    }
}
