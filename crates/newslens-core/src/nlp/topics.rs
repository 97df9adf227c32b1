use std::collections::BTreeMap;
use std::sync::LazyLock;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;

use super::stopwords::is_vectorizer_stopword;
use super::TopicModeler;
use crate::outcome::Outcome;

/// Label used when no topic can be derived
pub const NO_TOPIC: &str = "No topic";

const SEED: u64 = 42;
const MAX_ITER: usize = 10;
const MAX_DOC_UPDATES: usize = 100;
const DOC_CONVERGENCE: f64 = 1e-3;
const EPSILON: f64 = 1e-100;

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?u)\b\w\w+\b").expect("valid token regex"));

/// Bag-of-words counts over an alphabetically ordered vocabulary
#[derive(Debug, Clone)]
struct DocumentTerms {
    vocabulary: Vec<String>,
    counts: Vec<f64>,
}

impl DocumentTerms {
    fn from_text(text: &str) -> Self {
        let mut counts: BTreeMap<String, f64> = BTreeMap::new();
        for token in TOKEN.find_iter(text) {
            let term = token.as_str().to_lowercase();
            if !is_vectorizer_stopword(&term) {
                *counts.entry(term).or_insert(0.0) += 1.0;
            }
        }
        let (vocabulary, counts) = counts.into_iter().unzip();
        Self { vocabulary, counts }
    }

    fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }
}

/// Latent Dirichlet allocation fitted per document with batch variational Bayes.
///
/// Priors are `1 / topics` for both the document-topic and topic-word
/// distributions. Initialisation uses a fixed seed so the same text always
/// yields the same topics.
#[derive(Debug, Clone, Default)]
pub struct LdaTopicModel;

impl LdaTopicModel {
    pub fn new() -> Self {
        Self
    }

    /// Fit on `text` and return the topic-word weights, one row per topic
    fn fit(&self, terms: &DocumentTerms, topic_count: usize) -> Vec<Vec<f64>> {
        let k = topic_count.max(1);
        let v = terms.vocabulary.len();
        let prior = 1.0 / k as f64;
        let mut rng = StdRng::seed_from_u64(SEED);

        let mut lambda: Vec<Vec<f64>> = (0..k)
            .map(|_| (0..v).map(|_| 0.9 + 0.2 * rng.random::<f64>()).collect())
            .collect();

        for _ in 0..MAX_ITER {
            let exp_elog_beta: Vec<Vec<f64>> = lambda
                .iter()
                .map(|row| exp_dirichlet_expectation(row))
                .collect();

            // E-step for the single document
            let mut gamma = vec![1.0; k];
            let mut exp_elog_theta = exp_dirichlet_expectation(&gamma);
            let mut phi_norm = vec![0.0; v];

            for _ in 0..MAX_DOC_UPDATES {
                for w in 0..v {
                    phi_norm[w] = topic_mixture(&exp_elog_theta, &exp_elog_beta, w);
                }
                let previous = gamma.clone();
                for t in 0..k {
                    let weighted: f64 = (0..v)
                        .map(|w| terms.counts[w] / phi_norm[w] * exp_elog_beta[t][w])
                        .sum();
                    gamma[t] = prior + exp_elog_theta[t] * weighted;
                }
                exp_elog_theta = exp_dirichlet_expectation(&gamma);

                let change = gamma
                    .iter()
                    .zip(&previous)
                    .map(|(a, b)| (a - b).abs())
                    .sum::<f64>()
                    / k as f64;
                if change < DOC_CONVERGENCE {
                    break;
                }
            }

            for w in 0..v {
                phi_norm[w] = topic_mixture(&exp_elog_theta, &exp_elog_beta, w);
            }

            // M-step
            for t in 0..k {
                for w in 0..v {
                    let sstat = exp_elog_theta[t] * terms.counts[w] / phi_norm[w];
                    lambda[t][w] = prior + sstat * exp_elog_beta[t][w];
                }
            }
        }

        lambda
    }

    /// Top `word_count` terms of each topic joined with ", "
    pub fn describe(&self, text: &str, topic_count: usize, word_count: usize) -> Vec<String> {
        let terms = DocumentTerms::from_text(text);
        if terms.is_empty() {
            return Vec::new();
        }

        self.fit(&terms, topic_count)
            .iter()
            .map(|weights| {
                let mut order: Vec<usize> = (0..weights.len()).collect();
                // stable: equal weights stay alphabetical
                order.sort_by(|&a, &b| weights[b].total_cmp(&weights[a]));
                order
                    .into_iter()
                    .take(word_count)
                    .map(|i| terms.vocabulary[i].as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .collect()
    }
}

impl TopicModeler for LdaTopicModel {
    fn topics(&self, text: &str, topic_count: usize, word_count: usize) -> Outcome<Vec<String>> {
        if text.trim().is_empty() {
            return Outcome::degraded(vec![NO_TOPIC.to_string()], "empty text");
        }

        let topics = self.describe(text, topic_count, word_count);
        if topics.is_empty() {
            Outcome::degraded(vec![NO_TOPIC.to_string()], "empty vocabulary")
        } else {
            Outcome::Success(topics)
        }
    }
}

fn topic_mixture(theta: &[f64], beta: &[Vec<f64>], word: usize) -> f64 {
    theta
        .iter()
        .zip(beta)
        .map(|(t, row)| t * row[word])
        .sum::<f64>()
        + EPSILON
}

/// exp(E[log x]) for x ~ Dirichlet(alpha)
fn exp_dirichlet_expectation(alpha: &[f64]) -> Vec<f64> {
    let total = digamma(alpha.iter().sum());
    alpha.iter().map(|&a| (digamma(a) - total).exp()).collect()
}

/// Digamma via recurrence and the asymptotic series
fn digamma(mut x: f64) -> f64 {
    let mut result = 0.0;
    while x < 6.0 {
        result -= 1.0 / x;
        x += 1.0;
    }
    let inv = 1.0 / x;
    let inv2 = inv * inv;
    let series = inv2
        * (1.0 / 12.0
            - inv2 * (1.0 / 120.0 - inv2 * (1.0 / 252.0 - inv2 * (1.0 / 240.0 - inv2 / 132.0))));
    result + x.ln() - 0.5 * inv - series
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digamma_known_values() {
        // digamma(1) = -euler_gamma
        assert!((digamma(1.0) + 0.5772156649).abs() < 1e-8);
        assert!((digamma(0.5) + 1.9635100260).abs() < 1e-8);
        assert!((digamma(10.0) - 2.2517525891).abs() < 1e-8);
    }

    #[test]
    fn test_single_topic_follows_term_frequency() {
        let text = "Cricket fans cheered as cricket returned. The cricket board thanked fans. Stadium opened.";
        let outcome = LdaTopicModel::new().topics(text, 1, 3);
        let topics = outcome.value().cloned().unwrap_or_default();
        assert_eq!(topics.len(), 1);

        let words: Vec<&str> = topics[0].split(", ").collect();
        assert_eq!(words.len(), 3);
        assert_eq!(words[0], "cricket");
        assert_eq!(words[1], "fans");
    }

    #[test]
    fn test_topic_words_are_vocabulary_terms() {
        let text = "Parliament debated the budget bill while ministers defended spending on rail.";
        let topics = LdaTopicModel::new().describe(text, 2, 3);
        assert_eq!(topics.len(), 2);
        for topic in topics {
            for word in topic.split(", ") {
                assert!(text.to_lowercase().contains(word));
                assert!(!is_vectorizer_stopword(word));
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let text = "Floods hit the coast. Rescue teams moved residents inland as floods spread.";
        let model = LdaTopicModel::new();
        assert_eq!(model.describe(text, 1, 3), model.describe(text, 1, 3));
    }

    #[test]
    fn test_no_topic_cases() {
        let model = LdaTopicModel::new();

        let empty = model.topics("   ", 1, 3);
        assert_eq!(empty.value(), Some(&vec![NO_TOPIC.to_string()]));
        assert!(!empty.is_success());

        let stopwords_only = model.topics("the and of a I", 1, 3);
        assert_eq!(stopwords_only.value(), Some(&vec![NO_TOPIC.to_string()]));
    }

    #[test]
    fn test_fewer_terms_than_requested() {
        let topics = LdaTopicModel::new().describe("Budget approved", 1, 3);
        assert_eq!(topics.len(), 1);
        let mut words: Vec<&str> = topics[0].split(", ").collect();
        words.sort_unstable();
        assert_eq!(words, vec!["approved", "budget"]);
    }
}
