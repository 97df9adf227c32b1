use std::collections::HashMap;

use super::stopwords::is_stopword;
use super::text::{split_sentences, words};
use super::Summarizer;
use crate::outcome::Outcome;

/// Latent dimensions kept when scoring sentences
const DIMENSIONS: usize = 3;
const POWER_ITERATIONS: usize = 100;
const TF_SMOOTHING: f64 = 0.4;

/// Latent semantic analysis summarizer.
///
/// Builds a term-by-sentence matrix of smoothed term frequencies, takes its
/// leading singular vectors and ranks each sentence by the length of its
/// projection onto them, weighted by singular value. The best sentences are
/// returned in their original order.
#[derive(Debug, Clone, Default)]
pub struct LsaSummarizer;

impl LsaSummarizer {
    pub fn new() -> Self {
        Self
    }

    /// Rank of each sentence; higher is more central
    fn sentence_ranks(&self, sentences: &[String]) -> Vec<f64> {
        let matrix = term_sentence_matrix(sentences);
        if matrix.is_empty() {
            return vec![0.0; sentences.len()];
        }

        let gram = gram_matrix(&matrix, sentences.len());
        let components = leading_eigenpairs(gram, DIMENSIONS.min(sentences.len()));

        (0..sentences.len())
            .map(|j| {
                components
                    .iter()
                    .map(|(value, vector)| value * vector[j] * vector[j])
                    .sum::<f64>()
                    .sqrt()
            })
            .collect()
    }

    pub fn summarize_sentences(&self, text: &str, count: usize) -> Vec<String> {
        let sentences = split_sentences(text);
        if sentences.len() <= count {
            return sentences;
        }

        let ranks = self.sentence_ranks(&sentences);
        let mut order: Vec<usize> = (0..sentences.len()).collect();
        // best first, ties keep the earlier sentence
        order.sort_by(|&a, &b| ranks[b].total_cmp(&ranks[a]).then(a.cmp(&b)));

        let mut chosen: Vec<usize> = order.into_iter().take(count).collect();
        chosen.sort_unstable();
        chosen.into_iter().map(|i| sentences[i].clone()).collect()
    }
}

impl Summarizer for LsaSummarizer {
    fn summarize(&self, text: &str, sentence_count: usize) -> Outcome<String> {
        if text.trim().is_empty() {
            return Outcome::degraded(String::new(), "empty text");
        }
        Outcome::Success(self.summarize_sentences(text, sentence_count).join(" "))
    }
}

/// Rows are terms, columns are sentences
fn term_sentence_matrix(sentences: &[String]) -> Vec<Vec<f64>> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<HashMap<usize, f64>> = Vec::with_capacity(sentences.len());

    for sentence in sentences {
        let mut column = HashMap::new();
        for token in words(sentence) {
            let term = token.to_lowercase();
            if is_stopword(&term) || !term.chars().any(char::is_alphabetic) {
                continue;
            }
            let next = index.len();
            let row = *index.entry(term).or_insert(next);
            *column.entry(row).or_insert(0.0) += 1.0;
        }
        counts.push(column);
    }

    let mut matrix = vec![vec![0.0; sentences.len()]; index.len()];
    for (col, column) in counts.into_iter().enumerate() {
        let max = column.values().copied().fold(0.0, f64::max);
        if max == 0.0 {
            continue;
        }
        for (row, count) in column {
            matrix[row][col] = TF_SMOOTHING + (1.0 - TF_SMOOTHING) * count / max;
        }
    }
    matrix
}

/// AᵀA: sentence-by-sentence inner products
fn gram_matrix(matrix: &[Vec<f64>], n: usize) -> Vec<Vec<f64>> {
    let mut gram = vec![vec![0.0; n]; n];
    for row in matrix {
        for i in 0..n {
            if row[i] == 0.0 {
                continue;
            }
            for j in 0..n {
                gram[i][j] += row[i] * row[j];
            }
        }
    }
    gram
}

/// Leading eigenpairs of a symmetric positive semi-definite matrix by power
/// iteration with deflation. Eigenvalues are the squared singular values.
fn leading_eigenpairs(mut matrix: Vec<Vec<f64>>, k: usize) -> Vec<(f64, Vec<f64>)> {
    let n = matrix.len();
    let mut pairs = Vec::with_capacity(k);

    for component in 0..k {
        // deterministic start, varied per component to avoid orthogonal starts
        let mut vector: Vec<f64> = (0..n)
            .map(|i| 1.0 + ((i + component) % (n + 1)) as f64 / n as f64)
            .collect();
        normalize(&mut vector);

        let mut value = 0.0;
        for _ in 0..POWER_ITERATIONS {
            let mut next = multiply(&matrix, &vector);
            let norm = normalize(&mut next);
            if norm == 0.0 {
                return pairs;
            }
            let converged = next
                .iter()
                .zip(&vector)
                .all(|(a, b)| (a - b).abs() < 1e-10);
            vector = next;
            value = norm;
            if converged {
                break;
            }
        }

        if value <= 1e-12 {
            break;
        }

        for i in 0..n {
            for j in 0..n {
                matrix[i][j] -= value * vector[i] * vector[j];
            }
        }
        pairs.push((value, vector));
    }

    pairs
}

fn multiply(matrix: &[Vec<f64>], vector: &[f64]) -> Vec<f64> {
    matrix
        .iter()
        .map(|row| row.iter().zip(vector).map(|(a, b)| a * b).sum())
        .collect()
}

fn normalize(vector: &mut [f64]) -> f64 {
    let norm = vector.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm > 0.0 {
        vector.iter_mut().for_each(|v| *v /= norm);
    }
    norm
}
