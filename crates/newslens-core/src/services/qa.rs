use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::ai::{create_provider, AiProvider};
use crate::config::AppConfig;
use crate::nlp::stopwords::is_stopword;
use crate::nlp::text::{split_sentences, truncate_chars, words};
use crate::nlp::{EntityLabel, GazetteerNer};
use crate::outcome::Outcome;
use crate::{Error, Result};

/// Characters of article text sent to an LLM
const AI_CONTEXT_CHARS: usize = 8000;
/// Shared prefix length for two words to count as the same term
const STEM_PREFIX: usize = 5;

static QUANTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b\d[\d,]*(?:\.\d+)?(?:\s?(?:%|per\s?cent|percent|million|billion|trillion|crore|lakh|thousand|hundred))?",
    )
    .expect("valid quantity regex")
});

static TIME_EXPRESSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:(?:\d{1,2}\s)?(?:January|February|March|April|May|June|July|August|September|October|November|December)(?:\s\d{1,2})?(?:,?\s\d{4})?|(?:Monday|Tuesday|Wednesday|Thursday|Friday|Saturday|Sunday)|(?:1[89]|20)\d{2}|yesterday|today|tomorrow|last (?:week|month|year))\b",
    )
    .expect("valid time regex")
});

/// Answers a question about one article
#[async_trait::async_trait]
pub trait QuestionAnswerer: Send + Sync {
    fn name(&self) -> &str;

    async fn answer(&self, question: &str, context: &str) -> Outcome<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuestionKind {
    Who,
    Where,
    When,
    HowMany,
    Other,
}

impl QuestionKind {
    fn of(question: &str) -> Self {
        let lower = question.trim().to_lowercase();
        if lower.starts_with("who") || lower.starts_with("whom") {
            QuestionKind::Who
        } else if lower.starts_with("where") {
            QuestionKind::Where
        } else if lower.starts_with("when")
            || lower.starts_with("what year")
            || lower.starts_with("what day")
        {
            QuestionKind::When
        } else if lower.starts_with("how many") || lower.starts_with("how much") {
            QuestionKind::HowMany
        } else {
            QuestionKind::Other
        }
    }
}

/// Local extractive answerer.
///
/// Picks the sentence sharing the most content words with the question, then
/// narrows it to a person, place, time or quantity when the question asks for
/// one.
#[derive(Debug, Clone, Default)]
pub struct ExtractiveAnswerer {
    ner: GazetteerNer,
}

impl ExtractiveAnswerer {
    pub fn new() -> Self {
        Self::default()
    }

    fn content_terms(text: &str) -> Vec<String> {
        words(text)
            .map(str::to_lowercase)
            .filter(|w| !is_stopword(w))
            .collect()
    }

    fn overlap(question_terms: &HashSet<String>, sentence: &str) -> usize {
        let terms: HashSet<String> = Self::content_terms(sentence).into_iter().collect();
        question_terms
            .iter()
            .filter(|q| terms.iter().any(|t| same_term(q, t)))
            .count()
    }

    fn narrow(&self, kind: QuestionKind, question: &str, sentence: &str) -> Option<String> {
        let wanted = match kind {
            QuestionKind::Who => &[EntityLabel::Person, EntityLabel::Org][..],
            QuestionKind::Where => &[EntityLabel::Gpe][..],
            QuestionKind::When => {
                return TIME_EXPRESSION
                    .find(sentence)
                    .map(|m| m.as_str().to_string());
            }
            QuestionKind::HowMany => {
                return QUANTITY.find(sentence).map(|m| m.as_str().trim().to_string());
            }
            QuestionKind::Other => return None,
        };

        let entities = self.ner.recognize(sentence);
        wanted.iter().find_map(|label| {
            entities
                .iter()
                .filter(|e| e.label == *label)
                .map(|e| e.text.clone())
                .find(|text| !question.contains(text.as_str()))
        })
    }

    pub fn answer_span(&self, question: &str, context: &str) -> Outcome<String> {
        if question.trim().is_empty() {
            return Outcome::failed("question is empty");
        }
        let sentences = split_sentences(context);
        let Some(first) = sentences.first() else {
            return Outcome::failed("article has no text");
        };

        let question_terms: HashSet<String> = Self::content_terms(question).into_iter().collect();
        let mut best: Option<(usize, &String)> = None;
        for sentence in &sentences {
            let score = Self::overlap(&question_terms, sentence);
            if score > 0 && best.map_or(true, |(top, _)| score > top) {
                best = Some((score, sentence));
            }
        }

        let Some((_, sentence)) = best else {
            return Outcome::degraded(first.clone(), "no sentence matches the question");
        };

        let kind = QuestionKind::of(question);
        match self.narrow(kind, question, sentence) {
            Some(span) => Outcome::Success(span),
            None => Outcome::Success(sentence.clone()),
        }
    }
}

fn same_term(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }
    let prefix = |s: &str| s.chars().take(STEM_PREFIX).collect::<String>();
    a.chars().count() >= STEM_PREFIX && b.chars().count() >= STEM_PREFIX && prefix(a) == prefix(b)
}

#[async_trait::async_trait]
impl QuestionAnswerer for ExtractiveAnswerer {
    fn name(&self) -> &str {
        "extractive"
    }

    async fn answer(&self, question: &str, context: &str) -> Outcome<String> {
        self.answer_span(question, context)
    }
}

/// Question answering through the configured LLM provider
pub struct AiAnswerer {
    provider: Arc<dyn AiProvider>,
}

impl AiAnswerer {
    pub fn new(provider: Arc<dyn AiProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait::async_trait]
impl QuestionAnswerer for AiAnswerer {
    fn name(&self) -> &str {
        self.provider.name()
    }

    async fn answer(&self, question: &str, context: &str) -> Outcome<String> {
        let context = truncate_chars(context, AI_CONTEXT_CHARS);
        match self.provider.answer(question, context).await {
            Ok(answer) if answer.is_empty() => Outcome::failed("model returned an empty answer"),
            Ok(answer) => Outcome::Success(answer),
            Err(e) => Outcome::failed(e.to_string()),
        }
    }
}

/// Answers questions about an article with the configured backend
pub struct QaService {
    answerer: Box<dyn QuestionAnswerer>,
}

impl QaService {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let answerer: Box<dyn QuestionAnswerer> = match config.qa.provider.as_str() {
            "extractive" => Box::new(ExtractiveAnswerer::new()),
            "ai" => Box::new(AiAnswerer::new(create_provider(&config.ai)?)),
            other => return Err(Error::Config(format!("Unknown QA provider: {}", other))),
        };
        Ok(Self::with_answerer(answerer))
    }

    pub fn with_answerer(answerer: Box<dyn QuestionAnswerer>) -> Self {
        Self { answerer }
    }

    pub async fn ask(&self, question: &str, context: &str) -> Outcome<String> {
        if question.trim().is_empty() {
            return Outcome::failed("question is empty");
        }
        if context.trim().is_empty() {
            return Outcome::failed("article has no text");
        }

        tracing::info!("Answering question via {}", self.answerer.name());
        let outcome = self.answerer.answer(question, context).await;
        if let Some(reason) = outcome.reason() {
            let state = if outcome.is_failed() { "failed" } else { "degraded" };
            tracing::warn!("QA {}: {}", state, reason);
        }
        outcome
    }
}
