use std::collections::HashMap;
use std::sync::LazyLock;

use super::text::words;
use super::SentimentAnalyzer;
use crate::outcome::Outcome;

/// Word polarities in [-1, 1]
const LEXICON: &[(&str, f64)] = &[
    // positive
    ("good", 0.7), ("great", 0.8), ("excellent", 1.0), ("best", 1.0), ("better", 0.5),
    ("positive", 0.5), ("strong", 0.4), ("stronger", 0.45), ("success", 0.6),
    ("successful", 0.75), ("win", 0.6), ("wins", 0.6), ("won", 0.5), ("victory", 0.6),
    ("gain", 0.4), ("gains", 0.4), ("gained", 0.4), ("grow", 0.4), ("grows", 0.4),
    ("grew", 0.4), ("growing", 0.35), ("growth", 0.4), ("rise", 0.2), ("rises", 0.2),
    ("rose", 0.2), ("rising", 0.2), ("boost", 0.4), ("boosted", 0.4), ("improve", 0.5),
    ("improved", 0.5), ("improvement", 0.5), ("recover", 0.4), ("recovery", 0.4),
    ("record", 0.2), ("happy", 0.8), ("hope", 0.4), ("hopeful", 0.5), ("optimistic", 0.6),
    ("peace", 0.5), ("peaceful", 0.5), ("safe", 0.5), ("secure", 0.4), ("stable", 0.3),
    ("support", 0.3), ("welcome", 0.6), ("welcomed", 0.6), ("praise", 0.6), ("praised", 0.6),
    ("celebrate", 0.6), ("celebrated", 0.6), ("agreement", 0.3), ("deal", 0.1), ("benefit", 0.4),
    ("benefits", 0.4), ("progress", 0.4), ("historic", 0.3), ("innovative", 0.5),
    ("profit", 0.3), ("profits", 0.3), ("profitable", 0.5), ("rally", 0.4), ("rallied", 0.4),
    ("surge", 0.3), ("surged", 0.3), ("relief", 0.4), ("rescue", 0.3), ("rescued", 0.4),
    ("free", 0.4), ("freed", 0.4), ("love", 0.5), ("beautiful", 0.85), ("wonderful", 1.0),
    ("amazing", 0.6), ("impressive", 1.0), ("nice", 0.6), ("fair", 0.7), ("honest", 0.6),
    ("healthy", 0.5), ("clean", 0.4), ("bright", 0.7), ("easy", 0.43), ("important", 0.4),
    ("significant", 0.375), ("major", 0.06), ("new", 0.14), ("launch", 0.2), ("launched", 0.2),
    ("approve", 0.4), ("approved", 0.4), ("award", 0.5), ("awarded", 0.5), ("boom", 0.4),
    ("thrive", 0.6), ("thriving", 0.6), ("ceasefire", 0.3), ("reform", 0.2), ("upbeat", 0.6),
    // negative
    ("bad", -0.7), ("worse", -0.4), ("worst", -1.0), ("poor", -0.4), ("negative", -0.3),
    ("weak", -0.375), ("weaker", -0.4), ("fail", -0.5), ("failed", -0.5), ("failure", -0.6),
    ("loss", -0.4), ("losses", -0.4), ("lose", -0.4), ("lost", -0.3), ("decline", -0.4),
    ("declined", -0.4), ("fall", -0.2), ("falls", -0.2), ("fell", -0.2), ("drop", -0.2),
    ("dropped", -0.2), ("plunge", -0.5), ("plunged", -0.5), ("slump", -0.5), ("crash", -0.6),
    ("crisis", -0.6), ("war", -0.6), ("attack", -0.6), ("attacks", -0.6), ("attacked", -0.6),
    ("kill", -0.7), ("killed", -0.7), ("killing", -0.7), ("dead", -0.7), ("death", -0.7),
    ("deaths", -0.7), ("die", -0.7), ("died", -0.7), ("injured", -0.5), ("violence", -0.7),
    ("violent", -0.8), ("conflict", -0.5), ("threat", -0.5), ("threatens", -0.5), ("fear", -0.5),
    ("fears", -0.5), ("worried", -0.4), ("worry", -0.4), ("concern", -0.3), ("concerns", -0.3),
    ("danger", -0.6), ("dangerous", -0.6), ("disaster", -0.8), ("tragedy", -0.8),
    ("tragic", -0.75), ("terrible", -1.0), ("horrible", -1.0), ("awful", -1.0), ("sad", -0.5),
    ("angry", -0.5), ("anger", -0.5), ("protest", -0.3), ("protests", -0.3), ("arrest", -0.4),
    ("arrested", -0.4), ("accused", -0.4), ("corruption", -0.6), ("fraud", -0.6),
    ("scandal", -0.6), ("collapse", -0.6), ("collapsed", -0.6), ("recession", -0.6),
    ("inflation", -0.2), ("unemployment", -0.4), ("damage", -0.5), ("damaged", -0.5),
    ("destroyed", -0.7), ("flood", -0.4), ("floods", -0.4), ("earthquake", -0.5),
    ("storm", -0.3), ("fire", -0.3), ("shooting", -0.7), ("bomb", -0.7), ("bombing", -0.8),
    ("terror", -0.8), ("terrorist", -0.8), ("hostage", -0.6), ("warn", -0.3), ("warns", -0.3),
    ("warning", -0.3), ("criticised", -0.4), ("criticized", -0.4), ("criticism", -0.4),
    ("reject", -0.3), ("rejected", -0.3), ("ban", -0.3), ("banned", -0.3), ("illegal", -0.5),
    ("guilty", -0.5), ("wrong", -0.5), ("difficult", -0.5), ("hard", -0.29), ("unsafe", -0.5),
    ("shortage", -0.4), ("poverty", -0.5), ("sick", -0.7), ("disease", -0.5), ("outbreak", -0.5),
    ("pandemic", -0.5), ("suffer", -0.5), ("suffered", -0.5), ("victim", -0.5),
    ("victims", -0.5), ("chaos", -0.7), ("tension", -0.3), ("tensions", -0.3),
];

/// Words that scale the polarity of the following word
const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3), ("really", 1.3), ("extremely", 1.5), ("highly", 1.3), ("deeply", 1.3),
    ("so", 1.2), ("too", 1.2), ("hugely", 1.5), ("slightly", 0.5), ("somewhat", 0.7),
];

/// Negation flips and dampens the polarity of the next sentiment word
const NEGATIONS: &[&str] = &["not", "no", "never", "nor", "without", "cannot"];
const NEGATION_FACTOR: f64 = -0.5;

static POLARITY: LazyLock<HashMap<&'static str, f64>> =
    LazyLock::new(|| LEXICON.iter().copied().collect());

static INTENSITY: LazyLock<HashMap<&'static str, f64>> =
    LazyLock::new(|| INTENSIFIERS.iter().copied().collect());

fn is_negation(word: &str) -> bool {
    NEGATIONS.contains(&word) || word.ends_with("n't")
}

/// Lexicon polarity scorer.
///
/// The score is the mean polarity of the sentiment-bearing words, where a
/// preceding intensifier multiplies and a preceding negation flips and halves
/// the word's polarity. Always clamped to [-1, 1].
#[derive(Debug, Clone, Default)]
pub struct LexiconSentiment;

impl LexiconSentiment {
    pub fn new() -> Self {
        Self
    }

    fn score(&self, text: &str) -> Option<f64> {
        let mut total = 0.0;
        let mut matched = 0usize;
        let mut modifier = 1.0;
        let mut negate = false;

        for token in words(text) {
            let word = token.to_lowercase();

            if is_negation(&word) {
                negate = true;
                continue;
            }
            if let Some(&factor) = INTENSITY.get(word.as_str()) {
                modifier *= factor;
                continue;
            }

            if let Some(&polarity) = POLARITY.get(word.as_str()) {
                let mut value = polarity * modifier;
                if negate {
                    value *= NEGATION_FACTOR;
                }
                total += value.clamp(-1.0, 1.0);
                matched += 1;
            }

            modifier = 1.0;
            negate = false;
        }

        if matched == 0 {
            None
        } else {
            Some((total / matched as f64).clamp(-1.0, 1.0))
        }
    }
}

impl SentimentAnalyzer for LexiconSentiment {
    fn polarity(&self, text: &str) -> Outcome<f64> {
        if text.trim().is_empty() {
            return Outcome::degraded(0.0, "empty text");
        }

        match self.score(text) {
            Some(score) => Outcome::Success(score),
            None => Outcome::Success(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn polarity(text: &str) -> f64 {
        LexiconSentiment::new().polarity(text).into_value_or(f64::NAN)
    }

    #[test]
    fn test_empty_is_neutral() {
        let outcome = LexiconSentiment::new().polarity("");
        assert_eq!(outcome.value(), Some(&0.0));
        assert!(!outcome.is_success());
        assert_eq!(polarity("   "), 0.0);
    }

    #[test]
    fn test_positive_and_negative() {
        assert!(polarity("Apple grew.") > 0.0);
        assert!(polarity("Dozens were killed in a terrible attack") < 0.0);
        assert_eq!(polarity("The meeting is on Tuesday"), 0.0);
    }

    #[test]
    fn test_negation_flips() {
        assert!(polarity("The results were good") > 0.0);
        assert!(polarity("The results were not good") < 0.0);
        assert!(polarity("The results weren't good") < 0.0);
    }

    #[test]
    fn test_intensifier_strengthens() {
        assert!(polarity("a very good year") > polarity("a good year"));
    }

    #[test]
    fn test_always_in_range() {
        let samples = [
            "extremely extremely extremely excellent wonderful best",
            "extremely extremely worst terrible awful horrible",
            "not not not bad",
            "!!!",
            "good bad good bad",
        ];
        for sample in samples {
            let score = polarity(sample);
            assert!((-1.0..=1.0).contains(&score), "{} -> {}", sample, score);
        }
    }
}
