//! Sentence and word splitting shared by the NLP components.

use std::sync::LazyLock;

use regex::Regex;

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{L}\p{N}]+(?:['’][\p{L}]+)?").expect("valid word regex"));

/// Tokens ending in a period that do not end a sentence
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "st", "sr", "jr", "gen", "col", "lt", "sgt", "capt", "gov",
    "sen", "rep", "rev", "hon", "vs", "etc", "inc", "ltd", "co", "corp", "no", "jan", "feb",
    "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec", "approx", "est",
];

/// Truncate to at most `max_chars` characters without splitting a code point
pub fn truncate_chars(input: &str, max_chars: usize) -> &str {
    match input.char_indices().nth(max_chars) {
        Some((idx, _)) => &input[..idx],
        None => input,
    }
}

/// Word tokens (letters and digits, with inner apostrophes) in order of appearance
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    WORD.find_iter(text).map(|m| m.as_str())
}

/// Split text into sentences, keeping their original order and wording.
///
/// Line breaks always end a sentence. Inside a line a `.`, `!` or `?` ends a
/// sentence when followed by whitespace and a capital letter, digit or quote,
/// unless the period belongs to an abbreviation or an initial.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if !line.is_empty() {
            split_line(line, &mut sentences);
        }
    }
    sentences
}

fn split_line(line: &str, out: &mut Vec<String>) {
    let chars: Vec<(usize, char)> = line.char_indices().collect();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i].1;
        if !matches!(c, '.' | '!' | '?') {
            i += 1;
            continue;
        }

        let mut j = i + 1;
        while j < chars.len() && is_closing(chars[j].1) {
            j += 1;
        }

        let at_end = j >= chars.len();
        let boundary = at_end
            || (chars[j].1.is_whitespace()
                && starts_sentence(&chars[j..])
                && !(c == '.' && ends_with_abbreviation(&line[start..chars[i].0])));

        if boundary {
            let end = if at_end { line.len() } else { chars[j].0 };
            push_sentence(&line[start..end], out);
            start = end;
        }
        i = j;
    }

    if start < line.len() {
        push_sentence(&line[start..], out);
    }
}

fn push_sentence(sentence: &str, out: &mut Vec<String>) {
    let sentence = sentence.trim();
    if !sentence.is_empty() {
        out.push(sentence.to_string());
    }
}

fn is_closing(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '"' | '\'' | ')' | ']' | '”' | '’')
}

fn starts_sentence(rest: &[(usize, char)]) -> bool {
    rest.iter()
        .map(|(_, c)| *c)
        .find(|c| !c.is_whitespace())
        .map(|c| c.is_uppercase() || c.is_numeric() || matches!(c, '"' | '\'' | '“' | '‘' | '('))
        .unwrap_or(false)
}

fn ends_with_abbreviation(prefix: &str) -> bool {
    let Some(last) = prefix.split_whitespace().last() else {
        return false;
    };
    let token = last.trim_start_matches(|c: char| !c.is_alphanumeric());

    // initials and dotted acronyms: "J", "U.S"
    if token.chars().count() == 1 && token.chars().all(char::is_uppercase) {
        return true;
    }
    if token.contains('.') {
        return true;
    }

    let lower = token.to_lowercase();
    ABBREVIATIONS.contains(&lower.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_simple_sentences() {
        let sentences = split_sentences("Markets rose. Oil fell! Why? Nobody knows.");
        assert_eq!(
            sentences,
            vec!["Markets rose.", "Oil fell!", "Why?", "Nobody knows."]
        );
    }

    #[test]
    fn test_split_keeps_abbreviations_and_initials() {
        let sentences =
            split_sentences("Mr. Smith met Dr. Jones in the U.S. on Monday. They talked.");
        assert_eq!(
            sentences,
            vec!["Mr. Smith met Dr. Jones in the U.S. on Monday.", "They talked."]
        );
    }

    #[test]
    fn test_split_on_line_breaks() {
        let sentences = split_sentences("Headline without stop\n\nBody starts here. Second line");
        assert_eq!(
            sentences,
            vec!["Headline without stop", "Body starts here.", "Second line"]
        );
    }

    #[test]
    fn test_lowercase_after_period_is_not_boundary() {
        let sentences = split_sentences("Prices rose 2.5 percent. it was e.g. fine.");
        assert_eq!(sentences, vec!["Prices rose 2.5 percent. it was e.g. fine."]);
    }

    #[test]
    fn test_words() {
        let tokens: Vec<_> = words("Apple's profit, up 5% in 2024!").collect();
        assert_eq!(tokens, vec!["Apple's", "profit", "up", "5", "in", "2024"]);
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("hi", 10), "hi");
    }

    #[test]
    fn test_empty_text() {
        assert!(split_sentences("   \n  ").is_empty());
    }
}
