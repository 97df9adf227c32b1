use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use super::stopwords::is_stopword;
use super::text::{split_sentences, words};
use super::EntityRecognizer;
use crate::outcome::Outcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityLabel {
    Person,
    Org,
    /// Geo-political entity: country, state or city
    Gpe,
    Date,
}

impl EntityLabel {
    /// Labels kept on enriched articles
    pub fn is_named(self) -> bool {
        matches!(self, EntityLabel::Person | EntityLabel::Org | EntityLabel::Gpe)
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityLabel::Person => "PERSON",
            EntityLabel::Org => "ORG",
            EntityLabel::Gpe => "GPE",
            EntityLabel::Date => "DATE",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
}

const PLACES: &[&str] = &[
    // countries
    "Afghanistan", "Argentina", "Australia", "Austria", "Bangladesh", "Belgium", "Brazil",
    "Britain", "Canada", "Chile", "China", "Colombia", "Cuba", "Denmark", "Egypt", "England",
    "Ethiopia", "Europe", "Finland", "France", "Gaza", "Germany", "Greece", "Haiti", "Hungary",
    "India", "Indonesia", "Iran", "Iraq", "Ireland", "Israel", "Italy", "Japan", "Jordan",
    "Kenya", "Lebanon", "Libya", "Malaysia", "Mexico", "Myanmar", "Nepal", "Netherlands",
    "New Zealand", "Nigeria", "North Korea", "Norway", "Pakistan", "Palestine", "Peru",
    "Philippines", "Poland", "Portugal", "Qatar", "Russia", "Saudi Arabia", "Scotland",
    "Singapore", "South Africa", "South Korea", "Spain", "Sri Lanka", "Sudan", "Sweden",
    "Switzerland", "Syria", "Taiwan", "Thailand", "Turkey", "Ukraine", "United Kingdom",
    "United States", "UK", "US", "USA", "Venezuela", "Vietnam", "Wales", "Yemen",
    // states and regions
    "Andhra Pradesh", "Assam", "Bihar", "California", "Florida", "Gujarat", "Haryana",
    "Karnataka", "Kashmir", "Kerala", "Madhya Pradesh", "Maharashtra", "Manipur", "Odisha",
    "Punjab", "Rajasthan", "Tamil Nadu", "Telangana", "Texas", "Uttar Pradesh", "West Bengal",
    "Crimea", "Donbas", "West Bank",
    // cities
    "Ahmedabad", "Amsterdam", "Athens", "Bangkok", "Beijing", "Beirut", "Bengaluru", "Berlin",
    "Brussels", "Cairo", "Chennai", "Delhi", "Dhaka", "Dubai", "Geneva", "Hong Kong",
    "Hyderabad", "Islamabad", "Istanbul", "Jerusalem", "Kabul", "Karachi", "Kolkata", "Kyiv",
    "Lagos", "Lahore", "London", "Los Angeles", "Madrid", "Moscow", "Mumbai", "Nairobi",
    "New Delhi", "New York", "Paris", "Rome", "Seoul", "Shanghai", "Sydney", "Tehran",
    "Tel Aviv", "Tokyo", "Toronto", "Vienna", "Washington",
];

const ORGANISATIONS: &[&str] = &[
    "Apple", "Amazon", "Google", "Alphabet", "Microsoft", "Meta", "Facebook", "Tesla", "Nvidia",
    "Intel", "Samsung", "Sony", "Toyota", "Boeing", "Airbus", "Reuters", "BBC", "NDTV", "CNN",
    "Infosys", "Tata", "Reliance", "Adani", "OpenAI", "Twitter", "Netflix", "Uber", "IBM",
    "United Nations", "European Union", "World Bank", "World Health Organization", "Nato",
    "NATO", "UN", "EU", "WHO", "IMF", "BJP", "Congress", "Pentagon", "Kremlin", "Parliament",
    "Supreme Court", "Hamas", "Hezbollah", "Taliban", "Fifa", "FIFA", "Isro", "ISRO",
];

/// Trailing words that mark a phrase as an organisation
const ORG_SUFFIXES: &[&str] = &[
    "Inc", "Corp", "Corporation", "Ltd", "Limited", "Company", "Group", "Bank", "Party",
    "Ministry", "Department", "University", "College", "Council", "Association", "Agency",
    "Court", "Police", "Army", "Commission", "Committee", "Organisation", "Organization",
    "Federation", "Union", "Institute", "Foundation", "Authority", "Board", "Airlines", "Times",
    "Post", "News",
];

/// Words that precede a person's name
const PERSON_TITLES: &[&str] = &[
    "Mr", "Mrs", "Ms", "Dr", "Prof", "President", "Prime", "Minister", "Chancellor", "Senator",
    "Sen", "Governor", "Gov", "Judge", "Justice", "King", "Queen", "Prince", "Princess", "Pope",
    "General", "Gen", "Chief", "Secretary", "Mayor", "Ambassador", "CEO", "Sir", "Lady",
    "Lord", "Captain", "Coach",
];

const MONTHS_AND_DAYS: &[&str] = &[
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday",
    "Saturday", "Sunday",
];

/// Lowercase words allowed inside a capitalised phrase ("Bank of England")
const CONNECTORS: &[&str] = &["of", "de", "for"];

static PLACE_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| PLACES.iter().copied().collect());
static ORG_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ORGANISATIONS.iter().copied().collect());

/// Rule-based named entity recognizer.
///
/// Capitalised phrases are matched against place and organisation gazetteers,
/// organisation suffixes, acronyms and person titles. Multi-word capitalised
/// phrases that match nothing else are taken as person names.
#[derive(Debug, Clone, Default)]
pub struct GazetteerNer;

impl GazetteerNer {
    pub fn new() -> Self {
        Self
    }

    /// All recognised entities in order of first appearance, including dates
    pub fn recognize(&self, text: &str) -> Vec<Entity> {
        let mut entities = Vec::new();
        for sentence in split_sentences(text) {
            self.recognize_sentence(&sentence, &mut entities);
        }
        entities
    }

    fn recognize_sentence(&self, sentence: &str, out: &mut Vec<Entity>) {
        let tokens: Vec<&str> = words(sentence).collect();
        let mut i = 0;

        while i < tokens.len() {
            if !is_capitalised(tokens[i]) {
                i += 1;
                continue;
            }

            // Longest capitalised run, allowing connectors between capitalised words
            let mut end = i + 1;
            while end < tokens.len() {
                if is_capitalised(tokens[end]) {
                    end += 1;
                } else if CONNECTORS.contains(&tokens[end])
                    && end + 1 < tokens.len()
                    && is_capitalised(tokens[end + 1])
                {
                    end += 2;
                } else {
                    break;
                }
            }

            let run: Vec<&str> = tokens[i..end].iter().map(|t| strip_possessive(t)).collect();
            self.classify_run(&run, i == 0, out);
            i = end;
        }
    }

    fn classify_run(&self, run: &[&str], sentence_start: bool, out: &mut Vec<Entity>) {
        // Drop leading titles and sentence-initial function words ("The", "In")
        let mut start = 0;
        let mut titled = false;
        while start < run.len() {
            let word = run[start];
            if PERSON_TITLES.contains(&word) {
                titled = true;
                start += 1;
            } else if (sentence_start || start > 0 || run.len() > 1)
                && lookup(word).is_none()
                && is_stopword(&word.to_lowercase())
            {
                start += 1;
            } else {
                break;
            }
        }
        let run = &run[start..];
        if run.is_empty() {
            return;
        }

        let phrase = run.join(" ");

        if let Some(label) = lookup(&phrase) {
            push_entity(out, phrase, label);
            return;
        }

        if run.len() == 1 {
            let word = run[0];
            if titled {
                push_entity(out, phrase, EntityLabel::Person);
            } else if is_acronym(word) {
                push_entity(out, phrase, EntityLabel::Org);
            }
            // lone capitalised words are too ambiguous to label
            return;
        }

        // "Reserve Bank", "Ministry of Defence"
        if run.last().is_some_and(|w| ORG_SUFFIXES.contains(w))
            || (run.len() > 2 && ORG_SUFFIXES.contains(&run[0]) && CONNECTORS.contains(&run[1]))
        {
            push_entity(out, phrase, EntityLabel::Org);
            return;
        }

        // A known place or organisation inside a longer run is labelled on its own
        let known: Vec<(String, EntityLabel)> = run
            .iter()
            .filter_map(|w| lookup(w).map(|label| (w.to_string(), label)))
            .collect();
        if !known.is_empty() && !titled {
            for (text, label) in known {
                push_entity(out, text, label);
            }
            return;
        }

        if run.len() <= 4 && run.iter().all(|w| !is_acronym(w)) {
            push_entity(out, phrase, EntityLabel::Person);
        }
    }
}

fn lookup(phrase: &str) -> Option<EntityLabel> {
    if PLACE_SET.contains(phrase) {
        Some(EntityLabel::Gpe)
    } else if ORG_SET.contains(phrase) {
        Some(EntityLabel::Org)
    } else if MONTHS_AND_DAYS.contains(&phrase) {
        Some(EntityLabel::Date)
    } else {
        None
    }
}

fn push_entity(out: &mut Vec<Entity>, text: String, label: EntityLabel) {
    out.push(Entity { text, label });
}

fn is_capitalised(token: &str) -> bool {
    token.chars().next().is_some_and(char::is_uppercase)
}

fn is_acronym(token: &str) -> bool {
    let len = token.chars().count();
    (2..=6).contains(&len) && token.chars().all(|c| c.is_uppercase())
}

fn strip_possessive(token: &str) -> &str {
    token
        .strip_suffix("'s")
        .or_else(|| token.strip_suffix("’s"))
        .unwrap_or(token)
}

impl EntityRecognizer for GazetteerNer {
    fn entities(&self, text: &str) -> Outcome<Vec<Entity>> {
        if text.trim().is_empty() {
            return Outcome::degraded(Vec::new(), "empty text");
        }
        Outcome::Success(self.recognize(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(text: &str) -> Vec<(String, EntityLabel)> {
        GazetteerNer::new()
            .recognize(text)
            .into_iter()
            .filter(|e| e.label.is_named())
            .map(|e| (e.text, e.label))
            .collect()
    }

    #[test]
    fn test_org_and_place() {
        let found = named("Apple reported strong growth in California.");
        assert!(found.contains(&("Apple".to_string(), EntityLabel::Org)));
        assert!(found.contains(&("California".to_string(), EntityLabel::Gpe)));
    }

    #[test]
    fn test_person_with_title_and_full_name() {
        let found = named("Prime Minister Narendra Modi met Joe Biden in New Delhi on Monday.");
        assert!(found.contains(&("Narendra Modi".to_string(), EntityLabel::Person)));
        assert!(found.contains(&("Joe Biden".to_string(), EntityLabel::Person)));
        assert!(found.contains(&("New Delhi".to_string(), EntityLabel::Gpe)));
        assert!(!found.iter().any(|(text, _)| text == "Monday"));
    }

    #[test]
    fn test_suffix_and_acronym_orgs() {
        let found = named("The Reserve Bank said the IMF agreed. Shares rose at the Bank of England.");
        assert!(found.contains(&("Reserve Bank".to_string(), EntityLabel::Org)));
        assert!(found.contains(&("IMF".to_string(), EntityLabel::Org)));
        assert!(found.contains(&("Bank of England".to_string(), EntityLabel::Org)));
    }

    #[test]
    fn test_possessive_and_sentence_start() {
        let found = named("The storm hit. Google's offices in London closed.");
        assert!(found.contains(&("Google".to_string(), EntityLabel::Org)));
        assert!(found.contains(&("London".to_string(), EntityLabel::Gpe)));
        assert!(!found.iter().any(|(text, _)| text == "The"));
    }

    #[test]
    fn test_empty_text_degrades() {
        let outcome = GazetteerNer::new().entities("  ");
        assert_eq!(outcome.value(), Some(&Vec::new()));
        assert!(!outcome.is_success());
    }
}
