/// A translation target offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub name: &'static str,
    pub code: &'static str,
}

pub const LANGUAGES: &[Language] = &[
    Language { name: "French", code: "fr" },
    Language { name: "Spanish", code: "es" },
    Language { name: "German", code: "de" },
    Language { name: "Tamil", code: "ta" },
    Language { name: "Hindi", code: "hi" },
    Language { name: "Japanese", code: "ja" },
    Language { name: "Chinese (Simplified)", code: "zh-CN" },
    Language { name: "Arabic", code: "ar" },
    Language { name: "Russian", code: "ru" },
    Language { name: "Malayalam", code: "ml" },
];

/// Look up a supported language by code, ignoring case
pub fn find_language(code: &str) -> Option<&'static Language> {
    let code = code.trim();
    LANGUAGES
        .iter()
        .find(|language| language.code.eq_ignore_ascii_case(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_language() {
        assert_eq!(find_language("fr").map(|l| l.name), Some("French"));
        assert_eq!(find_language("zh-cn").map(|l| l.code), Some("zh-CN"));
        assert!(find_language("xx").is_none());
        assert!(find_language("").is_none());
    }

    #[test]
    fn test_codes_are_unique() {
        for (i, a) in LANGUAGES.iter().enumerate() {
            assert!(LANGUAGES[i + 1..].iter().all(|b| b.code != a.code));
        }
        assert_eq!(LANGUAGES.len(), 10);
    }
}
