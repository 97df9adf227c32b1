use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const RAW_CORPUS_FILE: &str = "articles.csv";
const ENRICHED_CORPUS_FILE: &str = "enriched_articles.csv";
const LOG_FILE: &str = "newslens.log";
const EXPORTS_DIR: &str = "exports";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default = "default_feeds")]
    pub feeds: Vec<FeedSource>,
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub nlp: NlpConfig,
    #[serde(default)]
    pub translation: TranslationConfig,
    #[serde(default)]
    pub qa: QaConfig,
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            feeds: default_feeds(),
            sync: SyncConfig::default(),
            nlp: NlpConfig::default(),
            translation: TranslationConfig::default(),
            qa: QaConfig::default(),
            ai: AiConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Directory holding the raw and enriched corpus files
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// A named feed endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSource {
    pub name: String,
    pub url: String,
}

impl FeedSource {
    pub fn new(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Entries taken from each feed per scrape
    #[serde(default = "default_max_entries")]
    pub max_entries_per_feed: usize,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    /// HTTP proxy URL (e.g., "http://127.0.0.1:7890" or "socks5://127.0.0.1:1080")
    #[serde(default)]
    pub proxy_url: Option<String>,
    /// Download full article pages; when false the feed summary is used as text
    #[serde(default = "default_true")]
    pub extract_articles: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            max_entries_per_feed: default_max_entries(),
            request_timeout_secs: default_timeout(),
            proxy_url: None,
            extract_articles: default_true(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NlpConfig {
    /// Keywords kept per article in the enrichment pass
    #[serde(default = "default_keyword_count")]
    pub keyword_count: usize,
    /// Sentences in the automatic summary
    #[serde(default = "default_summary_sentences")]
    pub summary_sentences: usize,
    /// Topics fitted per article
    #[serde(default = "default_topic_count")]
    pub topic_count: usize,
    /// Words used to label a topic
    #[serde(default = "default_topic_words")]
    pub topic_words: usize,
    /// Keywords stored on the raw record at extraction time
    #[serde(default = "default_article_keyword_count")]
    pub article_keyword_count: usize,
    /// Sentences in the raw record summary at extraction time
    #[serde(default = "default_article_summary_sentences")]
    pub article_summary_sentences: usize,
}

impl Default for NlpConfig {
    fn default() -> Self {
        Self {
            keyword_count: default_keyword_count(),
            summary_sentences: default_summary_sentences(),
            topic_count: default_topic_count(),
            topic_words: default_topic_words(),
            article_keyword_count: default_article_keyword_count(),
            article_summary_sentences: default_article_summary_sentences(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    /// Translation backend: "google" or "ai"
    #[serde(default = "default_translation_provider")]
    pub provider: String,
    /// Characters of article text sent for translation
    #[serde(default = "default_translation_max_chars")]
    pub max_chars: usize,
    /// Base URL of the Google web translation endpoint
    #[serde(default = "default_translation_endpoint")]
    pub endpoint: String,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: default_translation_provider(),
            max_chars: default_translation_max_chars(),
            endpoint: default_translation_endpoint(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaConfig {
    /// Question answering backend: "extractive" or "ai"
    #[serde(default = "default_qa_provider")]
    pub provider: String,
}

impl Default for QaConfig {
    fn default() -> Self {
        Self {
            provider: default_qa_provider(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// AI provider: "openai", "gemini_api", "claude_api"
    #[serde(default = "default_ai_provider")]
    pub provider: String,
    /// OpenAI API key (for openai provider)
    #[serde(default)]
    pub openai_api_key: Option<String>,
    /// OpenAI model name
    #[serde(default = "default_openai_model")]
    pub openai_model: String,
    /// Gemini API key (for gemini_api provider)
    #[serde(default)]
    pub gemini_api_key: Option<String>,
    /// Gemini model name
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,
    /// Claude/Anthropic API key (for claude_api provider)
    #[serde(default)]
    pub claude_api_key: Option<String>,
    /// Claude model name
    #[serde(default = "default_claude_model")]
    pub claude_model: String,
    /// Max tokens per completion
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: default_ai_provider(),
            openai_api_key: None,
            openai_model: default_openai_model(),
            gemini_api_key: None,
            gemini_model: default_gemini_model(),
            claude_api_key: None,
            claude_model: default_claude_model(),
            max_tokens: default_max_tokens(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            theme: ThemeConfig::default(),
        }
    }
}

/// Theme name plus optional color overrides
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "ThemeSetting")]
pub struct ThemeConfig {
    /// "gruvbox-dark" or "nord"
    pub name: String,
    pub colors: ThemeColorOverrides,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
            colors: ThemeColorOverrides::default(),
        }
    }
}

/// Accepts either `theme = "nord"` or a `[ui.theme]` table
#[derive(Deserialize)]
#[serde(untagged)]
enum ThemeSetting {
    Name(String),
    Table {
        #[serde(default = "default_theme_name")]
        name: String,
        #[serde(default)]
        colors: ThemeColorOverrides,
    },
}

impl From<ThemeSetting> for ThemeConfig {
    fn from(setting: ThemeSetting) -> Self {
        match setting {
            ThemeSetting::Name(name) => Self {
                name,
                colors: ThemeColorOverrides::default(),
            },
            ThemeSetting::Table { name, colors } => Self { name, colors },
        }
    }
}

/// Optional color overrides, each a hex string ("#ff0000" or "ff0000")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeColorOverrides {
    pub bg0: Option<String>,
    pub bg1: Option<String>,
    pub fg0: Option<String>,
    pub accent: Option<String>,
    pub selection: Option<String>,
    /// Color for positive sentiment
    pub positive: Option<String>,
    /// Color for negative sentiment
    pub negative: Option<String>,
    pub error: Option<String>,
    pub info: Option<String>,
}

pub fn default_feeds() -> Vec<FeedSource> {
    vec![
        FeedSource::new("BBC", "http://feeds.bbci.co.uk/news/world/rss.xml"),
        FeedSource::new("NDTV", "https://feeds.feedburner.com/ndtvnews-top-stories"),
        FeedSource::new(
            "The Hindu",
            "https://www.thehindu.com/news/national/feeder/default.rss",
        ),
    ]
}

fn default_theme_name() -> String {
    "gruvbox-dark".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_max_entries() -> usize {
    10
}

fn default_timeout() -> u64 {
    30
}

fn default_keyword_count() -> usize {
    5
}

fn default_summary_sentences() -> usize {
    2
}

fn default_topic_count() -> usize {
    1
}

fn default_topic_words() -> usize {
    3
}

fn default_article_keyword_count() -> usize {
    10
}

fn default_article_summary_sentences() -> usize {
    5
}

fn default_translation_provider() -> String {
    "google".to_string()
}

fn default_translation_max_chars() -> usize {
    3000
}

fn default_translation_endpoint() -> String {
    "https://translate.googleapis.com/translate_a/single".to_string()
}

fn default_qa_provider() -> String {
    "extractive".to_string()
}

fn default_ai_provider() -> String {
    "openai".to_string()
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_gemini_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_claude_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_tick_rate() -> u64 {
    100
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

impl AppConfig {
    /// Load configuration from the default location or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, falling back to defaults when it does not exist
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/newslens/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("newslens")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    pub fn raw_corpus_path(&self) -> PathBuf {
        self.data_dir().join(RAW_CORPUS_FILE)
    }

    pub fn enriched_corpus_path(&self) -> PathBuf {
        self.data_dir().join(ENRICHED_CORPUS_FILE)
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join(LOG_FILE)
    }

    /// Where the dashboard drops downloaded corpus copies
    pub fn exports_dir(&self) -> PathBuf {
        self.data_dir().join(EXPORTS_DIR)
    }
}
