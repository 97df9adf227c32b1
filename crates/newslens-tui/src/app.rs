use std::sync::Arc;

use newslens_core::corpus::{Article, CorpusStore, EnrichedArticle, Table};
use newslens_core::dashboard::{available_sources, ArticleFilter};
use newslens_core::services::{Language, LANGUAGES};
use newslens_core::{AppConfig, Error, Outcome};

use crate::theme::Theme;

/// Step applied by the sentiment range keys
pub const RANGE_STEP: f64 = 0.05;

const SPINNER: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Top-level views, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Raw,
    Dashboard,
    Insights,
    Explorer,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Raw, Tab::Dashboard, Tab::Insights, Tab::Explorer];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Raw => "Raw Articles",
            Tab::Dashboard => "Dashboard",
            Tab::Insights => "Insights",
            Tab::Explorer => "Explorer",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }
}

/// Panel with keyboard focus on the dashboard tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sources,
    Articles,
}

/// Application mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Normal,
    /// Choosing a translation target; holds the cursor into `LANGUAGES`
    LanguagePicker(usize),
    /// Typing a question about the current article
    Question(String),
    Help,
}

/// Long-running work started from the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    Scrape,
    Analyze,
    Translate,
    Ask,
}

impl Task {
    pub fn label(self) -> &'static str {
        match self {
            Task::Scrape => "Scraping feeds",
            Task::Analyze => "Running NLP analysis",
            Task::Translate => "Translating article",
            Task::Ask => "Answering question",
        }
    }
}

/// Result of an on-demand service call, shown in the explorer
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceReply {
    /// What was asked for: a language name or the question
    pub request: String,
    pub text: String,
    /// Set when the reply is degraded or an error
    pub note: Option<String>,
    /// URL of the article the reply belongs to
    pub url: String,
}

impl ServiceReply {
    pub fn from_outcome(request: String, url: String, outcome: Outcome<String>) -> Self {
        let (text, note) = match outcome {
            Outcome::Success(text) => (text, None),
            Outcome::Degraded { value, reason } => (value, Some(reason)),
            Outcome::Failed { reason } => (String::new(), Some(format!("Error: {}", reason))),
        };
        Self {
            request,
            text,
            note,
            url,
        }
    }

    pub fn is_error(&self) -> bool {
        self.text.is_empty() && self.note.is_some()
    }
}

/// Application state
pub struct App {
    pub config: Arc<AppConfig>,
    pub theme: Theme,
    pub raw: Vec<Article>,
    pub enriched: Vec<EnrichedArticle>,
    /// Guidance shown instead of the raw table
    pub raw_notice: Option<String>,
    /// Guidance shown instead of the dashboard, insights and explorer
    pub enriched_notice: Option<String>,
    pub filter: ArticleFilter,
    pub sources: Vec<String>,
    pub source_cursor: usize,
    pub tab: Tab,
    pub focus: Focus,
    pub mode: Mode,
    pub selected_raw: usize,
    /// Index into the filtered rows
    pub selected_article: usize,
    pub detail_scroll: u16,
    pub translation: Option<ServiceReply>,
    pub answer: Option<ServiceReply>,
    pub busy: Option<Task>,
    pub spinner_frame: usize,
    pub should_quit: bool,
    pub status_message: Option<String>,
}

impl App {
    pub fn new(config: Arc<AppConfig>, theme: Theme) -> Self {
        Self {
            config,
            theme,
            raw: Vec::new(),
            enriched: Vec::new(),
            raw_notice: None,
            enriched_notice: None,
            filter: ArticleFilter::select_all(&[]),
            sources: Vec::new(),
            source_cursor: 0,
            tab: Tab::Raw,
            focus: Focus::Articles,
            mode: Mode::Normal,
            selected_raw: 0,
            selected_article: 0,
            detail_scroll: 0,
            translation: None,
            answer: None,
            busy: None,
            spinner_frame: 0,
            should_quit: false,
            status_message: None,
        }
    }

    /// Reload both corpora from disk.
    ///
    /// Missing files are not errors: the matching notice tells the operator
    /// which action produces them. The source selection survives a reload
    /// except that newly seen sources are selected.
    pub fn load_corpora(&mut self) {
        let store = CorpusStore::from_config(&self.config);

        match store.read_raw() {
            Ok(rows) => {
                self.raw = rows;
                self.raw_notice = None;
            }
            Err(e) => {
                self.raw.clear();
                self.raw_notice = Some(notice(&e, "Press S to scrape the configured feeds."));
            }
        }

        match store.read_enriched() {
            Ok(rows) => {
                self.enriched = rows;
                self.enriched_notice = None;
            }
            Err(e) => {
                self.enriched.clear();
                let hint = if self.raw.is_empty() {
                    "Press S to scrape, then A to run the NLP analysis."
                } else {
                    "Press A to run the NLP analysis."
                };
                self.enriched_notice = Some(notice(&e, hint));
            }
        }

        let sources = available_sources(&self.enriched);
        let mut selected: Vec<String> = self.filter.selected_sources().to_vec();
        for source in &sources {
            if !self.sources.contains(source) && !selected.contains(source) {
                selected.push(source.clone());
            }
        }
        selected.retain(|s| sources.contains(s));
        let (min, max) = self.filter.range();
        self.filter = ArticleFilter::new(selected, min, max);
        self.sources = sources;

        self.source_cursor = self.source_cursor.min(self.sources.len().saturating_sub(1));
        self.selected_raw = self.selected_raw.min(self.raw.len().saturating_sub(1));
        self.clamp_selection();
    }

    /// Enriched rows passing the current filter
    pub fn filtered(&self) -> Vec<&EnrichedArticle> {
        self.filter.apply(&self.enriched)
    }

    pub fn current_article(&self) -> Option<&EnrichedArticle> {
        self.filtered().get(self.selected_article).copied()
    }

    pub fn current_source(&self) -> Option<&str> {
        self.sources.get(self.source_cursor).map(String::as_str)
    }

    fn clamp_selection(&mut self) {
        let len = self.filtered().len();
        if self.selected_article >= len {
            self.selected_article = len.saturating_sub(1);
            self.detail_scroll = 0;
        }
    }

    pub fn next_tab(&mut self) {
        let next = (self.tab.index() + 1) % Tab::ALL.len();
        self.tab = Tab::ALL[next];
    }

    pub fn prev_tab(&mut self) {
        let prev = (self.tab.index() + Tab::ALL.len() - 1) % Tab::ALL.len();
        self.tab = Tab::ALL[prev];
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Sources => Focus::Articles,
            Focus::Articles => Focus::Sources,
        };
    }

    pub fn move_down(&mut self) {
        match (self.tab, self.focus) {
            (Tab::Raw, _) => {
                if self.selected_raw + 1 < self.raw.len() {
                    self.selected_raw += 1;
                }
            }
            (Tab::Dashboard, Focus::Sources) => {
                if self.source_cursor + 1 < self.sources.len() {
                    self.source_cursor += 1;
                }
            }
            (Tab::Dashboard, Focus::Articles) => {
                if self.selected_article + 1 < self.filtered().len() {
                    self.select_article(self.selected_article + 1);
                }
            }
            (Tab::Explorer, _) => self.detail_scroll = self.detail_scroll.saturating_add(1),
            (Tab::Insights, _) => {}
        }
    }

    pub fn move_up(&mut self) {
        match (self.tab, self.focus) {
            (Tab::Raw, _) => self.selected_raw = self.selected_raw.saturating_sub(1),
            (Tab::Dashboard, Focus::Sources) => {
                self.source_cursor = self.source_cursor.saturating_sub(1)
            }
            (Tab::Dashboard, Focus::Articles) => {
                self.select_article(self.selected_article.saturating_sub(1))
            }
            (Tab::Explorer, _) => self.detail_scroll = self.detail_scroll.saturating_sub(1),
            (Tab::Insights, _) => {}
        }
    }

    /// Step through the filtered rows from the explorer
    pub fn next_article(&mut self) {
        if self.selected_article + 1 < self.filtered().len() {
            self.select_article(self.selected_article + 1);
        }
    }

    pub fn prev_article(&mut self) {
        self.select_article(self.selected_article.saturating_sub(1));
    }

    fn select_article(&mut self, index: usize) {
        if index != self.selected_article {
            self.selected_article = index;
            self.detail_scroll = 0;
        }
    }

    pub fn toggle_current_source(&mut self) {
        if let Some(source) = self.current_source().map(str::to_string) {
            self.filter.toggle_source(&source);
            self.clamp_selection();
        }
    }

    pub fn shift_min(&mut self, delta: f64) {
        self.filter.shift_min(delta);
        self.clamp_selection();
    }

    pub fn shift_max(&mut self, delta: f64) {
        self.filter.shift_max(delta);
        self.clamp_selection();
    }

    /// Select every source and the full sentiment range
    pub fn reset_filter(&mut self) {
        self.filter = ArticleFilter::select_all(&self.enriched);
        self.clamp_selection();
    }

    pub fn open_explorer(&mut self) {
        if self.current_article().is_some() {
            self.tab = Tab::Explorer;
        }
    }

    /// Replies for the article currently shown
    pub fn translation_for_current(&self) -> Option<&ServiceReply> {
        let url = self.current_article()?.url();
        self.translation.as_ref().filter(|r| r.url == url)
    }

    pub fn answer_for_current(&self) -> Option<&ServiceReply> {
        let url = self.current_article()?.url();
        self.answer.as_ref().filter(|r| r.url == url)
    }

    pub fn picked_language(&self) -> Option<&'static Language> {
        match self.mode {
            Mode::LanguagePicker(index) => LANGUAGES.get(index),
            _ => None,
        }
    }

    /// Move the language picker cursor, staying within the list
    pub fn move_picker(&mut self, down: bool) {
        if let Mode::LanguagePicker(index) = &mut self.mode {
            *index = if down {
                (*index + 1).min(LANGUAGES.len() - 1)
            } else {
                index.saturating_sub(1)
            };
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_some()
    }

    /// Mark `task` as running; refuses when another task is in flight
    pub fn start_task(&mut self, task: Task) -> bool {
        if let Some(running) = self.busy {
            self.set_status(format!("{} already in progress", running.label()));
            return false;
        }
        self.busy = Some(task);
        self.set_status(format!("{}...", task.label()));
        true
    }

    pub fn finish_task(&mut self) {
        self.busy = None;
    }

    pub fn tick_spinner(&mut self) {
        if self.is_busy() {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER.len();
        }
    }

    pub fn spinner(&self) -> char {
        SPINNER[self.spinner_frame % SPINNER.len()]
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Copy a corpus file into the exports directory
    pub fn export_corpus(&mut self, table: Table) {
        let store = CorpusStore::from_config(&self.config);
        let file_name = store.path(table).file_name().map(|n| n.to_os_string());
        let Some(file_name) = file_name else {
            self.set_status(format!("No file name for the {} corpus", table.label()));
            return;
        };
        let dest = self.config.exports_dir().join(file_name);

        match store.export(table, &dest) {
            Ok(_) => self.set_status(format!(
                "Saved {} corpus to {}",
                table.label(),
                dest.display()
            )),
            Err(Error::CorpusMissing(_)) => {
                let hint = match table {
                    Table::Raw => "Press S to scrape first.",
                    Table::Enriched => "Press A to analyze first.",
                };
                self.set_status(format!("No {} corpus yet. {}", table.label(), hint));
            }
            Err(e) => {
                tracing::error!("Export of {} corpus failed: {}", table.label(), e);
                self.set_status(format!("Export failed: {}", e));
            }
        }
    }

    /// Check if we're in a mode that accepts text input
    pub fn is_input_mode(&self) -> bool {
        matches!(self.mode, Mode::Question(_))
    }
}

fn notice(error: &Error, hint: &str) -> String {
    match error {
        Error::CorpusMissing(path) => {
            format!("No data found at {}. {}", path.display(), hint)
        }
        other => format!("Could not load corpus: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn enriched(url: &str, source: &str, sentiment: f64) -> EnrichedArticle {
        EnrichedArticle {
            article: Article::new(url, source).with_text("Body."),
            sentiment,
            entities: Vec::new(),
            top_keywords: Vec::new(),
            summary_auto: String::new(),
            topics: "No topic".to_string(),
        }
    }

    fn app_with(dir: &TempDir, rows: &[EnrichedArticle]) -> App {
        let mut config = AppConfig::default();
        config.general.data_dir = dir.path().to_path_buf();
        let store = CorpusStore::from_config(&config);
        if !rows.is_empty() {
            store.write_enriched(rows).unwrap();
        }
        let mut app = App::new(Arc::new(config), Theme::default());
        app.load_corpora();
        app
    }

    #[test]
    fn test_missing_corpora_give_guidance() {
        let dir = TempDir::new().unwrap();
        let app = app_with(&dir, &[]);

        assert!(app.raw_notice.as_deref().unwrap().contains("Press S"));
        assert!(app.enriched_notice.as_deref().unwrap().contains("then A"));
        assert!(app.current_article().is_none());
    }

    #[test]
    fn test_filter_keys_narrow_rows() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(
            &dir,
            &[
                enriched("b1", "BBC", -0.5),
                enriched("b2", "BBC", 0.8),
                enriched("n1", "NDTV", -0.5),
                enriched("n2", "NDTV", 0.8),
            ],
        );
        assert_eq!(app.filtered().len(), 4);

        app.tab = Tab::Dashboard;
        app.focus = Focus::Sources;
        app.move_down();
        app.toggle_current_source();
        for _ in 0..20 {
            app.shift_min(RANGE_STEP);
        }

        let urls: Vec<&str> = app.filtered().iter().map(|a| a.url()).collect();
        assert_eq!(urls, vec!["b2"]);
        assert_eq!(app.filter.range(), (0.0, 1.0));

        app.reset_filter();
        assert_eq!(app.filtered().len(), 4);
    }

    #[test]
    fn test_selection_is_clamped_when_filter_shrinks() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&dir, &[enriched("b1", "BBC", 0.1), enriched("b2", "BBC", 0.2)]);
        app.tab = Tab::Dashboard;
        app.move_down();
        assert_eq!(app.current_article().map(|a| a.url()), Some("b2"));

        app.focus = Focus::Sources;
        app.toggle_current_source();
        assert_eq!(app.selected_article, 0);
        assert!(app.current_article().is_none());
    }

    #[test]
    fn test_reload_keeps_deselected_sources() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&dir, &[enriched("b1", "BBC", 0.1), enriched("n1", "NDTV", 0.2)]);
        app.filter.toggle_source("NDTV");

        app.load_corpora();
        assert!(!app.filter.is_selected("NDTV"));
        assert!(app.filter.is_selected("BBC"));
    }

    #[test]
    fn test_reply_from_outcome() {
        let reply = |outcome| ServiceReply::from_outcome("French".into(), "u".into(), outcome);

        let ok = reply(Outcome::Success("Bonjour".to_string()));
        assert_eq!((ok.text.as_str(), ok.note.as_deref()), ("Bonjour", None));

        let failed = reply(Outcome::failed("Unsupported language code: xx"));
        assert!(failed.is_error());
        assert_eq!(failed.note.as_deref(), Some("Error: Unsupported language code: xx"));

        let degraded = reply(Outcome::degraded("Bon".to_string(), "truncated"));
        assert!(!degraded.is_error());
    }

    #[test]
    fn test_language_picker_bounds() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&dir, &[]);
        app.mode = Mode::LanguagePicker(0);
        app.move_picker(false);
        assert_eq!(app.picked_language().map(|l| l.code), Some("fr"));
        for _ in 0..20 {
            app.move_picker(true);
        }
        assert_eq!(app.picked_language().map(|l| l.code), Some("ml"));
    }

    #[test]
    fn test_tabs_wrap() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&dir, &[]);
        app.prev_tab();
        assert_eq!(app.tab, Tab::Explorer);
        app.next_tab();
        assert_eq!(app.tab, Tab::Raw);
    }

    #[test]
    fn test_only_one_task_at_a_time() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&dir, &[]);
        assert!(app.start_task(Task::Scrape));
        assert!(app.is_busy());
        assert!(!app.start_task(Task::Analyze));
        app.finish_task();
        assert!(!app.is_busy());
        assert!(app.start_task(Task::Analyze));
    }

    #[test]
    fn test_export_copies_into_exports_dir() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&dir, &[enriched("u1", "BBC", 0.2)]);

        app.export_corpus(Table::Enriched);
        let dest = dir.path().join("exports").join("enriched_articles.csv");
        assert!(dest.is_file());
        assert!(app.status_message.as_deref().unwrap_or("").starts_with("Saved enriched corpus"));

        app.export_corpus(Table::Raw);
        assert_eq!(
            app.status_message.as_deref(),
            Some("No raw corpus yet. Press S to scrape first.")
        );
        assert!(!dir.path().join("exports").join("articles.csv").exists());
    }
}
