use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::models::{Article, EnrichedArticle};
use crate::config::AppConfig;
use crate::{Error, Result};

/// Quoted items of a Python-style list or set repr: `['a', "b"]`, `{'a'}`
static QUOTED_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"'((?:[^'\\]|\\.)*)'|"((?:[^"\\]|\\.)*)""#).expect("valid list item regex")
});

/// The two persisted tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Raw,
    Enriched,
}

impl Table {
    pub fn label(self) -> &'static str {
        match self {
            Table::Raw => "raw",
            Table::Enriched => "enriched",
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct RawRow {
    #[serde(default)]
    title: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    published: String,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    keywords: String,
    #[serde(default)]
    authors: String,
    url: String,
    #[serde(default)]
    source: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct EnrichedRow {
    #[serde(default)]
    title: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    published: String,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    keywords: String,
    #[serde(default)]
    authors: String,
    url: String,
    #[serde(default)]
    source: String,
    sentiment: f64,
    #[serde(default)]
    entities: String,
    #[serde(default)]
    top_keywords: String,
    #[serde(default)]
    summary_auto: String,
    #[serde(default)]
    topics: String,
}

impl From<&Article> for RawRow {
    fn from(article: &Article) -> Self {
        Self {
            title: article.title.clone(),
            text: article.text.clone(),
            published: article.published.to_rfc3339(),
            summary: article.summary.clone(),
            keywords: format_list_cell(&article.keywords),
            authors: format_list_cell(&article.authors),
            url: article.url.clone(),
            source: article.source.clone(),
        }
    }
}

impl From<RawRow> for Article {
    fn from(row: RawRow) -> Self {
        Article {
            published: parse_published(&row.published),
            keywords: parse_list_cell(&row.keywords),
            authors: parse_list_cell(&row.authors),
            title: row.title,
            text: row.text,
            summary: row.summary,
            url: row.url,
            source: row.source,
        }
    }
}

impl From<&EnrichedArticle> for EnrichedRow {
    fn from(enriched: &EnrichedArticle) -> Self {
        let raw = RawRow::from(&enriched.article);
        Self {
            title: raw.title,
            text: raw.text,
            published: raw.published,
            summary: raw.summary,
            keywords: raw.keywords,
            authors: raw.authors,
            url: raw.url,
            source: raw.source,
            sentiment: enriched.sentiment,
            entities: format_list_cell(&enriched.entities),
            top_keywords: format_list_cell(&enriched.top_keywords),
            summary_auto: enriched.summary_auto.clone(),
            topics: enriched.topics.clone(),
        }
    }
}

impl From<EnrichedRow> for EnrichedArticle {
    fn from(row: EnrichedRow) -> Self {
        let sentiment = stored_sentiment(row.sentiment, &row.url);
        let article = Article::from(RawRow {
            title: row.title,
            text: row.text,
            published: row.published,
            summary: row.summary,
            keywords: row.keywords,
            authors: row.authors,
            url: row.url,
            source: row.source,
        });
        EnrichedArticle {
            article,
            sentiment,
            entities: parse_list_cell(&row.entities),
            top_keywords: parse_list_cell(&row.top_keywords),
            summary_auto: row.summary_auto,
            topics: row.topics,
        }
    }
}

/// CSV persistence for the raw and enriched corpora.
///
/// Writes always replace the whole file. Reads load every row, skipping rows
/// that cannot be decoded.
#[derive(Debug, Clone)]
pub struct CorpusStore {
    raw_path: PathBuf,
    enriched_path: PathBuf,
}

impl CorpusStore {
    pub fn new(raw_path: impl Into<PathBuf>, enriched_path: impl Into<PathBuf>) -> Self {
        Self {
            raw_path: raw_path.into(),
            enriched_path: enriched_path.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.raw_corpus_path(), config.enriched_corpus_path())
    }

    pub fn path(&self, table: Table) -> &Path {
        match table {
            Table::Raw => &self.raw_path,
            Table::Enriched => &self.enriched_path,
        }
    }

    pub fn exists(&self, table: Table) -> bool {
        self.path(table).is_file()
    }

    pub fn write_raw(&self, articles: &[Article]) -> Result<()> {
        write_rows(&self.raw_path, articles.iter().map(RawRow::from))?;
        tracing::info!("Saved {} articles to {}", articles.len(), self.raw_path.display());
        Ok(())
    }

    pub fn read_raw(&self) -> Result<Vec<Article>> {
        let rows: Vec<RawRow> = read_rows(&self.raw_path)?;
        Ok(rows.into_iter().map(Article::from).collect())
    }

    pub fn write_enriched(&self, articles: &[EnrichedArticle]) -> Result<()> {
        write_rows(&self.enriched_path, articles.iter().map(EnrichedRow::from))?;
        tracing::info!(
            "Saved {} enriched articles to {}",
            articles.len(),
            self.enriched_path.display()
        );
        Ok(())
    }

    pub fn read_enriched(&self) -> Result<Vec<EnrichedArticle>> {
        let rows: Vec<EnrichedRow> = read_rows(&self.enriched_path)?;
        Ok(rows.into_iter().map(EnrichedArticle::from).collect())
    }

    /// Copy a table to `dest`, returning the bytes written
    pub fn export(&self, table: Table, dest: &Path) -> Result<u64> {
        let source = self.path(table);
        if !source.is_file() {
            return Err(Error::CorpusMissing(source.to_path_buf()));
        }
        ensure_parent(dest)?;
        let bytes = fs::copy(source, dest)?;
        tracing::info!("Exported {} corpus to {}", table.label(), dest.display());
        Ok(bytes)
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn write_rows<R: Serialize>(path: &Path, rows: impl Iterator<Item = R>) -> Result<()> {
    ensure_parent(path)?;
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn read_rows<R: for<'de> Deserialize<'de>>(path: &Path) -> Result<Vec<R>> {
    if !path.is_file() {
        return Err(Error::CorpusMissing(path.to_path_buf()));
    }

    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for (index, record) in reader.deserialize::<R>().enumerate() {
        match record {
            Ok(row) => rows.push(row),
            // header is line 1
            Err(e) => tracing::warn!("Skipping row {} of {}: {}", index + 2, path.display(), e),
        }
    }
    Ok(rows)
}

/// List cells are stored as JSON arrays
pub fn format_list_cell(items: &[String]) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}

/// Parse a stored list cell.
///
/// Accepts JSON arrays, Python-style list or set reprs and plain comma
/// separated text. Anything else yields an empty list.
pub fn parse_list_cell(cell: &str) -> Vec<String> {
    let trimmed = cell.trim();
    if trimmed.is_empty() || trimmed == "set()" {
        return Vec::new();
    }

    if let Ok(items) = serde_json::from_str::<Vec<String>>(trimmed) {
        return items;
    }

    let bracketed = (trimmed.starts_with('[') && trimmed.ends_with(']'))
        || (trimmed.starts_with('{') && trimmed.ends_with('}'));
    if bracketed {
        let inner = trimmed[1..trimmed.len() - 1].trim();
        if inner.is_empty() {
            return Vec::new();
        }
        let items: Vec<String> = QUOTED_ITEM
            .captures_iter(inner)
            .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
            .map(|m| m.as_str().replace("\\'", "'").replace("\\\"", "\""))
            .collect();
        if items.is_empty() {
            tracing::warn!("Unparseable list cell: {}", trimmed);
        }
        return items;
    }

    trimmed
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Stored timestamps are RFC 3339; pandas-style timestamps are also accepted
/// Sentiment as read back from disk, kept inside [-1, 1]
fn stored_sentiment(value: f64, url: &str) -> f64 {
    if value.is_finite() {
        value.clamp(-1.0, 1.0)
    } else {
        tracing::warn!("Non-finite sentiment '{}' for {}, using 0.0", value, url);
        0.0
    }
}

fn parse_published(value: &str) -> DateTime<Utc> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return dt.with_timezone(&Utc);
    }
    // feed dates kept verbatim, e.g. "Mon, 06 Jan 2025 10:00:00 GMT"
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return dt.with_timezone(&Utc);
    }
    if let Ok(dt) = DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%:z") {
        return dt.with_timezone(&Utc);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f") {
        return naive.and_utc();
    }
    if !value.is_empty() {
        tracing::warn!("Unparseable published time '{}', using now", value);
    }
    Utc::now()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> CorpusStore {
        CorpusStore::new(
            dir.path().join("data/articles.csv"),
            dir.path().join("data/enriched_articles.csv"),
        )
    }

    fn article(url: &str, source: &str) -> Article {
        let mut article = Article::new(url, source)
            .with_title("Title, with comma")
            .with_text("Line one.\nLine \"two\".")
            .with_summary("Summary")
            .with_published(Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap());
        article.keywords = vec!["alpha".into(), "beta".into()];
        article.authors = vec!["Jane O'Neil".into()];
        article
    }

    #[test]
    fn test_raw_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let articles = vec![article("u1", "BBC"), article("u2", "NDTV")];

        store.write_raw(&articles).unwrap();
        let loaded = store.read_raw().unwrap();

        assert_eq!(loaded, articles);
    }

    #[test]
    fn test_enriched_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let enriched = EnrichedArticle {
            article: article("u1", "BBC"),
            sentiment: 0.25,
            entities: vec!["Apple".into(), "California".into()],
            top_keywords: vec!["apple".into()],
            summary_auto: "Apple grew.".into(),
            topics: "apple, growth, california".into(),
        };

        store.write_enriched(std::slice::from_ref(&enriched)).unwrap();
        assert_eq!(store.read_enriched().unwrap(), vec![enriched]);
    }

    #[test]
    fn test_write_overwrites() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        store.write_raw(&[article("u1", "BBC"), article("u2", "BBC")]).unwrap();
        store.write_raw(&[article("u3", "BBC")]).unwrap();

        let urls: Vec<String> = store.read_raw().unwrap().into_iter().map(|a| a.url).collect();
        assert_eq!(urls, vec!["u3"]);
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        assert!(!store.exists(Table::Raw));
        assert!(matches!(store.read_raw(), Err(Error::CorpusMissing(_))));
        assert!(matches!(
            store.export(Table::Enriched, &dir.path().join("out.csv")),
            Err(Error::CorpusMissing(_))
        ));
    }

    #[test]
    fn test_bad_rows_are_skipped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("enriched.csv");
        fs::write(
            &path,
            "title,text,published,summary,keywords,authors,url,source,sentiment,entities,top_keywords,summary_auto,topics\n\
             A,t,2024-01-01T00:00:00Z,s,[],[],u1,BBC,0.5,\"{'Apple', 'IMF'}\",\"['apple']\",s,No topic\n\
             B,t,2024-01-01T00:00:00Z,s,[],[],u2,BBC,not-a-number,[],[],s,No topic\n",
        )
        .unwrap();

        let store = CorpusStore::new(dir.path().join("raw.csv"), &path);
        let rows = store.read_enriched().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].entities, vec!["Apple", "IMF"]);
        assert_eq!(rows[0].top_keywords, vec!["apple"]);
    }

    #[test]
    fn test_non_finite_sentiment_is_neutral_on_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("enriched.csv");
        fs::write(
            &path,
            "title,text,published,summary,keywords,authors,url,source,sentiment,entities,top_keywords,summary_auto,topics\n\
             A,t,2024-01-01T00:00:00Z,s,[],[],u1,BBC,NaN,[],[],s,No topic\n\
             B,t,2024-01-01T00:00:00Z,s,[],[],u2,BBC,inf,[],[],s,No topic\n\
             C,t,2024-01-01T00:00:00Z,s,[],[],u3,BBC,3.5,[],[],s,No topic\n",
        )
        .unwrap();

        let store = CorpusStore::new(dir.path().join("raw.csv"), &path);
        let sentiments: Vec<f64> = store
            .read_enriched()
            .unwrap()
            .iter()
            .map(|a| a.sentiment)
            .collect();
        assert_eq!(sentiments, vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_parse_list_cell_variants() {
        assert_eq!(parse_list_cell(r#"["a","b"]"#), vec!["a", "b"]);
        assert_eq!(parse_list_cell("['a', 'b']"), vec!["a", "b"]);
        assert_eq!(parse_list_cell("{'Apple'}"), vec!["Apple"]);
        assert_eq!(parse_list_cell(r#"["it's"]"#), vec!["it's"]);
        assert_eq!(parse_list_cell("a, b"), vec!["a", "b"]);
        assert!(parse_list_cell("set()").is_empty());
        assert!(parse_list_cell("[]").is_empty());
        assert!(parse_list_cell("").is_empty());
        assert!(parse_list_cell("[unquoted, junk]").is_empty());
    }

    #[test]
    fn test_parse_published_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        assert_eq!(parse_published("2024-05-01T12:30:00+00:00"), expected);
        assert_eq!(parse_published("2024-05-01 12:30:00+00:00"), expected);
        assert_eq!(parse_published("2024-05-01 12:30:00"), expected);
        assert_eq!(parse_published("Wed, 01 May 2024 12:30:00 GMT"), expected);
        assert_eq!(parse_published("Wed, 01 May 2024 18:00:00 +0530"), expected);

        let before = Utc::now();
        assert!(parse_published("garbage") >= before);
    }

    #[test]
    fn test_export_copies_file() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.write_raw(&[article("u1", "BBC")]).unwrap();

        let dest = dir.path().join("exports/raw.csv");
        let bytes = store.export(Table::Raw, &dest).unwrap();
        assert!(bytes > 0);
        assert_eq!(fs::read(&dest).unwrap(), fs::read(store.path(Table::Raw)).unwrap());
    }
}
