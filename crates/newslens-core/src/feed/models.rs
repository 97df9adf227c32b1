use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of an RSS/Atom feed, as published by the source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedEntry {
    pub title: Option<String>,
    pub link: Option<String>,
    pub published: Option<DateTime<Utc>>,
    /// Plain-text summary (HTML already stripped)
    pub summary: Option<String>,
}

/// Entries fetched from one named source
#[derive(Debug, Clone)]
pub struct SourceEntries {
    pub source: String,
    pub entries: Vec<FeedEntry>,
}
