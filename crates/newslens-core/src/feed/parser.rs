use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use feed_rs::parser;
use regex::Regex;

use super::models::FeedEntry;
use crate::{Error, Result};

/// Parse RSS/Atom content into at most `limit` entries, in feed order
pub fn parse_feed(content: &[u8], limit: usize) -> Result<Vec<FeedEntry>> {
    let feed = parser::parse(content).map_err(|e| Error::FeedParse(e.to_string()))?;

    let entries = feed
        .entries
        .into_iter()
        .take(limit)
        .map(|entry| {
            let title = entry
                .title
                .map(|t| t.content.trim().to_string())
                .filter(|t| !t.is_empty());

            let link = entry.links.first().map(|l| l.href.clone());

            let published = entry
                .published
                .or(entry.updated)
                .map(|dt| DateTime::<Utc>::from(dt));

            let summary = entry
                .summary
                .map(|s| s.content)
                .or_else(|| entry.content.and_then(|c| c.body))
                .map(|html| html_to_text(&html))
                .filter(|s| !s.is_empty());

            FeedEntry {
                title,
                link,
                published,
                summary,
            }
        })
        .collect();

    Ok(entries)
}

// html2text renders links as `[text][1]` with `[1]: url` footnotes
static LINK_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\[\d+\]").expect("valid link regex"));
static FOOTNOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[\d+\]:\s").expect("valid footnote regex"));

/// Convert HTML content to plain text joined into a single line
pub(crate) fn html_to_text(html: &str) -> String {
    let text = html2text::from_read(html.as_bytes(), 10_000).unwrap_or_else(|_| html.to_string());
    let joined = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !FOOTNOTE.is_match(line))
        .collect::<Vec<_>>()
        .join(" ");

    LINK_REF.replace_all(&joined, "$1").replace("**", "")
}

#[cfg(test)]
mod tests {
    use super::*;

    const RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>World</title>
    <link>https://news.example.com</link>
    <description>World news</description>
    <item>
      <title>First story</title>
      <link>https://news.example.com/1</link>
      <description>&lt;p&gt;Leaders met in &lt;b&gt;Paris&lt;/b&gt;.&lt;/p&gt;</description>
      <pubDate>Mon, 06 Jan 2025 10:00:00 GMT</pubDate>
    </item>
    <item>
      <title>Second story</title>
      <link>https://news.example.com/2</link>
    </item>
    <item>
      <title>Third story</title>
      <link>https://news.example.com/3</link>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn test_parse_rss_entries() {
        let entries = parse_feed(RSS.as_bytes(), 10).unwrap();
        assert_eq!(entries.len(), 3);

        let first = &entries[0];
        assert_eq!(first.title.as_deref(), Some("First story"));
        assert_eq!(first.link.as_deref(), Some("https://news.example.com/1"));
        let summary = first.summary.as_deref().unwrap();
        assert!(summary.contains("Leaders met in"));
        assert!(summary.contains("Paris"));
        assert!(!summary.contains("<p>"));
        assert!(first.published.is_some());

        assert!(entries[1].summary.is_none());
        assert!(entries[1].published.is_none());
    }

    #[test]
    fn test_parse_respects_limit() {
        let entries = parse_feed(RSS.as_bytes(), 2).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].title.as_deref(), Some("Second story"));
    }

    #[test]
    fn test_html_to_text_drops_link_footnotes() {
        let text = html_to_text(r#"<p>Read <a href="https://x.example">more</a> <strong>now</strong></p>"#);
        assert!(text.contains("more"));
        assert!(text.contains("now"));
        assert!(!text.contains("https://x.example"));
        assert!(!text.contains("**"));
    }

    #[test]
    fn test_parse_invalid_feed() {
        let result = parse_feed(b"<html>not a feed</html>", 10);
        assert!(matches!(result, Err(Error::FeedParse(_))));
    }
}
