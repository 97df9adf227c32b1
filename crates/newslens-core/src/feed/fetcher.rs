use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::{Client, Proxy};
use url::Url;

use super::models::{FeedEntry, SourceEntries};
use super::parser::parse_feed;
use crate::config::{FeedSource, SyncConfig};
use crate::{Error, Result};

const MAX_BODY_BYTES: usize = 5 * 1024 * 1024;

// Rotating User-Agent pool, some news sites refuse non-browser agents
static USER_AGENT_INDEX: AtomicUsize = AtomicUsize::new(0);
const USER_AGENTS: &[&str] = &[
    // Chrome on macOS
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    // Firefox on Windows
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    // Safari on macOS
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Safari/605.1.15",
];

/// Get the next User-Agent in rotation
fn next_user_agent() -> &'static str {
    let index = USER_AGENT_INDEX.fetch_add(1, Ordering::Relaxed) % USER_AGENTS.len();
    USER_AGENTS[index]
}

/// Build the shared HTTP client with optional proxy
pub fn build_client(sync: &SyncConfig) -> Result<Client> {
    let mut builder = Client::builder()
        .timeout(Duration::from_secs(sync.request_timeout_secs))
        .gzip(true)
        .deflate(true)
        .brotli(true)
        .redirect(reqwest::redirect::Policy::limited(10));

    if let Some(ref proxy) = sync.proxy_url {
        let proxy =
            Proxy::all(proxy).map_err(|e| Error::Config(format!("Invalid proxy URL: {}", e)))?;
        builder = builder.proxy(proxy);
        tracing::info!("Using HTTP proxy for fetching");
    }

    builder.build().map_err(Error::Http)
}

fn build_headers(user_agent: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,application/rss+xml,application/atom+xml,*/*;q=0.8",
        ),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    if let Ok(ua) = HeaderValue::from_str(user_agent) {
        headers.insert(USER_AGENT, ua);
    }
    headers
}

/// Single GET with browser-like headers. Non-2xx statuses and oversized bodies are errors.
/// No retries: a failed request is reported to the caller as is.
pub async fn get_bytes(client: &Client, url: &str) -> Result<Bytes> {
    Url::parse(url)?;

    let user_agent = next_user_agent();
    tracing::debug!("GET {} (User-Agent: {})", url, user_agent);

    let response = client
        .get(url)
        .headers(build_headers(user_agent))
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::Other(format!("HTTP {} for URL: {}", status, url)));
    }

    let bytes = response.bytes().await?;
    if bytes.len() > MAX_BODY_BYTES {
        return Err(Error::Other(format!(
            "Response too large ({} bytes) for URL: {}",
            bytes.len(),
            url
        )));
    }

    Ok(bytes)
}

/// Fetches entries from named feed endpoints
pub struct FeedFetcher {
    client: Client,
    max_entries: usize,
}

impl FeedFetcher {
    pub fn new(sync: &SyncConfig) -> Result<Self> {
        Ok(Self::with_client(build_client(sync)?, sync.max_entries_per_feed))
    }

    pub fn with_client(client: Client, max_entries: usize) -> Self {
        Self {
            client,
            max_entries,
        }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Fetch and parse one feed, keeping at most `max_entries` entries
    pub async fn fetch(&self, url: &str) -> Result<Vec<FeedEntry>> {
        tracing::info!("Fetching feed from: {}", url);

        let content = get_bytes(&self.client, url)
            .await
            .map_err(|e| Error::FeedParse(format!("{}: {}", url, e)))?;

        parse_feed(&content, self.max_entries)
    }

    /// Fetch every source in order. One failing source never aborts the others;
    /// its error is returned alongside the successful results.
    pub async fn fetch_all(
        &self,
        sources: &[FeedSource],
    ) -> (Vec<SourceEntries>, Vec<(String, Error)>) {
        let mut fetched = Vec::new();
        let mut failures = Vec::new();

        for source in sources {
            match self.fetch(&source.url).await {
                Ok(entries) => {
                    tracing::info!("Source '{}': {} entries", source.name, entries.len());
                    fetched.push(SourceEntries {
                        source: source.name.clone(),
                        entries,
                    });
                }
                Err(e) => {
                    tracing::error!("Failed to fetch source '{}': {}", source.name, e);
                    failures.push((source.name.clone(), e));
                }
            }
        }

        (fetched, failures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_rotation() {
        let first = next_user_agent();
        let second = next_user_agent();
        assert_ne!(first, second);
        assert!(USER_AGENTS.contains(&first));
        assert!(USER_AGENTS.contains(&second));
    }

    #[test]
    fn test_invalid_proxy_is_config_error() {
        let sync = SyncConfig {
            proxy_url: Some("not a url at all".to_string()),
            ..SyncConfig::default()
        };
        assert!(matches!(build_client(&sync), Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_invalid_url_rejected_before_request() {
        let fetcher = FeedFetcher::new(&SyncConfig::default()).unwrap();
        let result = fetcher.fetch("not a url").await;
        assert!(matches!(result, Err(Error::FeedParse(_))));
    }

    #[tokio::test]
    async fn test_fetch_all_isolates_failures() {
        let fetcher = FeedFetcher::new(&SyncConfig::default()).unwrap();
        let sources = vec![
            FeedSource::new("Broken", "not a url"),
            FeedSource::new("AlsoBroken", "::::"),
        ];

        let (fetched, failures) = fetcher.fetch_all(&sources).await;
        assert!(fetched.is_empty());
        let names: Vec<_> = failures.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["Broken", "AlsoBroken"]);
    }
}
