mod fetcher;
mod models;
mod parser;

pub use fetcher::{build_client, get_bytes, FeedFetcher};
pub use models::{FeedEntry, SourceEntries};
pub use parser::parse_feed;
