mod models;
mod store;

pub use models::{Article, EnrichedArticle};
pub use store::{format_list_cell, parse_list_cell, CorpusStore, Table};
