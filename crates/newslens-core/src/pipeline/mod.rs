//! The two batch actions: scrape feeds into the raw corpus, enrich it into the enriched corpus.

mod tasks;

pub use tasks::{
    collect_articles, run_analysis, scrape_and_store, scrape_feeds, AnalysisReport, ScrapeReport,
    SourceReport,
};
