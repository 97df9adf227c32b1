use anyhow::Result;

use newslens_core::dashboard::{available_sources, ArticleFilter};
use newslens_core::AppConfig;

use super::{load_enriched, load_raw};
use crate::ListArgs;

/// Characters of body text shown under each raw row
const RAW_PREVIEW_CHARS: usize = 100;

pub fn run(config: &AppConfig, args: &ListArgs) -> Result<()> {
    if args.raw {
        return list_raw(config);
    }

    let articles = load_enriched(config)?;
    let sources = if args.sources.is_empty() {
        available_sources(&articles)
    } else {
        args.sources.clone()
    };
    let filter = ArticleFilter::new(sources, args.min, args.max);
    let (min, max) = filter.range();

    println!(
        "Sources: {} | Sentiment: {:+.2} to {:+.2}\n",
        filter.selected_sources().join(", "),
        min,
        max
    );

    let mut shown = 0;
    for (i, article) in articles.iter().enumerate() {
        if !filter.matches(article) {
            continue;
        }
        shown += 1;
        println!(
            "{:>4}  {:+.2}  {:<12}  {}",
            i + 1,
            article.sentiment,
            article.source(),
            article.title()
        );
        println!("      {} | {}", article.article.published.format("%Y-%m-%d %H:%M"), article.topics);
    }

    println!("\n{} of {} articles shown.", shown, articles.len());
    Ok(())
}

fn list_raw(config: &AppConfig) -> Result<()> {
    let articles = load_raw(config)?;
    println!("Raw corpus ({} articles):\n", articles.len());

    for (i, article) in articles.iter().enumerate() {
        println!("{:>4}  {:<12}  {}", i + 1, article.source, article.title);
        println!(
            "      {} | {}",
            article.published.format("%Y-%m-%d %H:%M"),
            article.url
        );
        if !article.text.is_empty() {
            println!("      {}", article.text_preview(RAW_PREVIEW_CHARS));
        }
    }
    Ok(())
}
