use anyhow::Result;

use newslens_core::corpus::EnrichedArticle;
use newslens_core::AppConfig;

use super::{find_article, load_enriched};

pub fn run(config: &AppConfig, key: &str) -> Result<()> {
    let article = find_article(load_enriched(config)?, key)?;
    print_article(&article);
    Ok(())
}

fn or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

pub fn print_article(article: &EnrichedArticle) {
    println!("{}\n", article.title());
    println!("Source:    {}", article.source());
    println!("Published: {}", article.article.published.format("%Y-%m-%d %H:%M UTC"));
    println!("Sentiment: {:.2}", article.sentiment);
    println!("Keywords:  {}", or_dash(&article.top_keywords));
    println!("Entities:  {}", or_dash(&article.entities));
    println!("Topics:    {}", article.topics);
    if !article.article.authors.is_empty() {
        println!("Authors:   {}", article.article.authors.join(", "));
    }
    println!("URL:       {}", article.url());
    println!("\nSummary\n-------\n{}", article.summary_auto);
    println!("\nFull text\n---------\n{}", article.article.text);
}
