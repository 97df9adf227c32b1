mod extractor;
mod html;

pub use extractor::{fallback_article, ArticleExtractor};
pub use html::{parse_article_html, parse_date, ParsedPage};
