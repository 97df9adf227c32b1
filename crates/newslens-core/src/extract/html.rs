use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, Utc};
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid css selector")
}

static OG_TITLE: LazyLock<Selector> = LazyLock::new(|| selector("meta[property='og:title']"));
static H1: LazyLock<Selector> = LazyLock::new(|| selector("h1"));
static TITLE: LazyLock<Selector> = LazyLock::new(|| selector("title"));
static PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| selector("p"));
static JSON_LD: LazyLock<Selector> =
    LazyLock::new(|| selector("script[type='application/ld+json']"));
static META_AUTHOR: LazyLock<Selector> =
    LazyLock::new(|| selector("meta[name='author'], meta[property='article:author']"));
static META_PUBLISHED: LazyLock<Selector> = LazyLock::new(|| {
    selector(
        "meta[property='article:published_time'], meta[name='pubdate'], \
         meta[name='publish-date'], meta[itemprop='datePublished']",
    )
});
static TIME: LazyLock<Selector> = LazyLock::new(|| selector("time[datetime]"));

/// Containers that usually hold the article body, most specific first
static BODY_CANDIDATES: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    [
        "[itemprop='articleBody']",
        "article",
        "main",
        "div[class*='story']",
        "div[class*='article']",
        "div[class*='content']",
    ]
    .into_iter()
    .map(selector)
    .collect()
});

/// What could be read from an article page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedPage {
    pub title: Option<String>,
    /// Body paragraphs separated by blank lines; empty when none were found
    pub text: String,
    pub authors: Vec<String>,
    pub published: Option<DateTime<Utc>>,
}

/// Parse an article page.
///
/// The body is the paragraph text of the most specific container that holds
/// at least half of the page's paragraph text, or of the whole page otherwise.
/// Authors and publish date come from JSON-LD and meta tags.
pub fn parse_article_html(html: &str) -> ParsedPage {
    let document = Html::parse_document(html);
    let json_ld = json_ld_objects(&document);

    ParsedPage {
        title: extract_title(&document),
        text: extract_body(&document),
        authors: extract_authors(&document, &json_ld),
        published: extract_published(&document, &json_ld),
    }
}

fn clean_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn element_text(element: ElementRef<'_>) -> String {
    clean_text(&element.text().collect::<String>())
}

fn meta_content(element: ElementRef<'_>) -> Option<String> {
    element
        .value()
        .attr("content")
        .map(clean_text)
        .filter(|c| !c.is_empty())
}

fn extract_title(document: &Html) -> Option<String> {
    document
        .select(&OG_TITLE)
        .find_map(meta_content)
        .or_else(|| {
            document
                .select(&H1)
                .map(element_text)
                .find(|t| !t.is_empty())
        })
        .or_else(|| {
            document
                .select(&TITLE)
                .map(element_text)
                .find(|t| !t.is_empty())
        })
}

fn paragraphs(container: ElementRef<'_>) -> Vec<String> {
    container
        .select(&PARAGRAPH)
        .map(element_text)
        .filter(|p| !p.is_empty())
        .collect()
}

fn extract_body(document: &Html) -> String {
    let all = paragraphs(document.root_element());
    let total: usize = all.iter().map(String::len).sum();

    // first candidate holding at least half of the page's paragraph text
    for candidate in BODY_CANDIDATES.iter() {
        let best = document
            .select(candidate)
            .map(paragraphs)
            .max_by_key(|found| found.iter().map(String::len).sum::<usize>());
        if let Some(found) = best {
            let len: usize = found.iter().map(String::len).sum();
            if len > 0 && len * 2 >= total {
                return found.join("\n\n");
            }
        }
    }

    all.join("\n\n")
}

/// Every JSON-LD object on the page, flattening top-level arrays and `@graph`
fn json_ld_objects(document: &Html) -> Vec<Value> {
    let mut objects = Vec::new();
    for script in document.select(&JSON_LD) {
        let raw = script.text().collect::<String>();
        let Ok(json) = serde_json::from_str::<Value>(raw.trim()) else {
            tracing::debug!("Ignoring malformed JSON-LD block");
            continue;
        };
        collect_objects(json, &mut objects);
    }
    objects
}

fn collect_objects(json: Value, out: &mut Vec<Value>) {
    match json {
        Value::Array(items) => items.into_iter().for_each(|item| collect_objects(item, out)),
        Value::Object(mut map) => {
            if let Some(graph) = map.remove("@graph") {
                collect_objects(graph, out);
            }
            out.push(Value::Object(map));
        }
        _ => {}
    }
}

fn author_names(author: &Value, out: &mut Vec<String>) {
    match author {
        Value::Array(items) => items.iter().for_each(|item| author_names(item, out)),
        Value::Object(obj) => {
            if let Some(name) = obj.get("name").and_then(Value::as_str) {
                out.push(name.trim().to_string());
            }
        }
        Value::String(name) => out.push(name.trim().to_string()),
        _ => {}
    }
}

fn extract_authors(document: &Html, json_ld: &[Value]) -> Vec<String> {
    let mut found = Vec::new();
    for object in json_ld {
        if let Some(author) = object.get("author") {
            author_names(author, &mut found);
        }
    }
    // article:author is often a profile URL rather than a name
    found.extend(
        document
            .select(&META_AUTHOR)
            .filter_map(meta_content)
            .filter(|c| !c.starts_with("http")),
    );

    let mut authors: Vec<String> = Vec::new();
    for name in found {
        if !name.is_empty() && !authors.contains(&name) {
            authors.push(name);
        }
    }
    authors
}

fn extract_published(document: &Html, json_ld: &[Value]) -> Option<DateTime<Utc>> {
    document
        .select(&META_PUBLISHED)
        .filter_map(meta_content)
        .find_map(|value| parse_date(&value))
        .or_else(|| {
            json_ld
                .iter()
                .filter_map(|object| object.get("datePublished").and_then(Value::as_str))
                .find_map(parse_date)
        })
        .or_else(|| {
            document
                .select(&TIME)
                .filter_map(|el| el.value().attr("datetime"))
                .find_map(parse_date)
        })
}

/// RFC 3339, ISO 8601 without a colon in the offset, RFC 2822, or a bare date
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%z"))
        .or_else(|_| DateTime::parse_from_rfc2822(value))
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>Fallback title | Site</title>
  <meta property="og:title" content="Rains lash  Chennai">
  <meta name="author" content="Staff Reporter">
  <script type="application/ld+json">
    {"@context": "https://schema.org", "@graph": [
      {"@type": "NewsArticle", "datePublished": "2024-11-02T08:15:00+05:30",
       "author": [{"@type": "Person", "name": "Priya Raman"}, {"@type": "Person", "name": "Staff Reporter"}]}
    ]}
  </script>
</head>
<body>
  <nav><p>Home</p><p>World</p></nav>
  <article>
    <h1>Rains lash Chennai</h1>
    <p>Heavy rain flooded   several roads in Chennai on Saturday.</p>
    <p>Schools were closed as a precaution.</p>
  </article>
  <footer><p>Copyright</p></footer>
</body>
</html>"#;

    #[test]
    fn test_parse_full_page() {
        let page = parse_article_html(PAGE);

        assert_eq!(page.title.as_deref(), Some("Rains lash Chennai"));
        assert_eq!(
            page.text,
            "Heavy rain flooded several roads in Chennai on Saturday.\n\nSchools were closed as a precaution."
        );
        assert_eq!(page.authors, vec!["Priya Raman", "Staff Reporter"]);
        assert_eq!(
            page.published,
            Some(Utc.with_ymd_and_hms(2024, 11, 2, 2, 45, 0).unwrap())
        );
    }

    #[test]
    fn test_title_falls_back_to_h1_then_title() {
        let page = parse_article_html("<html><head><title>Only title</title></head><body><h1>Heading</h1></body></html>");
        assert_eq!(page.title.as_deref(), Some("Heading"));

        let page = parse_article_html("<html><head><title>Only title</title></head><body></body></html>");
        assert_eq!(page.title.as_deref(), Some("Only title"));
    }

    #[test]
    fn test_page_without_paragraphs_has_empty_body() {
        let page = parse_article_html("<html><body><div>No paragraphs here</div></body></html>");
        assert!(page.text.is_empty());
        assert!(page.authors.is_empty());
        assert!(page.published.is_none());
    }

    #[test]
    fn test_published_from_meta_and_time() {
        let page = parse_article_html(
            r#"<html><head><meta property="article:published_time" content="2024-01-05T10:00:00Z"></head><body></body></html>"#,
        );
        assert_eq!(page.published, Some(Utc.with_ymd_and_hms(2024, 1, 5, 10, 0, 0).unwrap()));

        let page = parse_article_html(r#"<html><body><time datetime="2024-01-06">Jan 6</time></body></html>"#);
        assert_eq!(page.published, Some(Utc.with_ymd_and_hms(2024, 1, 6, 0, 0, 0).unwrap()));
    }

    #[test]
    fn test_malformed_json_ld_is_ignored() {
        let page = parse_article_html(
            r#"<html><head><script type="application/ld+json">{not json</script>
               <meta name="author" content="Desk"></head><body></body></html>"#,
        );
        assert_eq!(page.authors, vec!["Desk"]);
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        assert_eq!(parse_date("2024-03-01T09:00:00Z"), Some(expected));
        assert_eq!(parse_date("2024-03-01T14:30:00+0530"), Some(expected));
        assert_eq!(parse_date("Fri, 01 Mar 2024 09:00:00 +0000"), Some(expected));
        assert_eq!(parse_date("yesterday"), None);
    }
}
