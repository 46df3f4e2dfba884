//! HTML parser for extracting links and heading words
//!
//! This module handles parsing HTML content to extract:
//! - Links to follow (from `<a href>` tags), resolved to absolute URLs
//! - Words from `<h1>`, `<h2>` and `<h3>` headings outside page chrome

use crate::ParseError;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Containers whose headings are treated as page chrome and skipped
const EXCLUDED_CONTAINERS: [&str; 3] = ["header", "footer", "nav"];

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPage {
    /// Absolute link targets, in document order
    pub links: Vec<String>,

    /// Whitespace-separated words of in-scope headings, in document order
    pub heading_words: Vec<String>,
}

/// Turns a fetched body into links and heading words
pub trait PageParser: Send + Sync + 'static {
    /// Parses `body`, resolving relative links against `base_url`
    fn parse(&self, base_url: &str, body: &str) -> Result<ParsedPage, ParseError>;
}

/// `scraper`-backed [`PageParser`]
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlParser;

impl HtmlParser {
    pub fn new() -> Self {
        Self
    }
}

impl PageParser for HtmlParser {
    fn parse(&self, base_url: &str, body: &str) -> Result<ParsedPage, ParseError> {
        let base = Url::parse(base_url).map_err(|source| ParseError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })?;
        parse_html(body, &base)
    }
}

/// Parses HTML content and extracts links and heading words
///
/// # Link Extraction Rules
///
/// **Include:**
/// - Every `<a href="...">`, wherever it sits in the document
///
/// **Exclude:**
/// - `javascript:`, `mailto:`, `tel:` links
/// - Data URIs
/// - Fragment-only links
/// - Anything that does not resolve to an `http`/`https` URL
///
/// # Heading Rules
///
/// `h1`-`h3` elements contribute their full descendant text, split on
/// whitespace, unless any ancestor is a `header`, `footer` or `nav` element.
///
/// # Example
///
/// ```
/// use heading_crawler::crawler::parse_html;
/// use url::Url;
///
/// let html = r#"<html><body><nav><h1>Menu</h1></nav><h1>Hello World</h1><a href="/page">Link</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let parsed = parse_html(html, &base_url).unwrap();
/// assert_eq!(parsed.heading_words, vec!["Hello", "World"]);
/// assert_eq!(parsed.links, vec!["https://example.com/page"]);
/// ```
pub fn parse_html(html: &str, base_url: &Url) -> Result<ParsedPage, ParseError> {
    let document = Html::parse_document(html);

    let links = extract_links(&document, base_url)?;
    let heading_words = extract_heading_words(&document, base_url)?;

    Ok(ParsedPage {
        links,
        heading_words,
    })
}

fn selector(css: &str, base_url: &Url) -> Result<Selector, ParseError> {
    Selector::parse(css).map_err(|e| ParseError::Html {
        url: base_url.to_string(),
        message: format!("invalid selector '{}': {:?}", css, e),
    })
}

/// Extracts all valid links from the HTML document
fn extract_links(document: &Html, base_url: &Url) -> Result<Vec<String>, ParseError> {
    let a_selector = selector("a[href]", base_url)?;

    Ok(document
        .select(&a_selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(href, base_url))
        .collect())
}

/// Extracts the words of every in-scope heading
fn extract_heading_words(document: &Html, base_url: &Url) -> Result<Vec<String>, ParseError> {
    let heading_selector = selector("h1, h2, h3", base_url)?;

    let mut words = Vec::new();
    for heading in document.select(&heading_selector) {
        if inside_excluded_container(&heading) {
            continue;
        }

        let text: String = heading.text().collect();
        words.extend(text.split_whitespace().map(str::to_string));
    }

    Ok(words)
}

/// Returns true if any ancestor of `element` is page chrome
fn inside_excluded_container(element: &ElementRef<'_>) -> bool {
    element.ancestors().any(|node| {
        node.value()
            .as_element()
            .is_some_and(|el| EXCLUDED_CONTAINERS.contains(&el.name()))
    })
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    // Same page anchors
    if href.starts_with('#') {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url.to_string())
            } else {
                None
            }
        }
        Err(_) => None,
    }
}
