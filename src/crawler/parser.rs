//! HTML parser for search result pages and candidate sites
//!
//! This module handles parsing HTML content to extract:
//! - Destination URLs wrapped in search-engine redirect anchors
//! - The generator meta tag of a candidate site

use scraper::{Html, Selector};
use std::collections::HashSet;

/// Extracts the destinations of redirect-wrapper anchors
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` whose href starts with `redirect_prefix`
///   (e.g. `/url?q=https://site.example/&sa=U&ved=...`)
///
/// **Exclude:**
/// - Every other anchor (navigation, ads, engine UI links)
/// - Wrapped targets that are empty after extraction
///
/// The target is the text after the prefix up to the first `&`,
/// percent-decoded when it is valid UTF-8 after decoding. Malformed HTML
/// simply yields fewer (or no) links.
///
/// # Example
///
/// ```
/// use wp_sweep::crawler::extract_links;
///
/// let html = r#"<a href="/url?q=https://a.example/&sa=U">A</a><a href="/search?q=x">Next</a>"#;
/// let links = extract_links(html, "/url?q=");
/// assert_eq!(links.len(), 1);
/// assert!(links.contains("https://a.example/"));
/// ```
pub fn extract_links(html: &str, redirect_prefix: &str) -> HashSet<String> {
    let document = Html::parse_document(html);
    let mut links = HashSet::new();

    let Ok(a_selector) = Selector::parse("a[href]") else {
        return links;
    };

    for element in document.select(&a_selector) {
        if let Some(target) = element
            .value()
            .attr("href")
            .and_then(|href| unwrap_redirect(href, redirect_prefix))
        {
            links.insert(target);
        }
    }

    links
}

/// Returns the wrapped destination of a redirect href, if it is one
fn unwrap_redirect(href: &str, redirect_prefix: &str) -> Option<String> {
    let wrapped = href.strip_prefix(redirect_prefix)?;
    let raw = wrapped.split('&').next().unwrap_or_default();

    if raw.is_empty() {
        return None;
    }

    let target = match urlencoding::decode(raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw.to_string(),
    };

    Some(target)
}

/// Returns the `content` of the first `<meta name="generator">` tag
///
/// # Example
///
/// ```
/// use wp_sweep::crawler::extract_generator;
///
/// let html = r#"<head><meta name="generator" content="WordPress 6.4.2"></head>"#;
/// assert_eq!(extract_generator(html), Some("WordPress 6.4.2".to_string()));
/// ```
pub fn extract_generator(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(r#"meta[name="generator"]"#).ok()?;

    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr("content"))
        .map(|content| content.to_string())
}
