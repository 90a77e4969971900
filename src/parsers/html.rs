use scraper::{Html, Selector};
use std::sync::LazyLock;

static CONTENT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".mw-parser-output").expect("valid selector"));

static BODY_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("body").expect("valid selector"));

/// Extracts the article markup from a full wiki page.
///
/// Fragments (markup without `<html>` or `<body>`) are returned unchanged so
/// the regex stages downstream see exactly what the wiki sent.
pub fn extract_content(html: &str) -> String {
    if !is_full_document(html) {
        return html.to_string();
    }

    let doc = Html::parse_document(html);
    if let Some(content) = doc.select(&CONTENT_SELECTOR).next() {
        ::log::debug!("Extracted article content from full page");
        return content.inner_html();
    }

    doc.select(&BODY_SELECTOR)
        .next()
        .map(|body| body.inner_html())
        .unwrap_or_else(|| html.to_string())
}

/// Whether the markup is a complete HTML document rather than a fragment
pub fn is_full_document(html: &str) -> bool {
    let head = html
        .chars()
        .take(1024)
        .collect::<String>()
        .to_ascii_lowercase();
    head.contains("<html") || head.contains("<body") || head.contains("<!doctype")
}
