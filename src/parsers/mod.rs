pub mod html;
pub mod images;
pub mod lines;
pub mod markdown;
pub mod sanitize;
pub mod table;

#[cfg(test)]
mod tests;

use crate::error::Result;

/// Sanitize page markup and convert it to Markdown
pub fn render(html: &str) -> Result<String> {
    let sanitized = sanitize::sanitize(html);
    markdown::convert(&sanitized)
}
