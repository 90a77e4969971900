use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static SCHEME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").expect("valid regex"));

/// Whether the value starts with a URL scheme such as `https:` or `data:`
pub fn has_scheme(value: &str) -> bool {
    SCHEME_RE.is_match(value)
}

/// Host of an absolute URL, if it has one
pub fn host_of(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(|host| host.to_string()))
}

/// Scheme of an absolute URL, falling back to https
pub fn scheme_of(url: &str) -> String {
    Url::parse(url)
        .map(|parsed| parsed.scheme().to_string())
        .unwrap_or_else(|_| "https".to_string())
}

/// Concatenate a base URL and a path with exactly one slash between them
pub fn join_path(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
