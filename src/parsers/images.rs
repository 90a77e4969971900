use crate::utils::{has_scheme, host_of, join_path, scheme_of};
use regex::{Captures, Regex};
use std::sync::LazyLock;
use url::Url;

static IMG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<img[^>]*?src="(.*?)"[^>]*>"#).expect("valid regex"));

/// HTML with rewritten image tags and the URLs they now point at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewrittenHtml {
    pub html: String,
    /// Rewritten image URLs in document order
    pub image_urls: Vec<String>,
}

/// Rewrites `<img>` sources in raw page markup to absolute URLs
#[derive(Debug, Clone)]
pub struct ImageRewriter {
    base_url: String,
    base_host: Option<String>,
    base_scheme: String,
    asset_prefix: Option<String>,
    asset_root: String,
}

impl ImageRewriter {
    /// Create a rewriter resolving relative sources against `base_url`
    pub fn new(base_url: &str) -> Self {
        let asset_root = Url::parse(base_url)
            .map(|parsed| parsed.origin().ascii_serialization())
            .unwrap_or_else(|_| base_url.trim_end_matches('/').to_string());

        Self {
            base_url: base_url.to_string(),
            base_host: host_of(base_url),
            base_scheme: scheme_of(base_url),
            asset_prefix: None,
            asset_root,
        }
    }

    /// Sources starting with `prefix` are served from the site root
    pub fn with_asset_prefix(mut self, prefix: &str) -> Self {
        if !prefix.is_empty() {
            self.asset_prefix = Some(prefix.to_string());
        }
        self
    }

    /// Resolve a single `src` value
    pub fn resolve(&self, src: &str) -> String {
        if let Some(prefix) = &self.asset_prefix {
            if src.starts_with(prefix.as_str()) {
                return join_path(&self.asset_root, src);
            }
        }

        if src.starts_with("//") {
            return format!("{}:{}", self.base_scheme, src);
        }

        let on_own_domain = self
            .base_host
            .as_deref()
            .is_some_and(|host| src.contains(host));
        if !has_scheme(src) && !on_own_domain {
            return join_path(&self.base_url, src);
        }

        src.to_string()
    }

    /// Replace every image tag with a bare `<img src="...">` carrying the resolved URL
    pub fn rewrite(&self, html: &str) -> RewrittenHtml {
        let mut image_urls = Vec::new();
        let rewritten = IMG_RE.replace_all(html, |caps: &Captures| {
            let url = self.resolve(&caps[1]);
            let tag = format!("<img src=\"{}\">", url);
            image_urls.push(url);
            tag
        });

        ::log::debug!("Rewrote {} image tags", image_urls.len());

        RewrittenHtml {
            html: rewritten.into_owned(),
            image_urls,
        }
    }
}

/// Rewrite image sources in `html` against `base_url` with no asset prefix
pub fn rewrite_images(html: &str, base_url: &str) -> RewrittenHtml {
    ImageRewriter::new(base_url).rewrite(html)
}
