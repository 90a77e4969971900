use crate::cache::DetailCache;
use crate::checker::check_all;
use crate::config::WikiConfig;
use crate::error::Result;
use crate::parsers::{self, images::ImageRewriter};
use crate::results::SearchResult;
use crate::sources::WikiSource;
use futures::future::join_all;

/// Searches a wiki and turns its pages into formatted text, caching the result
pub struct DetailService<S> {
    source: S,
    cache: DetailCache,
    rewriter: ImageRewriter,
    check_images: bool,
    default_query: String,
    limit: usize,
}

impl<S: WikiSource> DetailService<S> {
    pub fn new(source: S, cache: DetailCache, config: &WikiConfig) -> Self {
        Self {
            source,
            cache,
            rewriter: ImageRewriter::new(&config.site_url).with_asset_prefix(&config.asset_prefix),
            check_images: config.check_images,
            default_query: config.default_query.clone(),
            limit: config.limit,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn cache(&self) -> &DetailCache {
        &self.cache
    }

    /// Search titles; empty text searches for the default query.
    ///
    /// Whitespace-only text is sent as typed.
    pub async fn search(&self, text: &str) -> Result<Vec<SearchResult>> {
        let query = if text.is_empty() {
            self.default_query.as_str()
        } else {
            text
        };
        self.source.search(query, self.limit).await
    }

    /// Converted text for a page, from the cache when present.
    ///
    /// On a miss the page is fetched, its images are rewritten and probed,
    /// the markup is sanitized and converted, and the result is cached.
    pub async fn get_detail(&self, title: &str) -> Result<String> {
        if let Some(detail) = self.cache.get(title).await {
            ::log::debug!("Cache hit: {}", title);
            return Ok(detail);
        }
        ::log::debug!("Cache miss: {}", title);

        let html = self.source.fetch_page(title).await?;
        let rewritten = self.rewriter.rewrite(&html);

        if self.check_images {
            check_all(&self.source, &rewritten.image_urls).await;
        }

        let detail = parsers::render(&rewritten.html)?;
        self.cache.put(title, detail.clone()).await;
        Ok(detail)
    }

    /// Search and fill in every result's detail concurrently.
    ///
    /// A page that fails to load gets a placeholder detail instead of
    /// failing the whole list.
    pub async fn search_with_details(&self, text: &str) -> Result<Vec<SearchResult>> {
        let results = self.search(text).await?;

        let detailed = join_all(results.into_iter().map(|result| async move {
            match self.get_detail(&result.name).await {
                Ok(detail) => result.with_detail(detail),
                Err(e) => {
                    ::log::error!("Failed to load {}: {}", result.name, e);
                    let placeholder = unavailable_detail(&result.name, &e.to_string());
                    result.with_detail(placeholder)
                }
            }
        }))
        .await;

        Ok(detailed)
    }
}

fn unavailable_detail(title: &str, reason: &str) -> String {
    format!("*Could not load {title}: {reason}*")
}
