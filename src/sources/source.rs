use crate::error::Result;
use crate::results::SearchResult;

/// The wiki as seen by the detail pipeline
#[allow(async_fn_in_trait)]
pub trait WikiSource {
    /// Search page titles, returning at most `limit` results in ranking order
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>>;

    /// Fetch the rendered markup of the page with this title
    async fn fetch_page(&self, title: &str) -> Result<String>;

    /// Issue a lightweight request and report whether it succeeded
    async fn probe(&self, url: &str) -> Result<bool>;
}
