use serde::{Deserialize, Serialize};

/// A page returned by a wiki search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Page title, also the cache key for the converted detail
    pub name: String,

    /// Canonical URL of the page
    pub url: String,

    /// Converted page text, empty until details are fetched
    #[serde(default)]
    pub detail: String,
}

impl SearchResult {
    /// Create a result without detail
    pub fn new(name: String, url: String) -> Self {
        Self {
            name,
            url,
            detail: String::new(),
        }
    }

    /// Return this result with its detail filled in
    pub fn with_detail(mut self, detail: String) -> Self {
        self.detail = detail;
        self
    }
}

/// Outcome of probing a single image URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageState {
    Loaded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageStatus {
    pub url: String,
    pub status: ImageState,
}

impl ImageStatus {
    pub fn new(url: String, status: ImageState) -> Self {
        Self { url, status }
    }

    pub fn is_loaded(&self) -> bool {
        self.status == ImageState::Loaded
    }
}
