use crate::error::{Result, WikiError};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for searching a wiki and converting its pages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WikiConfig {
    /// MediaWiki API endpoint used for search and page fetches
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Base URL that relative image sources are resolved against
    #[serde(default = "default_site_url")]
    pub site_url: String,

    /// Site-relative prefix of assets served from the wiki's own API path
    #[serde(default = "default_asset_prefix")]
    pub asset_prefix: String,

    /// Query used when the search text is empty
    #[serde(default = "default_query")]
    pub default_query: String,

    /// Maximum number of search results
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Whether to probe image reachability after rewriting
    #[serde(default = "default_check_images")]
    pub check_images: bool,

    /// How long a converted page stays valid in the cache (0 = forever)
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Optional JSON file the cache is persisted to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_path: Option<PathBuf>,

    /// Timeout applied to every HTTP request
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Default value for api_url
fn default_api_url() -> String {
    "https://stardewvalleywiki.com/mediawiki/api.php".to_string()
}

/// Default value for site_url
fn default_site_url() -> String {
    "https://stardewvalleywiki.com".to_string()
}

fn default_asset_prefix() -> String {
    "/mediawiki/".to_string()
}

fn default_query() -> String {
    "calendar".to_string()
}

fn default_limit() -> usize {
    10
}

fn default_check_images() -> bool {
    true
}

/// One hour
fn default_cache_ttl_secs() -> u64 {
    3600
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("wiki-detail/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self::new(&default_api_url())
    }
}

impl WikiConfig {
    /// Create a new configuration for the given API endpoint with default values
    pub fn new(api_url: &str) -> Self {
        Self {
            api_url: api_url.to_string(),
            site_url: default_site_url(),
            asset_prefix: default_asset_prefix(),
            default_query: default_query(),
            limit: default_limit(),
            check_images: default_check_images(),
            cache_ttl_secs: default_cache_ttl_secs(),
            cache_path: None,
            request_timeout_secs: default_request_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Override fields from `WIKI_API_URL`, `WIKI_SITE_URL` and `WIKI_CACHE_PATH`
    pub fn apply_env(self) -> Self {
        self.apply_vars(non_empty_env)
    }

    /// Override fields from variables resolved by `lookup`
    pub fn apply_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(api_url) = lookup("WIKI_API_URL") {
            self.api_url = api_url;
        }
        if let Some(site_url) = lookup("WIKI_SITE_URL") {
            self.site_url = site_url;
        }
        if let Some(cache_path) = lookup("WIKI_CACHE_PATH") {
            self.cache_path = Some(PathBuf::from(cache_path));
        }
        self
    }

    /// Reject configurations that cannot produce a working client
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.api_url)
            .map_err(|e| WikiError::Config(format!("api_url {:?}: {}", self.api_url, e)))?;
        url::Url::parse(&self.site_url)
            .map_err(|e| WikiError::Config(format!("site_url {:?}: {}", self.site_url, e)))?;
        if self.limit == 0 {
            return Err(WikiError::Config("limit must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Cache lifetime, `None` when entries never expire
    pub fn cache_ttl(&self) -> Option<Duration> {
        if self.cache_ttl_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.cache_ttl_secs))
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}
