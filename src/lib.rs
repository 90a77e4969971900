pub mod cache;
pub mod checker;
pub mod config;
pub mod detail;
pub mod error;
pub mod parsers;
pub mod results;
pub mod sources;
pub mod utils;

// Re-export commonly used types for convenience
pub use cache::DetailCache;
pub use config::WikiConfig;
pub use detail::DetailService;
pub use error::{Result, WikiError};
pub use results::{ImageState, ImageStatus, SearchResult};
pub use sources::{MediaWikiSource, WikiSource};

use std::path::PathBuf;

/// Main builder for a detail service talking to a MediaWiki site
pub struct Lookup {
    config: WikiConfig,
}

impl Lookup {
    /// Create a new Lookup builder with the given configuration.
    ///
    /// Environment overrides apply here, so the `with_*` setters called
    /// afterwards take precedence over them.
    pub fn new(config: WikiConfig) -> Self {
        Self {
            config: config.apply_env(),
        }
    }

    /// Load configuration from a file
    pub fn with_config_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        Ok(Self::new(WikiConfig::from_file(path)?))
    }

    /// Load configuration from a string
    pub fn with_config_str(config_str: &str) -> Result<Self> {
        Ok(Self::new(WikiConfig::from_json(config_str)?))
    }

    /// Set the maximum number of search results
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.config.limit = limit;
        self
    }

    /// Enable or disable image reachability checks
    pub fn with_image_check(mut self, enabled: bool) -> Self {
        self.config.check_images = enabled;
        self
    }

    /// Persist the detail cache to this file
    pub fn with_cache_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.cache_path = Some(path.into());
        self
    }

    pub fn config(&self) -> &WikiConfig {
        &self.config
    }

    /// Validate the configuration and build the service
    pub fn build(self) -> Result<DetailService<MediaWikiSource>> {
        let config = self.config;
        config.validate()?;

        let source = MediaWikiSource::new(&config)?;
        let cache = match &config.cache_path {
            Some(path) => DetailCache::with_snapshot(path, config.cache_ttl()),
            None => DetailCache::new(config.cache_ttl()),
        };

        ::log::debug!("Using wiki API at {}", config.api_url);
        Ok(DetailService::new(source, cache, &config))
    }
}
