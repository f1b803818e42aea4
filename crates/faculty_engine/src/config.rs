use std::path::PathBuf;

use thiserror::Error;

use crate::fetch::FetchSettings;
use crate::frontier::DiscoveryRules;

/// The fixed directory listing pages, one per faculty category.
pub fn default_seed_urls() -> Vec<String> {
    [
        "https://www.daiict.ac.in/faculty",
        "https://www.daiict.ac.in/adjunct-faculty",
        "https://www.daiict.ac.in/adjunct-faculty-international",
        "https://www.daiict.ac.in/distinguished-professor",
        "https://www.daiict.ac.in/professor-practice",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Everything the pipeline consumes, passed in at construction. No
/// process-wide mutable state, no runtime reload.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub seed_urls: Vec<String>,
    pub discovery: DiscoveryRules,
    pub fetch: FetchSettings,
    /// Raw HTML capture directory; `None` disables the side channel.
    pub raw_capture_dir: Option<PathBuf>,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            seed_urls: default_seed_urls(),
            discovery: DiscoveryRules::default(),
            fetch: FetchSettings::default(),
            raw_capture_dir: None,
        }
    }
}

/// Configuration problems are the only fatal errors in the system, and
/// only at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no seed urls configured")]
    NoSeeds,
    #[error("no profile path markers configured")]
    NoPathMarkers,
    #[error("invalid base url {url}: {message}")]
    InvalidBaseUrl { url: String, message: String },
    #[error("failed to build http client: {0}")]
    HttpClient(String),
    #[error("raw capture directory unusable: {0}")]
    RawCaptureDir(String),
}

impl CrawlConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.seed_urls.is_empty() {
            return Err(ConfigError::NoSeeds);
        }
        if self.discovery.path_markers.is_empty() {
            return Err(ConfigError::NoPathMarkers);
        }
        url::Url::parse(&self.discovery.base_url).map_err(|err| ConfigError::InvalidBaseUrl {
            url: self.discovery.base_url.clone(),
            message: err.to_string(),
        })?;
        Ok(())
    }
}
