//! Faculty profile acquisition engine: crawl frontier, fetcher with bounded
//! retries, field extraction and the pipeline that ties them together.
mod capture;
mod config;
mod decode;
mod extract;
mod fetch;
mod frontier;
mod persist;
mod pipeline;
mod retry;
mod rules;
mod types;

pub use capture::{capture_filename, profile_slug};
pub use config::{default_seed_urls, ConfigError, CrawlConfig};
pub use decode::{decode_html, DecodeError};
pub use extract::FieldExtractor;
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use frontier::{CrawlFrontier, DirectoryGroup, DiscoveryOutcome, DiscoveryRules};
pub use persist::{PersistError, RawHtmlStore};
pub use pipeline::ProfilePipeline;
pub use retry::RetryPolicy;
pub use rules::{Field, FieldRule, FIELD_RULES, IMAGE_CLASS};
pub use types::{
    CrawlReport, FailureKind, FetchFailure, FetchedPage, ProfileLink, UnreachableUrl,
};
