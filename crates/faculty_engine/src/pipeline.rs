use std::sync::Arc;

use engine_logging::{engine_debug, engine_info, engine_warn};
use faculty_core::{ExtractedFields, FacultyRecord, NOT_PROVIDED};
use tokio_util::sync::CancellationToken;

use crate::capture::capture_filename;
use crate::config::{ConfigError, CrawlConfig};
use crate::extract::FieldExtractor;
use crate::fetch::{Fetcher, ReqwestFetcher};
use crate::frontier::CrawlFrontier;
use crate::persist::RawHtmlStore;
use crate::types::{CrawlReport, UnreachableUrl};

/// Drives a whole acquisition run: seed discovery, per-profile fetch,
/// optional raw capture, extraction and record validation. Partial success
/// is the steady state; nothing after startup aborts the run.
pub struct ProfilePipeline {
    seeds: Vec<String>,
    fetcher: Arc<dyn Fetcher>,
    frontier: CrawlFrontier,
    extractor: FieldExtractor,
    store: Option<RawHtmlStore>,
}

impl std::fmt::Debug for ProfilePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfilePipeline").finish_non_exhaustive()
    }
}

impl ProfilePipeline {
    pub fn new(config: CrawlConfig) -> Result<Self, ConfigError> {
        let fetcher = ReqwestFetcher::new(config.fetch.clone())
            .map_err(|err| ConfigError::HttpClient(err.to_string()))?;
        Self::with_fetcher(config, Arc::new(fetcher))
    }

    /// Same pipeline with an injected fetcher, for tests and callers that
    /// bring their own transport.
    pub fn with_fetcher(
        config: CrawlConfig,
        fetcher: Arc<dyn Fetcher>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let store = match &config.raw_capture_dir {
            Some(dir) => Some(
                RawHtmlStore::create(dir.clone())
                    .map_err(|err| ConfigError::RawCaptureDir(err.to_string()))?,
            ),
            None => None,
        };
        Ok(Self {
            seeds: config.seed_urls.clone(),
            frontier: CrawlFrontier::new(config.discovery.clone()),
            extractor: FieldExtractor::new(config.discovery.base_url.clone()),
            fetcher,
            store,
        })
    }

    pub async fn run(&self, cancel: &CancellationToken) -> CrawlReport {
        let mut report = CrawlReport::default();

        let discovery = self
            .frontier
            .discover(self.fetcher.as_ref(), &self.seeds, cancel)
            .await;
        report.cancelled = discovery.cancelled;
        report.unreachable.extend(discovery.unreachable_seeds.clone());

        let total: usize = discovery.groups.iter().map(|g| g.links.len()).sum();
        engine_info!(
            "discovered {total} unique profile links across {} directories",
            discovery.groups.len()
        );

        let mut crawled = 0usize;
        for group in &discovery.groups {
            engine_info!("crawling {}: {} profiles", group.category, group.links.len());
            for link in &group.links {
                if cancel.is_cancelled() {
                    report.cancelled = true;
                    return report;
                }
                crawled += 1;
                engine_info!("[{crawled}/{total}] {}", link.url);

                let page = match self.fetcher.fetch(&link.url).await {
                    Ok(page) => page,
                    Err(failure) => {
                        engine_warn!("unreachable: {} ({failure})", link.url);
                        report.unreachable.push(UnreachableUrl {
                            url: link.url.clone(),
                            reason: failure.to_string(),
                        });
                        continue;
                    }
                };

                let source_file = capture_filename(&page.url);
                if let Some(store) = &self.store {
                    if let Err(err) = store.save(&page.url, &page.html) {
                        engine_warn!("raw capture failed for {}: {err}", page.url);
                    }
                }

                let fields = self.extractor.extract(&page.html);
                if fields == ExtractedFields::default() {
                    engine_debug!("no recognizable fields in {source_file}");
                }
                let record = FacultyRecord::from_fields(fields, &source_file);
                if record.name == NOT_PROVIDED {
                    engine_warn!("dropping {source_file}: no usable name");
                    report.dropped.push(source_file);
                } else {
                    report.records.push(record);
                }
            }
        }

        engine_info!(
            "crawl finished: {} records, {} unreachable, {} dropped",
            report.records.len(),
            report.unreachable.len(),
            report.dropped.len()
        );
        report
    }
}
