use std::collections::HashSet;

use engine_logging::{engine_info, engine_warn};
use scraper::{Html, Selector};
use tokio_util::sync::CancellationToken;

use crate::fetch::Fetcher;
use crate::types::{ProfileLink, UnreachableUrl};

/// Candidate filter and URL resolution rules for directory pages.
#[derive(Debug, Clone)]
pub struct DiscoveryRules {
    /// Base host that relative links resolve against.
    pub base_url: String,
    /// The resolved absolute URL must contain `<host_guard><marker>` for
    /// some marker; guards against unrelated links sharing a path fragment.
    pub host_guard: String,
    /// A link is a candidate only if its href contains one of these.
    pub path_markers: Vec<String>,
}

impl Default for DiscoveryRules {
    fn default() -> Self {
        Self {
            base_url: "https://www.daiict.ac.in".to_string(),
            host_guard: "daiict.ac.in".to_string(),
            path_markers: vec![
                "/faculty/".to_string(),
                "/adjunct-faculty/".to_string(),
                "/adjunct-faculty-international/".to_string(),
                "/distinguished-professor/".to_string(),
                "/professor-practice/".to_string(),
            ],
        }
    }
}

/// Links found under one seed, tagged with the seed's faculty category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryGroup {
    pub category: String,
    pub seed_url: String,
    pub links: Vec<ProfileLink>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryOutcome {
    pub groups: Vec<DirectoryGroup>,
    pub unreachable_seeds: Vec<UnreachableUrl>,
    pub cancelled: bool,
}

impl DiscoveryOutcome {
    /// Order-preserving concatenation across seeds, for callers that do not
    /// need the per-seed grouping.
    pub fn flattened(&self) -> Vec<ProfileLink> {
        self.groups
            .iter()
            .flat_map(|group| group.links.iter().cloned())
            .collect()
    }
}

/// Expands seed directory pages into a deduplicated, order-stable list of
/// profile links. The dedup set is scoped to a single `discover` run.
pub struct CrawlFrontier {
    rules: DiscoveryRules,
}

impl CrawlFrontier {
    pub fn new(rules: DiscoveryRules) -> Self {
        Self { rules }
    }

    pub async fn discover(
        &self,
        fetcher: &dyn Fetcher,
        seeds: &[String],
        cancel: &CancellationToken,
    ) -> DiscoveryOutcome {
        let mut outcome = DiscoveryOutcome::default();
        let mut seen: HashSet<String> = HashSet::new();

        for seed in seeds {
            if cancel.is_cancelled() {
                outcome.cancelled = true;
                break;
            }
            let category = seed_category(seed);
            let html = match fetcher.fetch(seed).await {
                Ok(page) => page.html,
                Err(failure) => {
                    engine_warn!("seed {seed} unreachable: {failure}");
                    outcome.unreachable_seeds.push(UnreachableUrl {
                        url: seed.clone(),
                        reason: failure.to_string(),
                    });
                    continue;
                }
            };

            let mut links = Vec::new();
            for url in self.scan_directory(&html, seed) {
                // First-seen wins across seeds; later rediscoveries are dropped.
                if seen.insert(url.clone()) {
                    links.push(ProfileLink {
                        url,
                        category: category.clone(),
                    });
                }
            }
            engine_info!("{category}: {} profile links", links.len());
            outcome.groups.push(DirectoryGroup {
                category,
                seed_url: seed.clone(),
                links,
            });
        }

        outcome
    }

    /// All candidate profile URLs on one directory page, resolved to
    /// absolute form, in document order, deduplicated within the page.
    pub fn scan_directory(&self, html: &str, seed_url: &str) -> Vec<String> {
        let document = Html::parse_document(html);
        let anchors = match Selector::parse("a[href]") {
            Ok(selector) => selector,
            Err(_) => return Vec::new(),
        };

        let mut urls = Vec::new();
        for anchor in document.select(&anchors) {
            let Some(href) = anchor.value().attr("href").map(str::trim) else {
                continue;
            };
            if !self
                .rules
                .path_markers
                .iter()
                .any(|marker| href.contains(marker.as_str()))
            {
                continue;
            }
            // The directory's own self-link and top navigation carry a
            // single path segment.
            if href.matches('/').count() < 2 {
                continue;
            }
            let absolute = self.resolve(href, seed_url);
            if !self.host_guarded(&absolute) {
                continue;
            }
            if !urls.contains(&absolute) {
                urls.push(absolute);
            }
        }
        urls
    }

    fn resolve(&self, href: &str, seed_url: &str) -> String {
        if href.starts_with("http") {
            href.to_string()
        } else if href.starts_with('/') {
            format!("{}{}", self.rules.base_url, href)
        } else {
            format!("{}/{}", seed_url.trim_end_matches('/'), href)
        }
    }

    fn host_guarded(&self, url: &str) -> bool {
        self.rules
            .path_markers
            .iter()
            .any(|marker| url.contains(&format!("{}{}", self.rules.host_guard, marker)))
    }
}

/// Faculty category of a seed: its trailing path segment.
fn seed_category(seed: &str) -> String {
    seed.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(seed)
        .to_string()
}
