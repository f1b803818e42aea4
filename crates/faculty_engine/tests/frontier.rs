use std::time::Duration;

use faculty_engine::{
    CrawlFrontier, DiscoveryRules, FetchSettings, ReqwestFetcher, RetryPolicy,
};
use pretty_assertions::assert_eq;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn daiict_frontier() -> CrawlFrontier {
    CrawlFrontier::new(DiscoveryRules::default())
}

/// Rules pointed at a wiremock server instead of the real site.
fn local_rules(server: &MockServer) -> DiscoveryRules {
    DiscoveryRules {
        host_guard: server
            .uri()
            .strip_prefix("http://")
            .unwrap()
            .to_string(),
        base_url: server.uri(),
        ..DiscoveryRules::default()
    }
}

fn fast_settings() -> FetchSettings {
    FetchSettings {
        request_delay: Duration::ZERO,
        retry: RetryPolicy {
            max_attempts: 1,
            min_wait: Duration::from_millis(1),
            max_wait: Duration::from_millis(1),
            total_deadline: Duration::from_secs(5),
        },
        ..FetchSettings::default()
    }
}

fn directory_page(hrefs: &[&str]) -> String {
    let links: String = hrefs
        .iter()
        .map(|href| format!("<a href=\"{href}\">profile</a>"))
        .collect();
    format!("<html><body><nav><a href=\"/faculty\">Faculty</a></nav>{links}</body></html>")
}

#[test]
fn relative_link_resolves_against_the_base_host() {
    let html = directory_page(&["/faculty/jane-doe"]);
    let urls = daiict_frontier().scan_directory(&html, "https://www.daiict.ac.in/faculty");
    assert_eq!(urls, vec!["https://www.daiict.ac.in/faculty/jane-doe"]);
}

#[test]
fn link_without_a_category_marker_is_excluded() {
    let html = directory_page(&["/about/people/deans/jane-doe"]);
    let urls = daiict_frontier().scan_directory(&html, "https://www.daiict.ac.in/faculty");
    assert!(urls.is_empty());
}

#[test]
fn directory_self_link_is_excluded() {
    // The nav self-link "/faculty" has a single path segment and no marker.
    let html = directory_page(&[]);
    let urls = daiict_frontier().scan_directory(&html, "https://www.daiict.ac.in/faculty");
    assert!(urls.is_empty());
}

#[test]
fn foreign_host_sharing_a_path_fragment_is_excluded() {
    let html = directory_page(&["https://other.example.edu/faculty/jane-doe"]);
    let urls = daiict_frontier().scan_directory(&html, "https://www.daiict.ac.in/faculty");
    assert!(urls.is_empty());
}

#[test]
fn duplicates_within_one_page_are_collapsed() {
    let html = directory_page(&["/faculty/jane-doe", "/faculty/john-roe", "/faculty/jane-doe"]);
    let urls = daiict_frontier().scan_directory(&html, "https://www.daiict.ac.in/faculty");
    assert_eq!(
        urls,
        vec![
            "https://www.daiict.ac.in/faculty/jane-doe",
            "https://www.daiict.ac.in/faculty/john-roe",
        ]
    );
}

#[tokio::test]
async fn duplicate_across_seeds_is_kept_at_its_first_position() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/faculty"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            directory_page(&["/faculty/alpha", "/faculty/shared"]),
            "text/html",
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/adjunct-faculty"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            directory_page(&["/faculty/shared", "/adjunct-faculty/gamma"]),
            "text/html",
        ))
        .mount(&server)
        .await;

    let frontier = CrawlFrontier::new(local_rules(&server));
    let fetcher = ReqwestFetcher::new(fast_settings()).unwrap();
    let seeds = vec![
        format!("{}/faculty", server.uri()),
        format!("{}/adjunct-faculty", server.uri()),
    ];

    let outcome = frontier
        .discover(&fetcher, &seeds, &CancellationToken::new())
        .await;

    assert!(!outcome.cancelled);
    assert!(outcome.unreachable_seeds.is_empty());
    assert_eq!(outcome.groups.len(), 2);
    assert_eq!(outcome.groups[0].category, "faculty");
    assert_eq!(outcome.groups[1].category, "adjunct-faculty");

    let flattened: Vec<String> = outcome
        .flattened()
        .into_iter()
        .map(|link| link.url)
        .collect();
    assert_eq!(
        flattened,
        vec![
            format!("{}/faculty/alpha", server.uri()),
            format!("{}/faculty/shared", server.uri()),
            format!("{}/adjunct-faculty/gamma", server.uri()),
        ]
    );
}

#[tokio::test]
async fn unreachable_seed_is_reported_and_the_run_continues() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/faculty"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/adjunct-faculty"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(directory_page(&["/adjunct-faculty/gamma"]), "text/html"),
        )
        .mount(&server)
        .await;

    let frontier = CrawlFrontier::new(local_rules(&server));
    let fetcher = ReqwestFetcher::new(fast_settings()).unwrap();
    let seeds = vec![
        format!("{}/faculty", server.uri()),
        format!("{}/adjunct-faculty", server.uri()),
    ];

    let outcome = frontier
        .discover(&fetcher, &seeds, &CancellationToken::new())
        .await;

    assert_eq!(outcome.unreachable_seeds.len(), 1);
    assert_eq!(outcome.unreachable_seeds[0].url, seeds[0]);
    assert_eq!(outcome.groups.len(), 1);
    assert_eq!(outcome.groups[0].links.len(), 1);
}

#[tokio::test]
async fn cancelled_discovery_stops_before_fetching() {
    let frontier = daiict_frontier();
    let fetcher = ReqwestFetcher::new(fast_settings()).unwrap();
    let cancel = CancellationToken::new();
    cancel.cancel();

    // Port 9 is the discard service; nothing should ever be contacted.
    let seeds = vec!["http://127.0.0.1:9/faculty".to_string()];
    let outcome = frontier.discover(&fetcher, &seeds, &cancel).await;

    assert!(outcome.cancelled);
    assert!(outcome.groups.is_empty());
}
