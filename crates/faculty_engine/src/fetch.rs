use std::time::{Duration, Instant};

use engine_logging::{engine_info, engine_warn};
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION, CONTENT_TYPE, USER_AGENT,
};

use crate::decode::decode_html;
use crate::retry::RetryPolicy;
use crate::types::{FailureKind, FetchFailure, FetchedPage};

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub user_agent: String,
    pub accept: String,
    pub accept_language: String,
    pub request_timeout: Duration,
    /// Politeness delay applied after every successful fetch. Callers never
    /// pace themselves.
    pub request_delay: Duration,
    pub retry: RetryPolicy,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string(),
            accept: "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"
                .to_string(),
            accept_language: "en-US,en;q=0.5".to_string(),
            request_timeout: Duration::from_secs(10),
            request_delay: Duration::from_secs(1),
            retry: RetryPolicy::default(),
        }
    }
}

#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchFailure>;
}

/// HTTP GET with browser-like headers, bounded retries with exponential
/// backoff on transient failures, and the politeness delay on success.
pub struct ReqwestFetcher {
    client: reqwest::Client,
    settings: FetchSettings,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchFailure> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, header_value(&settings.user_agent)?);
        headers.insert(ACCEPT, header_value(&settings.accept)?);
        headers.insert(ACCEPT_LANGUAGE, header_value(&settings.accept_language)?);
        headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchFailure::new(FailureKind::Network, err.to_string()))?;

        Ok(Self { client, settings })
    }

    async fn fetch_once(&self, url: &reqwest::Url) -> Result<String, FetchFailure> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;

        decode_html(&bytes, content_type.as_deref())
            .map_err(|err| FetchFailure::new(FailureKind::Decode, err.to_string()))
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchFailure> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|err| FetchFailure::new(FailureKind::InvalidUrl, err.to_string()))?;

        let policy = &self.settings.retry;
        let started = Instant::now();
        let mut attempt = 1u32;
        loop {
            engine_info!("fetching {url} (attempt {attempt}/{})", policy.max_attempts);
            match self.fetch_once(&parsed).await {
                Ok(html) => {
                    tokio::time::sleep(self.settings.request_delay).await;
                    return Ok(FetchedPage {
                        url: url.to_string(),
                        html,
                    });
                }
                Err(failure) => {
                    if !failure.kind.is_transient() {
                        return Err(failure);
                    }
                    if attempt >= policy.max_attempts {
                        engine_warn!("giving up on {url} after {attempt} attempts: {failure}");
                        return Err(failure);
                    }
                    let wait = policy.wait_before(attempt);
                    if started.elapsed() + wait > policy.total_deadline {
                        engine_warn!("retry deadline exhausted for {url}: {failure}");
                        return Err(failure);
                    }
                    engine_warn!(
                        "transient failure on {url}: {failure}; retrying in {:.1}s",
                        wait.as_secs_f64()
                    );
                    tokio::time::sleep(wait).await;
                    attempt += 1;
                }
            }
        }
    }
}

fn header_value(value: &str) -> Result<HeaderValue, FetchFailure> {
    HeaderValue::from_str(value)
        .map_err(|err| FetchFailure::new(FailureKind::Network, err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> FetchFailure {
    if err.is_timeout() {
        return FetchFailure::new(FailureKind::Timeout, err.to_string());
    }
    FetchFailure::new(FailureKind::Network, err.to_string())
}
