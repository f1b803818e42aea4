use std::fmt;

use faculty_core::FacultyRecord;
use thiserror::Error;

/// Body text of a successfully fetched page, paired with the URL it was
/// requested under. Ephemeral; owned by the fetch call that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub url: String,
    pub html: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    Timeout,
    Network,
    HttpStatus(u16),
    Decode,
}

impl FailureKind {
    /// Transient failures are worth retrying; everything else is permanent
    /// for the URL in question.
    pub fn is_transient(&self) -> bool {
        match self {
            FailureKind::Timeout | FailureKind::Network => true,
            FailureKind::HttpStatus(code) => *code == 429 || *code >= 500,
            FailureKind::InvalidUrl | FailureKind::Decode => false,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Decode => write!(f, "undecodable body"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct FetchFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchFailure {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// A resolved, absolute profile URL candidate tagged with the faculty
/// category it was discovered under. Unique by URL within one crawl run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileLink {
    pub url: String,
    pub category: String,
}

/// A URL that exhausted its retries (or failed permanently). Terminal for
/// that URL only; the run continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnreachableUrl {
    pub url: String,
    pub reason: String,
}

/// Final output of a pipeline run. Records appear in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlReport {
    pub records: Vec<FacultyRecord>,
    pub unreachable: Vec<UnreachableUrl>,
    /// Capture filenames of records dropped for lacking a usable name.
    pub dropped: Vec<String>,
    pub cancelled: bool,
}
