use std::fmt;

use crate::export::ExportError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ControllerError {
    pub kind: FailureKind,
    pub message: String,
}

impl ControllerError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn released() -> Self {
        Self::new(FailureKind::Released, "page controller already released")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    Decode,
    NoDocument,
    Released,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::Decode => write!(f, "decode error"),
            FailureKind::NoDocument => write!(f, "no document loaded"),
            FailureKind::Released => write!(f, "released"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Failures of the scraping pipeline.
///
/// Only `Controller` (acquisition), `InvalidRequest`, `InvalidSearchUrl` and
/// `Export` end a run. The rest are reported per item and the run continues.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("results panel `{selector}` not found")]
    PanelNotFound { selector: String },
    #[error("extraction failed for {url}: {reason}")]
    ExtractionFailure { url: String, reason: String },
    #[error("no data collected")]
    NoDataCollected,
    #[error("invalid run request: {0}")]
    InvalidRequest(String),
    #[error("invalid search url `{url}`: {message}")]
    InvalidSearchUrl { url: String, message: String },
    #[error("page controller error: {0}")]
    Controller(#[from] ControllerError),
    #[error("export error: {0}")]
    Export(#[from] ExportError),
}

impl ScrapeError {
    pub(crate) fn extraction(url: &str, reason: impl fmt::Display) -> Self {
        ScrapeError::ExtractionFailure {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}
