use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Closed set of failure kinds a scraper can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidUrl,
    Validation,
    Parsing,
    Network,
}

impl ErrorKind {
    pub fn label(&self) -> &'static str {
        match self {
            ErrorKind::InvalidUrl => "Invalid URL",
            ErrorKind::Validation => "Validation error",
            ErrorKind::Parsing => "Parsing error",
            ErrorKind::Network => "Network error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("[{platform}] {kind}: {message}")]
pub struct ScraperError {
    pub platform: &'static str,
    pub kind: ErrorKind,
    pub message: String,
}

impl ScraperError {
    pub fn new(platform: &'static str, kind: ErrorKind, message: impl Into<String>) -> Self {
        ScraperError { platform, kind, message: message.into() }
    }

    pub fn invalid_url(platform: &'static str, message: impl Into<String>) -> Self { Self::new(platform, ErrorKind::InvalidUrl, message) }
    pub fn validation(platform: &'static str, message: impl Into<String>) -> Self { Self::new(platform, ErrorKind::Validation, message) }
    pub fn parsing(platform: &'static str, message: impl Into<String>) -> Self { Self::new(platform, ErrorKind::Parsing, message) }
    pub fn network(platform: &'static str, message: impl Into<String>) -> Self { Self::new(platform, ErrorKind::Network, message) }
}

/// Failure surfaced by the dispatcher. Every message carries the
/// `Failed to get problem:` prefix and keeps the underlying cause.
#[derive(Debug, Error)]
pub enum GetProblemError {
    #[error("Failed to get problem: Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to get problem: No scraper found for domain {0}. This online judge may not be supported yet.")]
    UnsupportedDomain(String),

    #[error("Failed to get problem: The {domain} scraper does not support this specific URL format: {url}")]
    UnsupportedUrl { domain: String, url: String },

    #[error("Failed to get problem: {0}")]
    Scraper(#[from] ScraperError),

    #[error("Failed to get problem: HTTP client setup failed: {0}")]
    Client(String),
}

impl GetProblemError {
    /// Scraper-level kind. A URL shape the judge does not recognize is an
    /// invalid URL, same as when the scraper is called directly.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            GetProblemError::Scraper(e) => Some(e.kind),
            GetProblemError::InvalidUrl(_) | GetProblemError::UnsupportedUrl { .. } => Some(ErrorKind::InvalidUrl),
            _ => None,
        }
    }
}
