//! Typed errors for the matcher library.
//!
//! Uses `thiserror` for library errors (not `anyhow`). These errors stay
//! inside a stage; each stage converts them into its result value at the
//! boundary.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur inside the pipeline stages.
#[derive(Debug, Error)]
pub enum MatcherError {
    /// Page fetch failed
    #[error("{0}")]
    Fetch(#[from] FetchError),

    /// Language model unavailable or failed
    #[error("{0}")]
    Ai(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Model reply was not valid JSON for the expected shape
    #[error("{0}")]
    JsonParse(#[from] serde_json::Error),

    /// Fund dataset could not be read or decoded
    #[error("fund dataset {path}: {source}")]
    FundData {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Report file could not be written
    #[error("failed to write {path}: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

impl MatcherError {
    /// Wrap any model-backend error.
    pub fn ai(e: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Ai(Box::new(e))
    }
}

/// Errors that can occur while fetching a single page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Malformed URL, no request was made
    #[error("Invalid URL format: {url}")]
    InvalidUrl { url: String },

    /// Transport-level failure (DNS, connection refused, TLS, body read)
    #[error("HTTP request failed for {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Server answered with a non-2xx status
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// No response within the configured timeout
    #[error("timeout fetching {url}")]
    Timeout { url: String },
}

/// Terminal (or, for matching, partial) failure categories of one URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Malformed input, nothing was fetched
    InvalidUrl,
    /// Homepage could not be fetched
    FetchFailure,
    /// Homepage fetched but produced no text
    NoContent,
    /// Profile extraction failed; no profile is returned
    ExtractionFailure,
    /// Matching failed; the profile is still returned
    MatchingFailure,
}

impl FailureKind {
    /// Whether this failure stops processing of the URL.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::MatchingFailure)
    }
}

/// Result type alias for matcher operations.
pub type Result<T> = std::result::Result<T, MatcherError>;

/// Result type alias for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;
