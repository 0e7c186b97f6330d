//! Per-URL pipeline envelope.

use serde::{Deserialize, Serialize};

use crate::error::FailureKind;
use crate::types::{matching::MatchResult, profile::CompanyProfile};

/// Everything the pipeline produced for one input URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    /// URL as the caller supplied it
    pub url: String,

    /// True once a profile was extracted, even if matching failed
    pub success: bool,

    /// Human-readable failure, prefixed with the failing stage
    pub error: Option<String>,

    /// Category of `error`
    pub failure: Option<FailureKind>,

    pub company_profile: Option<CompanyProfile>,

    pub pe_matches: Option<MatchResult>,

    /// Wall-clock seconds spent on this URL
    pub processing_time_secs: f64,
}

impl PipelineResult {
    /// A terminal failure before any profile was produced.
    pub fn failed(url: impl Into<String>, kind: FailureKind, error: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            success: false,
            error: Some(error.into()),
            failure: Some(kind),
            company_profile: None,
            pe_matches: None,
            processing_time_secs: 0.0,
        }
    }

    /// Profile extracted; `matches` is None when matching failed.
    pub fn completed(
        url: impl Into<String>,
        profile: CompanyProfile,
        matches: Result<MatchResult, String>,
    ) -> Self {
        let (pe_matches, error, failure) = match matches {
            Ok(m) => (Some(m), None, None),
            Err(e) => (None, Some(e), Some(FailureKind::MatchingFailure)),
        };
        Self {
            url: url.into(),
            success: true,
            error,
            failure,
            company_profile: Some(profile),
            pe_matches,
            processing_time_secs: 0.0,
        }
    }

    pub fn with_processing_time(mut self, secs: f64) -> Self {
        self.processing_time_secs = secs;
        self
    }

    /// Profile extracted but matching failed.
    pub fn is_partial(&self) -> bool {
        self.success && self.failure.is_some_and(|kind| !kind.is_terminal())
    }

    /// Company name when known, otherwise the URL.
    pub fn display_name(&self) -> &str {
        self.company_profile
            .as_ref()
            .and_then(|p| p.company_name.as_deref())
            .unwrap_or(&self.url)
    }
}
