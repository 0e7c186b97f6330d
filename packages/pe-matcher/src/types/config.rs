//! Configuration for scraping, extraction and matching.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default model for both LLM stages.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Default identifying user agent for page fetches.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; PEMatcher/1.0; +research)";

/// Tunables for the whole pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Model used for profile extraction.
    pub extraction_model: String,

    /// Model used for fund matching.
    pub matching_model: String,

    /// Per-page fetch timeout. Default: 10.
    pub request_timeout_secs: u64,

    /// Per-call model timeout. Default: 120.
    pub llm_timeout_secs: u64,

    /// URLs beyond this are dropped from a batch. Default: 10.
    pub max_urls_per_batch: usize,

    /// User agent sent with every fetch.
    pub user_agent: String,

    /// Matches requested from the model. Default: 10.
    pub max_matches: usize,

    /// Visible text kept per page, in characters. Default: 15 000.
    pub max_page_chars: usize,

    /// Combined text sent for extraction, in characters. Default: 50 000.
    pub max_content_chars: usize,

    /// Subpages fetched after the homepage. Default: 4.
    pub max_subpages: usize,

    /// Token budget for the extraction reply. Default: 2000.
    pub extraction_max_tokens: u32,

    /// Token budget for the matching reply. Default: 3000.
    pub matching_max_tokens: u32,

    /// Fund dataset location.
    pub funds_path: PathBuf,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            extraction_model: DEFAULT_MODEL.to_string(),
            matching_model: DEFAULT_MODEL.to_string(),
            request_timeout_secs: 10,
            llm_timeout_secs: 120,
            max_urls_per_batch: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_matches: 10,
            max_page_chars: 15_000,
            max_content_chars: 50_000,
            max_subpages: 4,
            extraction_max_tokens: 2000,
            matching_max_tokens: 3000,
            funds_path: default_funds_path(),
        }
    }
}

/// `data/pe_funds.json` inside this package.
pub fn default_funds_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("data")
        .join("pe_funds.json")
}

impl MatcherConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }

    /// Set the extraction model.
    pub fn with_extraction_model(mut self, model: impl Into<String>) -> Self {
        self.extraction_model = model.into();
        self
    }

    /// Set the matching model.
    pub fn with_matching_model(mut self, model: impl Into<String>) -> Self {
        self.matching_model = model.into();
        self
    }

    /// Set the fetch timeout in seconds.
    pub fn with_request_timeout(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    /// Set the model timeout in seconds.
    pub fn with_llm_timeout(mut self, secs: u64) -> Self {
        self.llm_timeout_secs = secs;
        self
    }

    /// Set the batch cap.
    pub fn with_max_urls(mut self, max: usize) -> Self {
        self.max_urls_per_batch = max;
        self
    }

    /// Set the fetch user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the number of matches requested.
    pub fn with_max_matches(mut self, max: usize) -> Self {
        self.max_matches = max;
        self
    }

    /// Set the fund dataset path.
    pub fn with_funds_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.funds_path = path.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MatcherConfig::default();
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.max_urls_per_batch, 10);
        assert_eq!(config.max_matches, 10);
        assert_eq!(config.max_subpages, 4);
        assert!(config.funds_path.ends_with("data/pe_funds.json"));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: MatcherConfig =
            serde_json::from_str(r#"{"matching_model": "claude-opus-4-20250514"}"#).unwrap();
        assert_eq!(config.matching_model, "claude-opus-4-20250514");
        assert_eq!(config.extraction_model, DEFAULT_MODEL);
        assert_eq!(config.max_page_chars, 15_000);
    }
}
