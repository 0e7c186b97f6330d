//! HTTP-based page fetcher.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{FetchError, FetchResult, MatcherError, Result};
use crate::scrape::url::is_valid_url;
use crate::traits::fetcher::PageFetcher;
use crate::types::config::MatcherConfig;

/// Maximum redirects followed per fetch.
const MAX_REDIRECTS: usize = 10;

/// Fetches pages with `reqwest`: bounded timeout, fixed user agent,
/// redirects followed.
///
/// # Example
///
/// ```rust,ignore
/// let fetcher = HttpFetcher::new("PEMatcher/1.0", Duration::from_secs(10))?;
/// let html = fetcher.fetch("https://example.com").await?;
/// ```
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Create a fetcher with the given user agent and timeout.
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| MatcherError::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client, timeout })
    }

    /// Create a fetcher from the pipeline config.
    pub fn from_config(config: &MatcherConfig) -> Result<Self> {
        Self::new(&config.user_agent, config.request_timeout())
    }

    /// Use a pre-built client (its own timeout and user agent apply).
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    fn classify(&self, url: &str, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else {
            FetchError::Http {
                url: url.to_string(),
                source: Box::new(e),
            }
        }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<String> {
        if !is_valid_url(url) {
            return Err(FetchError::InvalidUrl {
                url: url.to_string(),
            });
        }

        debug!(url = %url, timeout_secs = self.timeout.as_secs(), "HTTP fetch starting");

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "HTTP request failed");
            self.classify(url, e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = %status, "HTTP fetch returned non-success status");
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().to_string();
        let body = response.text().await.map_err(|e| self.classify(url, e))?;

        debug!(
            url = %url,
            final_url = %final_url,
            bytes = body.len(),
            "HTTP fetch complete"
        );

        Ok(body)
    }

    fn name(&self) -> &str {
        "http"
    }
}
