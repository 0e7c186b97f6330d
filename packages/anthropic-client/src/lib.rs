//! Pure Anthropic REST API client
//!
//! A minimal client for the Anthropic Messages API with no domain-specific logic.
//!
//! # Example
//!
//! ```rust,ignore
//! use anthropic_client::{AnthropicClient, MessagesRequest};
//!
//! let client = AnthropicClient::from_env()?.with_timeout(Duration::from_secs(120));
//!
//! let response = client
//!     .messages(MessagesRequest::single_turn("claude-sonnet-4-20250514", 1000, "Hello!"))
//!     .await?;
//! println!("{}", response.text);
//! ```

pub mod error;
pub mod secret;
pub mod types;

pub use error::{AnthropicError, Result};
pub use secret::SecretString;
pub use types::*;

use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// API version header value sent with every request.
pub const DEFAULT_API_VERSION: &str = "2023-06-01";

/// Pure Anthropic API client.
#[derive(Clone, Debug)]
pub struct AnthropicClient {
    http_client: Client,
    api_key: SecretString,
    base_url: String,
    api_version: String,
    timeout: Option<Duration>,
}

impl AnthropicClient {
    /// Create a new client with the given API key.
    pub fn new(api_key: impl Into<SecretString>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://api.anthropic.com/v1".to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout: None,
        }
    }

    /// Create from environment variable `ANTHROPIC_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .map(SecretString::from)
            .map_err(|_| AnthropicError::Config("ANTHROPIC_API_KEY not set".into()))?;
        if api_key.is_blank() {
            return Err(AnthropicError::Config("ANTHROPIC_API_KEY is empty".into()));
        }
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL (for proxies or test servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Bound every request to `timeout`. Without this, requests wait as long
    /// as the transport allows.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the `anthropic-version` header.
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Send a Messages API request and return the reply text.
    pub async fn messages(&self, request: MessagesRequest) -> Result<MessagesResponse> {
        let start = std::time::Instant::now();

        let mut builder = self
            .http_client
            .post(format!("{}/messages", self.base_url))
            .header("x-api-key", self.api_key.expose())
            .header("anthropic-version", &self.api_version)
            .header("content-type", "application/json")
            .json(&request);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<types::ErrorEnvelope>(&error_text)
                .map(|envelope| {
                    format!("{}: {}", envelope.error.error_type, envelope.error.message)
                })
                .unwrap_or(error_text);
            warn!(status = %status, error = %message, "Anthropic API error");
            return Err(AnthropicError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let raw: types::MessagesResponseRaw = response
            .json()
            .await
            .map_err(|e| self.transport_error(e))?;

        let reply = raw
            .into_response()
            .ok_or_else(|| AnthropicError::Parse("No text content in Anthropic response".into()))?;

        if reply.was_truncated() {
            warn!(model = %request.model, max_tokens = request.max_tokens, "Anthropic reply hit max_tokens");
        }

        debug!(
            model = %request.model,
            duration_ms = start.elapsed().as_millis(),
            output_tokens = reply.usage.as_ref().map(|u| u.output_tokens),
            "Anthropic messages completion"
        );

        Ok(reply)
    }

    fn transport_error(&self, e: reqwest::Error) -> AnthropicError {
        if e.is_timeout() {
            let secs = self.timeout.map(|t| t.as_secs()).unwrap_or_default();
            warn!(timeout_secs = secs, "Anthropic request timed out");
            AnthropicError::Timeout(secs)
        } else if e.is_decode() {
            AnthropicError::Parse(e.to_string())
        } else {
            warn!(error = %e, "Anthropic request failed");
            AnthropicError::Network(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builder() {
        let client = AnthropicClient::new("sk-ant-test")
            .with_base_url("https://proxy.example.com/v1/")
            .with_timeout(Duration::from_secs(90));

        assert_eq!(client.api_key.expose(), "sk-ant-test");
        assert_eq!(client.base_url(), "https://proxy.example.com/v1");
        assert_eq!(client.timeout(), Some(Duration::from_secs(90)));
        assert_eq!(client.api_version, DEFAULT_API_VERSION);
    }

    #[test]
    fn test_debug_does_not_leak_key() {
        let client = AnthropicClient::new("sk-ant-test");
        let debug = format!("{:?}", client);
        assert!(!debug.contains("sk-ant-test"));
        assert!(debug.contains("[REDACTED]"));
    }
}
