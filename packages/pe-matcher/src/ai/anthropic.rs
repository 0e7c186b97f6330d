//! Anthropic implementation of the `LanguageModel` trait.
//!
//! # Example
//!
//! ```rust,ignore
//! use anthropic_client::AnthropicClient;
//! use pe_matcher::{MatcherConfig, Pipeline};
//!
//! let client = AnthropicClient::from_env()?.with_timeout(config.llm_timeout());
//! let pipeline = Pipeline::new(fetcher, Arc::new(client), config);
//! ```

use anthropic_client::{AnthropicClient, MessagesRequest};
use async_trait::async_trait;

use crate::error::{MatcherError, Result};
use crate::traits::ai::{CompletionRequest, LanguageModel};

#[async_trait]
impl LanguageModel for AnthropicClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        let CompletionRequest {
            model,
            prompt,
            max_tokens,
        } = request;

        let response = self
            .messages(MessagesRequest::single_turn(model, max_tokens, prompt))
            .await
            .map_err(MatcherError::ai)?;

        Ok(response.text)
    }

    fn name(&self) -> &str {
        "anthropic"
    }
}
