//! Language model trait for the two completion stages.
//!
//! Implementations wrap a specific provider (Anthropic by default) and
//! return the reply text verbatim. Prompting and response parsing live in
//! the pipeline, not here.

use async_trait::async_trait;

use crate::error::Result;

/// A single-turn completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Provider model identifier
    pub model: String,

    /// The full user prompt
    pub prompt: String,

    /// Upper bound on generated tokens
    pub max_tokens: u32,
}

impl CompletionRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            max_tokens,
        }
    }
}

/// Single-turn text completion.
///
/// One client instance is constructed by the caller and shared by every
/// stage of a pipeline; implementations must be safe to call repeatedly.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Send `request` and return the reply text.
    async fn complete(&self, request: CompletionRequest) -> Result<String>;

    /// Provider name for logging.
    fn name(&self) -> &str {
        "unknown"
    }
}
