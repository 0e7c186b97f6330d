//! Testing utilities including mock implementations.
//!
//! These let applications exercise the pipeline without network access or
//! model calls.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::error::{FetchError, FetchResult, MatcherError, Result};
use crate::traits::{
    ai::{CompletionRequest, LanguageModel},
    fetcher::PageFetcher,
};

/// Marker present only in extraction prompts.
pub const EXTRACTION_MARKER: &str = "WEBSITE CONTENT:";

/// Marker present only in matching prompts.
pub const MATCHING_MARKER: &str = "PE FUND DATABASE:";

/// Canned model behavior.
#[derive(Debug, Clone)]
pub enum MockReply {
    Text(String),
    Error(String),
}

/// A mock language model.
///
/// Replies are chosen by the first rule whose needle occurs in the prompt,
/// falling back to the default reply. Every request is recorded.
#[derive(Default)]
pub struct MockLanguageModel {
    rules: Vec<(String, MockReply)>,
    default_reply: Option<MockReply>,
    calls: RwLock<Vec<CompletionRequest>>,
}

impl MockLanguageModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply with `text` when the prompt contains `needle`.
    pub fn with_reply(mut self, needle: impl Into<String>, text: impl Into<String>) -> Self {
        self.rules
            .push((needle.into(), MockReply::Text(text.into())));
        self
    }

    /// Fail with `message` when the prompt contains `needle`.
    pub fn with_error(mut self, needle: impl Into<String>, message: impl Into<String>) -> Self {
        self.rules
            .push((needle.into(), MockReply::Error(message.into())));
        self
    }

    /// Reply to extraction prompts.
    pub fn with_extraction_reply(self, text: impl Into<String>) -> Self {
        self.with_reply(EXTRACTION_MARKER, text)
    }

    /// Reply to matching prompts.
    pub fn with_matching_reply(self, text: impl Into<String>) -> Self {
        self.with_reply(MATCHING_MARKER, text)
    }

    pub fn with_default_reply(mut self, text: impl Into<String>) -> Self {
        self.default_reply = Some(MockReply::Text(text.into()));
        self
    }

    pub fn with_default_error(mut self, message: impl Into<String>) -> Self {
        self.default_reply = Some(MockReply::Error(message.into()));
        self
    }

    /// Requests received so far, in order.
    pub fn calls(&self) -> Vec<CompletionRequest> {
        self.calls
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn reply_for(&self, prompt: &str) -> Option<&MockReply> {
        self.rules
            .iter()
            .find(|(needle, _)| prompt.contains(needle.as_str()))
            .map(|(_, reply)| reply)
            .or(self.default_reply.as_ref())
    }
}

#[async_trait]
impl LanguageModel for MockLanguageModel {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        let reply = self.reply_for(&request.prompt).cloned();

        self.calls
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);

        match reply {
            Some(MockReply::Text(text)) => Ok(text),
            Some(MockReply::Error(message)) => Err(MatcherError::Ai(message.into())),
            None => Err(MatcherError::Ai("no mock reply configured".into())),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[derive(Debug, Clone)]
enum MockPage {
    Html(String),
    Status(u16),
    Timeout,
}

/// A mock page fetcher keyed by exact URL.
///
/// Unknown URLs fail like an unreachable host. Every fetch is recorded.
#[derive(Default)]
pub struct MockFetcher {
    pages: HashMap<String, MockPage>,
    fetched: RwLock<Vec<String>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `html` for `url`.
    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), MockPage::Html(html.into()));
        self
    }

    /// Answer `url` with a non-success status.
    pub fn with_status(mut self, url: impl Into<String>, status: u16) -> Self {
        self.pages.insert(url.into(), MockPage::Status(status));
        self
    }

    /// Time out on `url`.
    pub fn with_timeout(mut self, url: impl Into<String>) -> Self {
        self.pages.insert(url.into(), MockPage::Timeout);
        self
    }

    /// URLs fetched so far, in order.
    pub fn fetched(&self) -> Vec<String> {
        self.fetched
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<String> {
        self.fetched
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(url.to_string());

        match self.pages.get(url) {
            Some(MockPage::Html(html)) => Ok(html.clone()),
            Some(MockPage::Status(status)) => Err(FetchError::Status {
                url: url.to_string(),
                status: *status,
            }),
            Some(MockPage::Timeout) => Err(FetchError::Timeout {
                url: url.to_string(),
            }),
            None => Err(FetchError::Http {
                url: url.to_string(),
                source: "connection refused".into(),
            }),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
