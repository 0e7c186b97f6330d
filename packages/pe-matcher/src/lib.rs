//! Company Website Profiling and PE Buyer Matching
//!
//! Given a company website, the pipeline:
//!
//! 1. scrapes the homepage and up to four keyword-discovered subpages,
//! 2. asks a language model for a structured [`CompanyProfile`],
//! 3. asks the same model to rank acquirer funds from a static dataset.
//!
//! URLs are processed strictly one at a time. Every stage returns a value
//! carrying a success flag; failures never escape as errors.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use anthropic_client::AnthropicClient;
//! use pe_matcher::{HttpFetcher, MatcherConfig, Pipeline};
//!
//! let config = MatcherConfig::default();
//! let client = AnthropicClient::from_env()?.with_timeout(config.llm_timeout());
//! let pipeline = Pipeline::new(HttpFetcher::from_config(&config)?, Arc::new(client), config);
//!
//! let result = pipeline.process_url("acme.example", "prefers growth equity").await;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Seams for page fetching and model calls
//! - [`types`] - Pages, profiles, funds, matches, config
//! - [`scrape`] - Content extraction, link discovery, site scraping
//! - [`pipeline`] - Profile extraction, fund matching, orchestration
//! - [`stores`] - The fund dataset
//! - [`output`] - JSON, Markdown and paginated reports
//! - [`fetchers`] - `reqwest`-based fetcher
//! - [`testing`] - Mock implementations for testing

pub mod ai;
pub mod error;
pub mod fetchers;
pub mod output;
pub mod pipeline;
pub mod scrape;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{FailureKind, FetchError, MatcherError};
pub use fetchers::HttpFetcher;
pub use output::{ExportFormat, JsonReport};
pub use pipeline::{
    calculate_overall_confidence, parse_url_list, FundMatcher, Pipeline, ProfileExtractor,
};
pub use scrape::{get_combined_content, normalize_url, DefaultKeywords, LinkKeywords, SiteScraper};
pub use stores::{FundFilter, FundStore};
pub use traits::{
    ai::{CompletionRequest, LanguageModel},
    fetcher::PageFetcher,
};
pub use types::{
    config::MatcherConfig,
    fund::{AcquirerFund, CheckSize},
    matching::{FundMatch, MatchResult, PeAnalysis},
    page::{LinkCategory, PageKind, ScrapeResult, ScrapedPage},
    pipeline::PipelineResult,
    profile::{CompanyProfile, CompanySize, Leader, Location},
};
