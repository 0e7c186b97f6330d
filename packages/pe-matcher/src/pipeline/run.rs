//! Scrape, extract and match, one URL at a time.

use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use super::extract::{calculate_overall_confidence, ProfileExtractor};
use super::matcher::FundMatcher;
use crate::error::FailureKind;
use crate::scrape::site::{get_combined_content, SiteScraper, INVALID_URL_ERROR};
use crate::scrape::url::{is_valid_url, normalize_url};
use crate::traits::ai::LanguageModel;
use crate::traits::fetcher::PageFetcher;
use crate::types::config::MatcherConfig;
use crate::types::page::ScrapedPage;
use crate::types::pipeline::PipelineResult;

/// Error recorded when a site yields no visible text.
pub const NO_CONTENT_ERROR: &str = "No content extracted from website";

/// Split pasted or file-loaded URL text into entries: one per line,
/// trimmed, blank lines dropped.
pub fn parse_url_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// The full per-URL pipeline.
///
/// One model client is shared by the extraction and matching stages for
/// the pipeline's lifetime.
///
/// # Example
///
/// ```rust,ignore
/// let pipeline = Pipeline::new(HttpFetcher::from_config(&config)?, Arc::new(client), config);
/// let result = pipeline.process_url("acme.example", "").await;
/// ```
pub struct Pipeline<F: PageFetcher, A: LanguageModel> {
    scraper: SiteScraper<F>,
    extractor: ProfileExtractor<A>,
    matcher: FundMatcher<A>,
    config: MatcherConfig,
}

impl<F: PageFetcher, A: LanguageModel> Pipeline<F, A> {
    pub fn new(fetcher: F, ai: Arc<A>, config: MatcherConfig) -> Self {
        Self {
            scraper: SiteScraper::from_config(fetcher, &config),
            extractor: ProfileExtractor::new(ai.clone(), &config),
            matcher: FundMatcher::new(ai, &config),
            config,
        }
    }

    /// Replace the scraper, e.g. to change link keywords.
    pub fn with_scraper(mut self, scraper: SiteScraper<F>) -> Self {
        self.scraper = scraper;
        self
    }

    /// Replace the matcher, e.g. to point at another fund dataset.
    pub fn with_matcher(mut self, matcher: FundMatcher<A>) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    pub fn scraper(&self) -> &SiteScraper<F> {
        &self.scraper
    }

    /// Process one URL. Never fails; inspect `success` and `failure`.
    pub async fn process_url(&self, url: &str, user_context: &str) -> PipelineResult {
        let started = Instant::now();
        let result = self.run_stages(url, user_context).await;
        let elapsed = started.elapsed().as_secs_f64();

        match &result.failure {
            None => info!(url = %url, elapsed_secs = elapsed, "URL processed"),
            Some(kind) => warn!(
                url = %url,
                failure = ?kind,
                terminal = kind.is_terminal(),
                error = result.error.as_deref().unwrap_or(""),
                elapsed_secs = elapsed,
                "URL processed with failure"
            ),
        }

        result.with_processing_time(elapsed)
    }

    async fn run_stages(&self, url: &str, user_context: &str) -> PipelineResult {
        if !is_valid_url(&normalize_url(url)) {
            return PipelineResult::failed(
                url,
                FailureKind::InvalidUrl,
                format!("Scraping failed: {}", INVALID_URL_ERROR),
            );
        }

        let scraped = self.scraper.scrape(url).await;
        if !scraped.success {
            let error = scraped.error.as_deref().unwrap_or("Unknown error");
            return PipelineResult::failed(
                url,
                FailureKind::FetchFailure,
                format!("Scraping failed: {}", error),
            );
        }

        if !scraped.pages.iter().any(ScrapedPage::has_text) {
            return PipelineResult::failed(url, FailureKind::NoContent, NO_CONTENT_ERROR);
        }

        let content = get_combined_content(&scraped);

        let mut profile = self.extractor.extract(&content).await;
        if !profile.extraction_success {
            let error = profile.error.as_deref().unwrap_or("Unknown error");
            return PipelineResult::failed(
                url,
                FailureKind::ExtractionFailure,
                format!("Extraction failed: {}", error),
            );
        }
        profile.overall_confidence = Some(calculate_overall_confidence(&profile));

        let matches = self
            .matcher
            .match_funds(&profile, user_context, self.config.max_matches)
            .await;

        if matches.matching_success {
            PipelineResult::completed(url, profile, Ok(matches))
        } else {
            let error = matches.error.as_deref().unwrap_or("Unknown error");
            PipelineResult::completed(url, profile, Err(format!("Matching failed: {}", error)))
        }
    }

    /// Process URLs sequentially in input order.
    pub async fn process_batch(&self, urls: &[String], user_context: &str) -> Vec<PipelineResult> {
        self.process_batch_with_progress(urls, user_context, |_, _, _| {})
            .await
    }

    /// Like [`process_batch`](Self::process_batch), calling `on_result`
    /// with `(index, total, result)` after each URL.
    ///
    /// URLs beyond `max_urls_per_batch` are dropped with a warning. A
    /// failed URL never stops the batch.
    pub async fn process_batch_with_progress(
        &self,
        urls: &[String],
        user_context: &str,
        mut on_result: impl FnMut(usize, usize, &PipelineResult),
    ) -> Vec<PipelineResult> {
        let limit = self.config.max_urls_per_batch;
        let kept = if urls.len() > limit {
            warn!(
                requested = urls.len(),
                limit, "Too many URLs; processing only the first {}", limit
            );
            &urls[..limit]
        } else {
            urls
        };

        let total = kept.len();
        let mut results = Vec::with_capacity(total);
        for (index, url) in kept.iter().enumerate() {
            let result = self.process_url(url, user_context).await;
            on_result(index, total, &result);
            results.push(result);
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_url_list() {
        let text = "  acme.example \n\n https://beta.example/\r\n   \n gamma.example";
        assert_eq!(
            parse_url_list(text),
            vec!["acme.example", "https://beta.example/", "gamma.example"]
        );
    }

    #[test]
    fn test_parse_empty_url_list() {
        assert!(parse_url_list("\n \n").is_empty());
    }
}
