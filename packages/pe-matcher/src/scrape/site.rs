//! Site scraper - homepage plus keyword-discovered subpages.

use tracing::{debug, info, warn};
use url::Url;

use super::content::extract_page_content;
use super::links::{discover_subpages, DefaultKeywords, LinkKeywords};
use super::url::{is_valid_url, normalize_url};
use crate::traits::fetcher::PageFetcher;
use crate::types::config::MatcherConfig;
use crate::types::page::{LinkCategory, PageKind, ScrapeResult, ScrapedPage};

/// Error recorded when the input is not an http(s) URL with a host.
pub const INVALID_URL_ERROR: &str = "Invalid URL format";

/// Fetches a homepage and up to `max_subpages` discovered subpages.
///
/// Pages are fetched one at a time. A failed subpage is logged and
/// skipped; only the homepage decides success.
pub struct SiteScraper<F: PageFetcher> {
    fetcher: F,
    keywords: Box<dyn LinkKeywords>,
    max_subpages: usize,
    max_page_chars: usize,
}

impl<F: PageFetcher> SiteScraper<F> {
    /// Create a scraper with the default keyword sets and limits.
    pub fn new(fetcher: F) -> Self {
        let config = MatcherConfig::default();
        Self {
            fetcher,
            keywords: Box::new(DefaultKeywords),
            max_subpages: config.max_subpages,
            max_page_chars: config.max_page_chars,
        }
    }

    /// Create a scraper using the limits in `config`.
    pub fn from_config(fetcher: F, config: &MatcherConfig) -> Self {
        Self::new(fetcher)
            .with_max_subpages(config.max_subpages)
            .with_max_page_chars(config.max_page_chars)
    }

    /// Replace the link keyword strategy.
    pub fn with_keywords(mut self, keywords: impl LinkKeywords + 'static) -> Self {
        self.keywords = Box::new(keywords);
        self
    }

    pub fn with_max_subpages(mut self, max: usize) -> Self {
        self.max_subpages = max;
        self
    }

    pub fn with_max_page_chars(mut self, max: usize) -> Self {
        self.max_page_chars = max;
        self
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Scrape one site. Never fails; inspect `success` on the result.
    pub async fn scrape(&self, url: &str) -> ScrapeResult {
        let url = normalize_url(url);

        let base = match Url::parse(&url) {
            Ok(base) if is_valid_url(&url) => base,
            _ => {
                warn!(url = %url, "Rejected invalid URL");
                return ScrapeResult::failed(url, INVALID_URL_ERROR);
            }
        };

        info!(url = %url, fetcher = self.fetcher.name(), "Scraping site");

        let homepage_html = match self.fetcher.fetch(&url).await {
            Ok(html) => html,
            Err(e) => {
                warn!(url = %url, error = %e, "Homepage fetch failed");
                return ScrapeResult::failed(url, format!("Failed to fetch homepage: {}", e));
            }
        };

        let homepage = self.build_page(&url, PageKind::Homepage, None, &homepage_html);

        let candidates: Vec<(LinkCategory, String)> =
            discover_subpages(&base, &homepage_html, self.keywords.as_ref())
                .into_iter()
                .take(self.max_subpages)
                .collect();

        debug!(url = %url, candidates = candidates.len(), "Discovered subpages");

        let mut subpages = Vec::with_capacity(candidates.len());
        for (category, subpage_url) in candidates {
            match self.fetcher.fetch(&subpage_url).await {
                Ok(html) => {
                    subpages.push(self.build_page(
                        &subpage_url,
                        PageKind::Subpage,
                        Some(category),
                        &html,
                    ));
                }
                Err(e) => {
                    warn!(
                        url = %subpage_url,
                        category = category.as_str(),
                        error = %e,
                        "Skipping subpage"
                    );
                }
            }
        }

        info!(url = %url, pages = subpages.len() + 1, "Scrape complete");

        ScrapeResult::succeeded(url, homepage, subpages)
    }

    fn build_page(
        &self,
        url: &str,
        kind: PageKind,
        category: Option<LinkCategory>,
        html: &str,
    ) -> ScrapedPage {
        let content = extract_page_content(html, self.max_page_chars);

        let mut page = ScrapedPage::new(url, kind, content.text);
        page.category = category;
        page.title = content.title;
        page.meta_description = content.meta_description;
        page
    }
}

/// Join every page of a successful scrape into the text sent for
/// extraction. Empty for a failed scrape.
pub fn get_combined_content(result: &ScrapeResult) -> String {
    if !result.success {
        return String::new();
    }

    let sections: Vec<String> = result
        .pages
        .iter()
        .map(|page| {
            let mut section = format!("=== {}: {} ===\n", page.kind.label(), page.url);
            if let Some(title) = &page.title {
                section.push_str(&format!("Title: {}\n", title));
            }
            if let Some(description) = &page.meta_description {
                section.push_str(&format!("Description: {}\n", description));
            }
            section.push_str(&format!("\nContent:\n{}\n", page.content));
            section
        })
        .collect();

    sections.join("\n\n")
}
