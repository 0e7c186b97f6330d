//! Website scraping: content extraction, link discovery and the site
//! orchestrator.

pub mod content;
pub mod links;
pub mod site;
pub mod url;

pub use content::{extract_page_content, PageContent};
pub use links::{discover_subpages, DefaultKeywords, LinkKeywords};
pub use site::{get_combined_content, SiteScraper, INVALID_URL_ERROR};
pub use url::{is_valid_url, normalize_url};
