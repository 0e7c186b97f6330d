//! Page types - scraped pages and the per-site scrape result.

use serde::{Deserialize, Serialize};

/// Where a page sits in the scraped site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    Homepage,
    Subpage,
}

impl PageKind {
    /// Upper-case label used in combined content section headers.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Homepage => "HOMEPAGE",
            Self::Subpage => "SUBPAGE",
        }
    }
}

/// Subpage categories searched for on the homepage, in discovery order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkCategory {
    About,
    Products,
    Contact,
    Careers,
}

impl LinkCategory {
    /// All categories in declaration order.
    pub const ALL: [LinkCategory; 4] = [
        LinkCategory::About,
        LinkCategory::Products,
        LinkCategory::Contact,
        LinkCategory::Careers,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::About => "about",
            Self::Products => "products",
            Self::Contact => "contact",
            Self::Careers => "careers",
        }
    }
}

/// One fetched page's distilled content. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapedPage {
    /// URL the page was fetched from
    pub url: String,

    /// Homepage or subpage
    pub kind: PageKind,

    /// Category that led to this subpage (None for the homepage)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<LinkCategory>,

    /// `<title>` text
    pub title: Option<String>,

    /// `<meta name="description">` content
    pub meta_description: Option<String>,

    /// Visible text, length-capped
    pub content: String,
}

impl ScrapedPage {
    /// Create a page with no title or description.
    pub fn new(url: impl Into<String>, kind: PageKind, content: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            kind,
            category: None,
            title: None,
            meta_description: None,
            content: content.into(),
        }
    }

    /// Set the discovering category.
    pub fn with_category(mut self, category: LinkCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Set the page title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the meta description.
    pub fn with_meta_description(mut self, description: impl Into<String>) -> Self {
        self.meta_description = Some(description.into());
        self
    }

    /// Whether the body, title or meta description carries any text.
    pub fn has_text(&self) -> bool {
        let filled = |text: Option<&str>| text.is_some_and(|t| !t.trim().is_empty());
        filled(Some(self.content.as_str()))
            || filled(self.title.as_deref())
            || filled(self.meta_description.as_deref())
    }
}

/// Output of one site scrape.
///
/// A failed result has no pages and an error; a successful one has at
/// least the homepage and no error. Only the constructors build it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeResult {
    /// Normalized input URL
    pub url: String,

    /// Whether the homepage was fetched
    pub success: bool,

    /// Homepage first, then subpages in discovery order
    pub pages: Vec<ScrapedPage>,

    /// Failure description when `success` is false
    pub error: Option<String>,
}

impl ScrapeResult {
    /// A failed scrape with no pages.
    pub fn failed(url: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            success: false,
            pages: Vec::new(),
            error: Some(error.into()),
        }
    }

    /// A successful scrape. The homepage is placed first.
    pub fn succeeded(
        url: impl Into<String>,
        homepage: ScrapedPage,
        subpages: impl IntoIterator<Item = ScrapedPage>,
    ) -> Self {
        let mut pages = vec![homepage];
        pages.extend(subpages);
        Self {
            url: url.into(),
            success: true,
            pages,
            error: None,
        }
    }

    /// The homepage, if the scrape succeeded.
    pub fn homepage(&self) -> Option<&ScrapedPage> {
        self.pages.first()
    }

    /// Successfully fetched subpages.
    pub fn subpages(&self) -> &[ScrapedPage] {
        self.pages.get(1..).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_result_shape() {
        let result = ScrapeResult::failed("https://example.com", "boom");
        assert!(!result.success);
        assert!(result.pages.is_empty());
        assert_eq!(result.error.as_deref(), Some("boom"));
        assert!(result.homepage().is_none());
        assert!(result.subpages().is_empty());
    }

    #[test]
    fn test_succeeded_puts_homepage_first() {
        let home = ScrapedPage::new("https://example.com", PageKind::Homepage, "home");
        let about = ScrapedPage::new("https://example.com/about", PageKind::Subpage, "about")
            .with_category(LinkCategory::About);

        let result = ScrapeResult::succeeded("https://example.com", home.clone(), vec![about]);

        assert!(result.success);
        assert!(result.error.is_none());
        assert_eq!(result.homepage(), Some(&home));
        assert_eq!(result.subpages().len(), 1);
        assert_eq!(result.subpages()[0].category, Some(LinkCategory::About));
    }

    #[test]
    fn test_has_text_counts_title_and_description() {
        let blank = ScrapedPage::new("https://example.com", PageKind::Homepage, " \n ");
        assert!(!blank.has_text());
        assert!(!blank.clone().with_title("   ").has_text());
        assert!(blank.clone().with_title("Acme").has_text());
        assert!(blank.with_meta_description("Industrial widgets").has_text());
    }

    #[test]
    fn test_labels() {
        assert_eq!(PageKind::Homepage.label(), "HOMEPAGE");
        assert_eq!(PageKind::Subpage.label(), "SUBPAGE");
        assert_eq!(LinkCategory::ALL[3].as_str(), "careers");
    }
}
