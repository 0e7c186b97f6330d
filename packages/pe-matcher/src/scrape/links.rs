//! Subpage discovery by keyword matching on anchors.

use std::collections::HashMap;

use scraper::{Html, Selector};
use url::Url;

use super::url::network_location;
use crate::types::page::LinkCategory;

/// Keyword sets used to classify links.
///
/// Matching is case-insensitive containment against either the href or the
/// anchor text. Implementations return lowercase keywords.
pub trait LinkKeywords: Send + Sync {
    /// Categories in the order discovered links are returned.
    fn categories(&self) -> &[LinkCategory] {
        &LinkCategory::ALL
    }

    /// Keywords for one category.
    fn keywords(&self, category: LinkCategory) -> &[&str];
}

/// The about / products / contact / careers keyword sets.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultKeywords;

impl LinkKeywords for DefaultKeywords {
    fn keywords(&self, category: LinkCategory) -> &[&str] {
        match category {
            LinkCategory::About => &["about", "company", "who-we-are", "our-story"],
            LinkCategory::Products => {
                &["products", "services", "solutions", "offerings", "what-we-do"]
            }
            LinkCategory::Contact => &["contact", "get-in-touch", "reach-us"],
            LinkCategory::Careers => &["careers", "jobs", "work-with-us", "join-us", "team"],
        }
    }
}

/// Find at most one same-origin link per category.
///
/// The first anchor in document order that matches a category wins it.
/// A single anchor may win several categories. Results follow
/// [`LinkKeywords::categories`] order.
pub fn discover_subpages(
    base: &Url,
    html: &str,
    keywords: &dyn LinkKeywords,
) -> Vec<(LinkCategory, String)> {
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let document = Html::parse_document(html);
    let base_location = network_location(base);
    let categories = keywords.categories();
    let mut found: HashMap<LinkCategory, String> = HashMap::new();

    for anchor in document.select(&selector) {
        if found.len() == categories.len() {
            break;
        }

        let Some(raw_href) = anchor.value().attr("href") else {
            continue;
        };
        let href = raw_href.to_lowercase();
        let text = anchor.text().collect::<String>().to_lowercase();

        for &category in categories {
            if found.contains_key(&category) {
                continue;
            }

            let matched = keywords
                .keywords(category)
                .iter()
                .any(|kw| href.contains(kw) || text.contains(kw));
            if !matched {
                continue;
            }

            let Ok(resolved) = base.join(raw_href) else {
                continue;
            };
            if base_location.is_some() && network_location(&resolved) == base_location {
                found.insert(category, resolved.to_string());
            }
        }
    }

    categories
        .iter()
        .filter_map(|category| found.remove(category).map(|url| (*category, url)))
        .collect()
}
