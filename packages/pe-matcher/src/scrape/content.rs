//! Visible-text extraction from raw markup.

use scraper::{Html, Selector};

/// Elements whose text never counts as page content.
const EXCLUDED_TAGS: &[&str] = &["script", "style", "nav", "footer", "header"];

/// Appended when the text is cut at the character cap.
pub const TRUNCATION_MARKER: &str = "...";

/// Distilled content of one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageContent {
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub text: String,
}

/// Strip structural markup and return title, meta description and the
/// visible text capped at `max_chars` characters.
///
/// Text nodes are trimmed, blank ones dropped, and the rest joined with
/// newlines in document order.
pub fn extract_page_content(html: &str, max_chars: usize) -> PageContent {
    let document = Html::parse_document(html);

    PageContent {
        title: extract_title(&document),
        meta_description: extract_meta_description(&document),
        text: truncate_chars(&visible_text(&document), max_chars),
    }
}

fn extract_title(document: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
}

fn extract_meta_description(document: &Html) -> Option<String> {
    let selector = Selector::parse(r#"meta[name="description"]"#).ok()?;
    document
        .select(&selector)
        .find_map(|el| el.value().attr("content"))
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}

fn visible_text(document: &Html) -> String {
    let mut lines = Vec::new();

    for node in document.tree.root().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        let excluded = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| EXCLUDED_TAGS.contains(&el.name()))
        });
        if excluded {
            continue;
        }

        let trimmed = text.trim();
        if !trimmed.is_empty() {
            lines.push(trimmed);
        }
    }

    lines.join("\n")
}

/// Keep the first `max_chars` characters, marking the cut.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}{}", &text[..byte_idx], TRUNCATION_MARKER),
        None => text.to_string(),
    }
}
