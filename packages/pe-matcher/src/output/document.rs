//! Paginated plain-text report.
//!
//! Every page carries the report title as a header and its page number as
//! a footer. Body text is word-wrapped to a fixed width.

use crate::types::matching::MatchResult;
use crate::types::pipeline::PipelineResult;
use crate::types::profile::CompanyProfile;

/// Header printed at the top of every page.
pub const DOCUMENT_TITLE: &str = "PE Matcher Report";

/// Matches included in the document.
pub const DOCUMENT_MAX_MATCHES: usize = 7;

/// Separates pages in the rendered output.
pub const PAGE_BREAK: char = '\u{000C}';

/// A document laid out into fixed-size pages.
#[derive(Debug, Clone)]
pub struct PagedDocument {
    width: usize,
    lines_per_page: usize,
    body: Vec<String>,
}

impl Default for PagedDocument {
    fn default() -> Self {
        Self {
            width: 80,
            lines_per_page: 54,
            body: Vec::new(),
        }
    }
}

impl PagedDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(1);
        self
    }

    /// Body lines per page, excluding header and footer.
    pub fn with_lines_per_page(mut self, lines: usize) -> Self {
        self.lines_per_page = lines.max(1);
        self
    }

    /// Section heading, underlined.
    pub fn heading(&mut self, text: &str) {
        self.body.push(text.to_string());
        self.body.push("-".repeat(text.chars().count().min(self.width)));
    }

    /// One logical line, wrapped when longer than the page width.
    pub fn line(&mut self, text: &str) {
        self.body.extend(wrap(text, self.width));
    }

    /// Wrapped text followed by a blank line.
    pub fn paragraph(&mut self, text: &str) {
        self.line(text);
        self.blank();
    }

    pub fn blank(&mut self) {
        self.body.push(String::new());
    }

    /// Body lines split into pages. Always at least one page.
    pub fn pages(&self) -> Vec<&[String]> {
        if self.body.is_empty() {
            return vec![&self.body[..]];
        }
        self.body.chunks(self.lines_per_page).collect()
    }

    pub fn page_count(&self) -> usize {
        self.pages().len()
    }

    /// Render every page with header and footer.
    pub fn render(&self) -> String {
        self.pages()
            .iter()
            .enumerate()
            .map(|(index, lines)| {
                let mut page = Vec::with_capacity(lines.len() + 4);
                page.push(center(DOCUMENT_TITLE, self.width));
                page.push(String::new());
                page.extend(lines.iter().cloned());
                page.push(String::new());
                page.push(center(&format!("Page {}", index + 1), self.width));
                page.join("\n")
            })
            .collect::<Vec<_>>()
            .join(&format!("\n{}\n", PAGE_BREAK))
    }
}

/// Greedy word wrap. Words longer than `width` are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for source_line in text.lines() {
        let mut current = String::new();
        let mut current_len = 0;

        for word in source_line.split_whitespace() {
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(width) {
                let piece: String = piece.iter().collect();
                let piece_len = piece.chars().count();

                if current_len > 0 && current_len + 1 + piece_len > width {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                if current_len > 0 {
                    current.push(' ');
                    current_len += 1;
                }
                current.push_str(&piece);
                current_len += piece_len;
            }
        }

        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    format!("{}{}", " ".repeat((width - len) / 2), text)
}

/// Lay out the report for one processed URL. None without a profile.
pub fn document_report(result: &PipelineResult) -> Option<PagedDocument> {
    let profile = result.company_profile.as_ref()?;
    Some(build_document(&result.url, profile, result.pe_matches.as_ref()))
}

pub fn build_document(
    url: &str,
    profile: &CompanyProfile,
    matches: Option<&MatchResult>,
) -> PagedDocument {
    let mut doc = PagedDocument::new();

    doc.line(&format!("Analysis: {}", profile.display_name()));
    doc.line(&format!("Source: {}", url));
    doc.blank();

    doc.heading("Company Profile");
    if let Some(industry) = &profile.industry {
        doc.line(&format!("Industry: {}", industry));
    }
    if let Some(location) = profile.location_label() {
        doc.line(&format!("Location: {}", location));
    }
    if let Some(size) = profile.size_estimate() {
        doc.line(&format!("Size: {}", size));
    }
    if let Some(model) = &profile.business_model {
        doc.line(&format!("Business Model: {}", model));
    }
    if let Some(summary) = &profile.summary {
        doc.blank();
        doc.line(summary);
    }
    doc.blank();

    let Some(matches) = matches else {
        return doc;
    };

    if let Some(analysis) = matches.analysis.as_ref().filter(|a| !a.is_empty()) {
        doc.heading("PE Readiness Assessment");
        if let Some(readiness) = &analysis.pe_readiness {
            doc.line(&format!("Readiness: {}", readiness));
        }
        if let Some(value) = &analysis.estimated_enterprise_value {
            doc.line(&format!("Est. Value: {}", value));
        }
        if let Some(rationale) = &analysis.pe_readiness_rationale {
            doc.line(rationale);
        }
        doc.blank();
    }

    if !matches.matches.is_empty() {
        doc.heading("Top PE Fund Matches");
        for m in matches.matches.iter().take(DOCUMENT_MAX_MATCHES) {
            let rank = m.rank.map(|r| r.to_string()).unwrap_or_default();
            doc.line(&format!(
                "{}. {} (Score: {}/100)",
                rank,
                m.display_name(),
                m.fit_score.unwrap_or(0)
            ));
            if let Some(rationale) = &m.rationale {
                doc.line(rationale);
            }
            doc.blank();
        }
    }

    doc
}
