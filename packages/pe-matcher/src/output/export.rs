//! Writing reports to disk.

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tracing::info;

use super::document::document_report;
use super::json::JsonReport;
use super::markdown::markdown_report;
use crate::error::{MatcherError, Result};
use crate::types::pipeline::PipelineResult;

/// Characters of the sanitized URL kept in file names.
const STEM_URL_CHARS: usize = 25;

/// Report file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Json,
    Markdown,
    Document,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [Self::Json, Self::Markdown, Self::Document];

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Markdown => "md",
            Self::Document => "txt",
        }
    }
}

/// `pe_analysis_` plus the URL without scheme, slashes turned into
/// underscores, cut to 25 characters.
pub fn export_file_stem(url: &str) -> String {
    let sanitized: String = url
        .replace("https://", "")
        .replace("http://", "")
        .replace('/', "_")
        .chars()
        .take(STEM_URL_CHARS)
        .collect();
    format!("pe_analysis_{}", sanitized)
}

/// Render one format. None when the URL produced no profile.
pub fn render(
    result: &PipelineResult,
    format: ExportFormat,
    generated_at: DateTime<Utc>,
) -> Result<Option<String>> {
    Ok(match format {
        ExportFormat::Json => match JsonReport::from_result(result, generated_at) {
            Some(report) => Some(report.to_json_pretty()?),
            None => None,
        },
        ExportFormat::Markdown => markdown_report(result, generated_at),
        ExportFormat::Document => document_report(result).map(|doc| doc.render()),
    })
}

/// Write the requested formats into `dir`, creating it if needed.
///
/// Returns the written paths. Nothing is written for a URL without a
/// profile.
pub async fn write_reports(
    result: &PipelineResult,
    dir: &Path,
    formats: &[ExportFormat],
    generated_at: DateTime<Utc>,
) -> Result<Vec<PathBuf>> {
    if result.company_profile.is_none() {
        return Ok(Vec::new());
    }

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| MatcherError::Export {
            path: dir.to_path_buf(),
            source,
        })?;

    let stem = export_file_stem(&result.url);
    let mut written = Vec::with_capacity(formats.len());

    for format in formats {
        let Some(content) = render(result, *format, generated_at)? else {
            continue;
        };

        let path = dir.join(format!("{}.{}", stem, format.extension()));
        tokio::fs::write(&path, content)
            .await
            .map_err(|source| MatcherError::Export {
                path: path.clone(),
                source,
            })?;

        info!(path = %path.display(), "Wrote report");
        written.push(path);
    }

    Ok(written)
}
