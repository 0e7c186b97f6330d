//! Report formats for processed URLs.
//!
//! These are downstream consumers of [`PipelineResult`](crate::PipelineResult):
//! a JSON envelope, a Markdown report and a paginated plain-text document.

pub mod document;
pub mod export;
pub mod json;
pub mod markdown;

pub use document::{build_document, document_report, PagedDocument};
pub use export::{export_file_stem, render, write_reports, ExportFormat};
pub use json::{JsonReport, ReportMetadata};
pub use markdown::{markdown_report, render_markdown};
