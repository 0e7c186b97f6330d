//! `pe-matcher analyze` - run the pipeline over a batch of URLs.

use anthropic_client::AnthropicClient;
use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Args, ValueEnum};
use colored::Colorize;
use console::style;
use pe_matcher::output::write_reports;
use pe_matcher::{parse_url_list, ExportFormat, HttpFetcher, MatcherConfig, Pipeline, PipelineResult};
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Settings;

/// Which report files to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Json,
    Markdown,
    Document,
    All,
}

impl FormatArg {
    pub fn formats(self) -> Vec<ExportFormat> {
        match self {
            Self::Json => vec![ExportFormat::Json],
            Self::Markdown => vec![ExportFormat::Markdown],
            Self::Document => vec![ExportFormat::Document],
            Self::All => ExportFormat::ALL.to_vec(),
        }
    }
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Company website URLs; bare domains get https://
    pub urls: Vec<String>,

    /// File with one URL per line
    #[arg(long, value_name = "FILE")]
    pub urls_file: Option<PathBuf>,

    /// Deal criteria passed to the matcher
    #[arg(short, long, conflicts_with = "context_file")]
    pub context: Option<String>,

    /// File holding deal criteria
    #[arg(long, value_name = "FILE")]
    pub context_file: Option<PathBuf>,

    /// Number of fund matches to request
    #[arg(short = 'n', long)]
    pub matches: Option<usize>,

    /// Report format to write
    #[arg(short, long, value_enum, default_value_t = FormatArg::All)]
    pub format: FormatArg,

    /// Directory for report files
    #[arg(short, long, value_name = "DIR", default_value = "reports")]
    pub output_dir: PathBuf,

    /// Fund dataset to match against
    #[arg(long, value_name = "FILE")]
    pub funds: Option<PathBuf>,

    /// Model for profile extraction
    #[arg(long)]
    pub extraction_model: Option<String>,

    /// Model for fund matching
    #[arg(long)]
    pub matching_model: Option<String>,
}

impl AnalyzeArgs {
    /// Apply command-line overrides on top of the environment config.
    pub fn apply(&self, mut config: MatcherConfig) -> MatcherConfig {
        if let Some(n) = self.matches {
            config = config.with_max_matches(n);
        }
        if let Some(path) = &self.funds {
            config = config.with_funds_path(path);
        }
        if let Some(model) = &self.extraction_model {
            config = config.with_extraction_model(model);
        }
        if let Some(model) = &self.matching_model {
            config = config.with_matching_model(model);
        }
        config
    }
}

pub async fn run(settings: &Settings, args: AnalyzeArgs) -> Result<bool> {
    let urls_file = match &args.urls_file {
        Some(path) => Some(
            tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?,
        ),
        None => None,
    };
    let urls = collect_urls(&args.urls, urls_file.as_deref());
    if urls.is_empty() {
        bail!("no URLs given; pass them as arguments or with --urls-file");
    }

    let user_context = match (&args.context, &args.context_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?,
        (None, None) => String::new(),
    };

    let config = args.apply(settings.config.clone());
    let api_key = settings.require_api_key()?;

    let mut client = AnthropicClient::new(api_key.clone()).with_timeout(config.llm_timeout());
    if let Some(base_url) = &settings.base_url {
        client = client.with_base_url(base_url);
    }
    let fetcher = HttpFetcher::from_config(&config).context("failed to build HTTP client")?;

    let limit = config.max_urls_per_batch;
    let pipeline = Pipeline::new(fetcher, Arc::new(client), config);

    println!();
    println!("{}", style(format!("Analyzing {} URL(s)", urls.len().min(limit))).bold());
    if urls.len() > limit {
        println!(
            "{}",
            format!("Only the first {} of {} URLs will be processed", limit, urls.len()).yellow()
        );
    }
    println!();

    let results = pipeline
        .process_batch_with_progress(&urls, &user_context, |index, total, result| {
            println!("{}", status_line(index, total, result));
        })
        .await;

    let generated_at = Utc::now();
    let formats = args.format.formats();
    let mut written = 0;
    for result in &results {
        let paths = write_reports(result, &args.output_dir, &formats, generated_at)
            .await
            .with_context(|| format!("failed to write reports for {}", result.url))?;
        written += paths.len();
    }

    let succeeded = results.iter().filter(|r| r.success).count();
    let partial = results.iter().filter(|r| r.is_partial()).count();

    println!();
    println!(
        "{} {}/{} succeeded ({} without matches), {} report file(s) in {}",
        "Done:".bold(),
        succeeded,
        results.len(),
        partial,
        written,
        args.output_dir.display()
    );

    Ok(succeeded == results.len())
}

/// Positional URLs first, then file entries, blanks dropped.
pub fn collect_urls(args: &[String], file_text: Option<&str>) -> Vec<String> {
    let mut urls: Vec<String> = args
        .iter()
        .map(|url| url.trim())
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .collect();
    if let Some(text) = file_text {
        urls.extend(parse_url_list(text));
    }
    urls
}

/// One progress line per processed URL.
pub fn status_line(index: usize, total: usize, result: &PipelineResult) -> String {
    let counter = format!("[{}/{}]", index + 1, total).dimmed();
    let elapsed = format!("({:.1}s)", result.processing_time_secs).dimmed();

    if !result.success {
        return format!(
            "  {} {} {} {} {}",
            counter,
            "✗".bright_red(),
            result.url,
            result.error.as_deref().unwrap_or("Unknown error").red(),
            elapsed
        );
    }

    let matches = result
        .pe_matches
        .as_ref()
        .map(|m| m.matches.len())
        .unwrap_or(0);

    if result.is_partial() {
        format!(
            "  {} {} {} {} {}",
            counter,
            "!".bright_yellow(),
            result.display_name(),
            result.error.as_deref().unwrap_or("Matching failed").yellow(),
            elapsed
        )
    } else {
        format!(
            "  {} {} {} {} {}",
            counter,
            "✓".bright_green(),
            result.display_name(),
            format!("{} match(es)", matches).bright_green(),
            elapsed
        )
    }
}
