//! PE Matcher CLI
//!
//! Profiles company websites and ranks likely private-equity acquirers.

mod cmd;
mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Settings;

#[derive(Parser)]
#[command(name = "pe-matcher")]
#[command(about = "Profile company websites and match them to PE acquirers", version)]
struct Cli {
    /// Log pipeline progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape, profile and match one or more company websites
    Analyze(cmd::analyze::AnalyzeArgs),

    /// Inspect the acquirer fund dataset
    #[command(subcommand)]
    Funds(cmd::funds::FundsCommand),
}

fn main() -> ExitCode {
    // Before tracing init so RUST_LOG from .env applies
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".bright_red().bold(), e);
            ExitCode::from(1)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "info,pe_matcher=debug" } else { "warn" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let settings = Settings::from_env()?;
    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;

    runtime.block_on(async move {
        match cli.command {
            Commands::Analyze(args) => {
                let all_succeeded = cmd::analyze::run(&settings, args).await?;
                Ok(if all_succeeded {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::from(1)
                })
            }
            Commands::Funds(command) => {
                cmd::funds::run(&settings, command).await?;
                Ok(ExitCode::SUCCESS)
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbose_after_subcommand() {
        let cli = Cli::try_parse_from(["pe-matcher", "analyze", "acme.example", "--verbose"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Analyze(_)));
    }

    #[test]
    fn test_funds_subcommand() {
        let cli = Cli::try_parse_from(["pe-matcher", "funds", "show", "Lakeshore Capital Partners"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Funds(cmd::funds::FundsCommand::Show { .. })
        ));
    }
}
