//! `pe-matcher funds` - inspect the acquirer fund dataset.

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use colored::Colorize;
use console::{pad_str, style, Alignment};
use pe_matcher::{AcquirerFund, CheckSize, FundFilter, FundStore};
use std::path::PathBuf;

use crate::config::Settings;

const NAME_WIDTH: usize = 38;
const CHECK_WIDTH: usize = 14;

#[derive(Subcommand, Debug)]
pub enum FundsCommand {
    /// List every fund
    List {
        /// Fund dataset to read
        #[arg(long, value_name = "FILE")]
        funds: Option<PathBuf>,
    },

    /// Show one fund in full
    Show {
        /// Fund name, case-insensitive
        name: String,

        /// Fund dataset to read
        #[arg(long, value_name = "FILE")]
        funds: Option<PathBuf>,
    },

    /// List funds matching check size, sector and stage criteria
    Filter {
        /// Smallest acceptable check, millions USD
        #[arg(long)]
        min_check: Option<f64>,

        /// Largest acceptable check, millions USD
        #[arg(long)]
        max_check: Option<f64>,

        /// Sector substring; repeat for alternatives
        #[arg(long)]
        sector: Vec<String>,

        /// Investment stage; repeat for alternatives
        #[arg(long)]
        stage: Vec<String>,

        /// Fund dataset to read
        #[arg(long, value_name = "FILE")]
        funds: Option<PathBuf>,
    },
}

impl FundsCommand {
    fn dataset(&self) -> Option<&PathBuf> {
        match self {
            Self::List { funds } | Self::Show { funds, .. } | Self::Filter { funds, .. } => {
                funds.as_ref()
            }
        }
    }
}

pub async fn run(settings: &Settings, command: FundsCommand) -> Result<()> {
    let store = FundStore::new(
        command
            .dataset()
            .cloned()
            .unwrap_or_else(|| settings.config.funds_path.clone()),
    );

    match command {
        FundsCommand::List { .. } => {
            let funds = store
                .load()
                .await
                .with_context(|| format!("failed to load {}", store.path().display()))?;
            print_table(&funds);
        }
        FundsCommand::Show { name, .. } => {
            let fund = store
                .find_by_name(&name)
                .await
                .with_context(|| format!("failed to load {}", store.path().display()))?;
            match fund {
                Some(fund) => print_fund(&fund),
                None => bail!("no fund named {:?} in {}", name, store.path().display()),
            }
        }
        FundsCommand::Filter {
            min_check,
            max_check,
            sector,
            stage,
            ..
        } => {
            let filter = build_filter(min_check, max_check, sector, stage);
            let funds = store
                .filter(&filter)
                .await
                .with_context(|| format!("failed to load {}", store.path().display()))?;
            if funds.is_empty() {
                println!("{}", "No funds match these criteria".yellow());
            } else {
                print_table(&funds);
            }
        }
    }

    Ok(())
}

fn build_filter(
    min_check: Option<f64>,
    max_check: Option<f64>,
    sectors: Vec<String>,
    stages: Vec<String>,
) -> FundFilter {
    let mut filter = FundFilter::new();
    if let Some(min) = min_check {
        filter = filter.with_min_check_size(min);
    }
    if let Some(max) = max_check {
        filter = filter.with_max_check_size(max);
    }
    for sector in sectors {
        filter = filter.with_sector(sector);
    }
    for stage in stages {
        filter = filter.with_stage(stage);
    }
    filter
}

/// `$10M-$75M`, open ends shown as `?`.
pub fn format_check_size(check: &CheckSize) -> String {
    let bound = |value: Option<f64>| match value {
        Some(v) => format!("${}M", v),
        None => "?".to_string(),
    };
    format!("{}-{}", bound(check.min), bound(check.max))
}

fn print_table(funds: &[AcquirerFund]) {
    println!(
        "{} {} {}",
        style(pad_str("FUND", NAME_WIDTH, Alignment::Left, None)).bold(),
        style(pad_str("CHECK", CHECK_WIDTH, Alignment::Left, None)).bold(),
        style("SECTORS").bold()
    );
    for fund in funds {
        println!(
            "{} {} {}",
            pad_str(&fund.name, NAME_WIDTH, Alignment::Left, Some("…")),
            pad_str(
                &format_check_size(&fund.check_size_mm),
                CHECK_WIDTH,
                Alignment::Left,
                None
            ),
            fund.sector_focus.join(", ").dimmed()
        );
    }
    println!();
    println!("{}", format!("{} fund(s)", funds.len()).dimmed());
}

fn print_fund(fund: &AcquirerFund) {
    println!();
    println!("{}", style(&fund.name).bold());
    if let Some(description) = &fund.description {
        println!("{}", description.dimmed());
    }
    println!();

    let field = |label: &str, value: String| {
        if !value.is_empty() {
            println!("  {} {}", format!("{}:", label).bright_yellow(), value);
        }
    };
    field(
        "AUM",
        fund.aum_billions
            .map(|aum| format!("${}B", aum))
            .unwrap_or_default(),
    );
    field("Check size", format_check_size(&fund.check_size_mm));
    field("Sectors", fund.sector_focus.join(", "));
    field("Stages", fund.stage.join(", "));
    field("Geography", fund.geography.join(", "));
    field("Thesis", fund.thesis_keywords.join(", "));
    field("Headquarters", fund.headquarters.clone().unwrap_or_default());
    field("Website", fund.website.clone().unwrap_or_default());
}
