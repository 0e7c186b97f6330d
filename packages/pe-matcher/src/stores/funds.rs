//! File-backed fund dataset.
//!
//! The dataset is read fresh on every call. It is small reference data and
//! edits to the file take effect on the next lookup.

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{MatcherError, Result};
use crate::types::fund::{AcquirerFund, FundDataset};

/// Reads acquirer funds from a `{ "funds": [...] }` JSON file.
#[derive(Debug, Clone)]
pub struct FundStore {
    path: PathBuf,
}

impl FundStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every fund in file order.
    pub async fn load(&self) -> Result<Vec<AcquirerFund>> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| self.data_error(e))?;

        let dataset: FundDataset = serde_json::from_str(&raw).map_err(|e| self.data_error(e))?;

        debug!(path = %self.path.display(), funds = dataset.funds.len(), "Loaded fund dataset");
        Ok(dataset.funds)
    }

    /// Case-insensitive exact name lookup.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<AcquirerFund>> {
        let needle = name.to_lowercase();
        Ok(self
            .load()
            .await?
            .into_iter()
            .find(|fund| fund.name.to_lowercase() == needle))
    }

    /// Funds passing every criterion in `filter`.
    pub async fn filter(&self, filter: &FundFilter) -> Result<Vec<AcquirerFund>> {
        Ok(filter.apply(self.load().await?))
    }

    fn data_error(&self, e: impl std::error::Error + Send + Sync + 'static) -> MatcherError {
        MatcherError::FundData {
            path: self.path.clone(),
            source: Box::new(e),
        }
    }
}

/// Pre-filter criteria. Unset (or non-positive) bounds and empty lists
/// do not filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FundFilter {
    /// Smallest acceptable check, millions. Funds whose max is below it fail.
    pub min_check_size: Option<f64>,
    /// Largest acceptable check, millions. Funds whose min is above it fail.
    pub max_check_size: Option<f64>,
    /// Any of these must appear as a substring of the fund's sectors.
    pub sectors: Vec<String>,
    /// Any of these must equal one of the fund's stages.
    pub stages: Vec<String>,
}

impl FundFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_check_size(mut self, min: f64) -> Self {
        self.min_check_size = Some(min);
        self
    }

    pub fn with_max_check_size(mut self, max: f64) -> Self {
        self.max_check_size = Some(max);
        self
    }

    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sectors.push(sector.into());
        self
    }

    pub fn with_stage(mut self, stage: impl Into<String>) -> Self {
        self.stages.push(stage.into());
        self
    }

    /// Keep the funds that pass, preserving order.
    pub fn apply(&self, funds: Vec<AcquirerFund>) -> Vec<AcquirerFund> {
        funds.into_iter().filter(|fund| self.matches(fund)).collect()
    }

    pub fn matches(&self, fund: &AcquirerFund) -> bool {
        if let Some(min) = self.min_check_size.filter(|v| *v > 0.0) {
            if fund.check_size_mm.max.unwrap_or(0.0) < min {
                return false;
            }
        }

        if let Some(max) = self.max_check_size.filter(|v| *v > 0.0) {
            if fund.check_size_mm.min.unwrap_or(f64::INFINITY) > max {
                return false;
            }
        }

        if !self.sectors.is_empty() {
            let joined = fund
                .sector_focus
                .iter()
                .map(|s| s.to_lowercase())
                .collect::<Vec<_>>()
                .join(" ");
            if !self
                .sectors
                .iter()
                .any(|s| joined.contains(&s.to_lowercase()))
            {
                return false;
            }
        }

        if !self.stages.is_empty() {
            let fund_stages: Vec<String> = fund.stage.iter().map(|s| s.to_lowercase()).collect();
            if !self
                .stages
                .iter()
                .any(|s| fund_stages.contains(&s.to_lowercase()))
            {
                return false;
            }
        }

        true
    }
}
