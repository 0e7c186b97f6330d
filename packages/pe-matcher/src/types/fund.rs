//! Acquirer fund reference data.

use serde::{Deserialize, Serialize};

use super::lenient;

/// On-disk dataset layout: `{ "funds": [...] }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FundDataset {
    #[serde(default)]
    pub funds: Vec<AcquirerFund>,
}

/// A private-equity firm used as a matching candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcquirerFund {
    pub name: String,

    /// Assets under management, billions of dollars
    #[serde(default, deserialize_with = "lenient::option_f64")]
    pub aum_billions: Option<f64>,

    #[serde(default, deserialize_with = "lenient::string_list")]
    pub sector_focus: Vec<String>,

    /// Equity check range, millions of dollars
    #[serde(default)]
    pub check_size_mm: CheckSize,

    #[serde(default, deserialize_with = "lenient::string_list")]
    pub stage: Vec<String>,

    #[serde(default, deserialize_with = "lenient::string_list")]
    pub geography: Vec<String>,

    #[serde(default, deserialize_with = "lenient::string_list")]
    pub thesis_keywords: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headquarters: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl AcquirerFund {
    /// Create a fund with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aum_billions: None,
            sector_focus: Vec::new(),
            check_size_mm: CheckSize::default(),
            stage: Vec::new(),
            geography: Vec::new(),
            thesis_keywords: Vec::new(),
            headquarters: None,
            website: None,
            description: None,
        }
    }

    pub fn with_sectors(mut self, sectors: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.sector_focus = sectors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_stages(mut self, stages: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.stage = stages.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_check_size(mut self, min: f64, max: f64) -> Self {
        self.check_size_mm = CheckSize {
            min: Some(min),
            max: Some(max),
        };
        self
    }

    /// Condensed projection embedded in the matching prompt.
    pub fn summary(&self) -> FundSummary<'_> {
        FundSummary {
            name: &self.name,
            aum_billions: self.aum_billions,
            sector_focus: &self.sector_focus,
            check_size_mm: &self.check_size_mm,
            stage: &self.stage,
            geography: &self.geography,
            thesis_keywords: &self.thesis_keywords,
        }
    }
}

/// Check size range; either bound may be unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckSize {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::option_f64")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::option_f64")]
    pub max: Option<f64>,
}

/// The fields of a fund the model needs for scoring.
#[derive(Debug, Serialize)]
pub struct FundSummary<'a> {
    pub name: &'a str,
    pub aum_billions: Option<f64>,
    pub sector_focus: &'a [String],
    pub check_size_mm: &'a CheckSize,
    pub stage: &'a [String],
    pub geography: &'a [String],
    pub thesis_keywords: &'a [String],
}
