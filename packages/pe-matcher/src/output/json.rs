//! JSON export envelope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::matching::{FundMatch, PeAnalysis};
use crate::types::pipeline::PipelineResult;
use crate::types::profile::CompanyProfile;

/// Full analysis of one URL as written to `.json` exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonReport {
    pub input_url: String,
    pub company_profile: CompanyProfile,

    /// Empty object when matching failed
    #[serde(default)]
    pub pe_analysis: PeAnalysis,

    #[serde(default)]
    pub pe_matches: Vec<FundMatch>,

    #[serde(default)]
    pub additional_notes: String,

    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,

    /// Rounded to two decimals
    pub processing_time_seconds: f64,

    #[serde(default)]
    pub extraction_confidence: f64,

    #[serde(default)]
    pub matching_success: bool,
}

impl JsonReport {
    /// Build the envelope. None when the URL produced no profile.
    pub fn from_result(result: &PipelineResult, generated_at: DateTime<Utc>) -> Option<Self> {
        let profile = result.company_profile.as_ref()?;
        let matches = result.pe_matches.as_ref();

        Some(Self {
            input_url: result.url.clone(),
            company_profile: profile.clone(),
            pe_analysis: matches
                .and_then(|m| m.analysis.clone())
                .unwrap_or_default(),
            pe_matches: matches.map(|m| m.matches.clone()).unwrap_or_default(),
            additional_notes: matches
                .and_then(|m| m.additional_notes.clone())
                .unwrap_or_default(),
            metadata: ReportMetadata {
                generated_at,
                processing_time_seconds: round2(result.processing_time_secs),
                extraction_confidence: profile.overall_confidence.unwrap_or(0.0),
                matching_success: matches.is_some_and(|m| m.matching_success),
            },
        })
    }

    /// Pretty-printed with two-space indentation.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use crate::types::matching::MatchResult;
    use chrono::TimeZone;

    fn profile() -> CompanyProfile {
        CompanyProfile {
            company_name: Some("Acme".into()),
            overall_confidence: Some(0.8),
            extraction_success: true,
            ..Default::default()
        }
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 30, 0).unwrap()
    }

    #[test]
    fn test_envelope_from_complete_result() {
        let matches = MatchResult {
            analysis: Some(PeAnalysis {
                pe_readiness: Some("High".into()),
                ..Default::default()
            }),
            matches: vec![FundMatch {
                rank: Some(1),
                fund_name: Some("Lakeshore Capital".into()),
                ..Default::default()
            }],
            additional_notes: Some("Founder-led".into()),
            matching_success: true,
            ..Default::default()
        };
        let result = PipelineResult::completed("acme.example", profile(), Ok(matches))
            .with_processing_time(12.3456);

        let report = JsonReport::from_result(&result, at()).unwrap();

        assert_eq!(report.input_url, "acme.example");
        assert_eq!(report.pe_analysis.pe_readiness.as_deref(), Some("High"));
        assert_eq!(report.pe_matches.len(), 1);
        assert_eq!(report.additional_notes, "Founder-led");
        assert_eq!(report.metadata.processing_time_seconds, 12.35);
        assert_eq!(report.metadata.extraction_confidence, 0.8);
        assert!(report.metadata.matching_success);
    }

    #[test]
    fn test_envelope_after_matching_failure() {
        let result = PipelineResult::completed("acme.example", profile(), Err("Matching failed: x".into()));
        let report = JsonReport::from_result(&result, at()).unwrap();

        assert!(report.pe_matches.is_empty());
        assert!(report.pe_analysis.is_empty());
        assert!(!report.metadata.matching_success);

        let json: serde_json::Value = serde_json::from_str(&report.to_json_pretty().unwrap()).unwrap();
        assert_eq!(json["pe_analysis"], serde_json::json!({}));
        assert_eq!(json["additional_notes"], "");
    }

    #[test]
    fn test_no_envelope_without_profile() {
        let result = PipelineResult::failed("bad", FailureKind::InvalidUrl, "Scraping failed");
        assert!(JsonReport::from_result(&result, at()).is_none());
    }

    #[test]
    fn test_generated_at_is_rfc3339() {
        let result = PipelineResult::completed("acme.example", profile(), Err("x".into()));
        let json = JsonReport::from_result(&result, at()).unwrap().to_json_pretty().unwrap();
        assert!(json.contains("\"generated_at\": \"2026-03-01T12:30:00Z\""));
    }
}
