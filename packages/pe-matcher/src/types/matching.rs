//! Fund matching output.
//!
//! Ranks, scores and match counts come from the model as-is. They are
//! audited (see [`MatchResult::audit`]) but never rewritten.

use serde::{Deserialize, Serialize};

use super::lenient;

/// Ranked fund matches plus the model's read on the company.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::option_record")]
    pub analysis: Option<PeAnalysis>,

    #[serde(default, deserialize_with = "lenient::record_list")]
    pub matches: Vec<FundMatch>,

    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::option_string")]
    pub additional_notes: Option<String>,

    #[serde(default)]
    pub matching_success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

impl MatchResult {
    /// A result describing a failed matching call.
    pub fn failed(error: impl Into<String>, raw_response: Option<String>) -> Self {
        Self {
            matching_success: false,
            error: Some(error.into()),
            raw_response,
            ..Default::default()
        }
    }

    /// Describe every way the model's list departs from the requested
    /// shape: ranks not 1..=n in order, scores outside 0-100, more than
    /// `requested` entries.
    pub fn audit(&self, requested: usize) -> Vec<String> {
        let mut findings = Vec::new();

        if self.matches.len() > requested {
            findings.push(format!(
                "{} matches returned, {} requested",
                self.matches.len(),
                requested
            ));
        }

        for (position, m) in self.matches.iter().enumerate() {
            let expected = position as i64 + 1;
            match m.rank {
                Some(rank) if rank == expected => {}
                Some(rank) => findings.push(format!("position {} has rank {}", expected, rank)),
                None => findings.push(format!("position {} has no rank", expected)),
            }
            if let Some(score) = m.fit_score {
                if !(0..=100).contains(&score) {
                    findings.push(format!("{} has fit score {}", m.display_name(), score));
                }
            }
        }

        findings
    }
}

/// The model's PE-readiness assessment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeAnalysis {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::option_string")]
    pub company_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::option_string")]
    pub estimated_enterprise_value: Option<String>,
    /// "High", "Medium" or "Low"
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::option_string")]
    pub pe_readiness: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::option_string")]
    pub pe_readiness_rationale: Option<String>,
}

impl PeAnalysis {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// One ranked fund.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FundMatch {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::option_i64")]
    pub rank: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::option_string")]
    pub fund_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::option_i64")]
    pub fit_score: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::option_string")]
    pub rationale: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "lenient::string_list")]
    pub key_alignment: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "lenient::string_list")]
    pub potential_concerns: Vec<String>,
    /// "growth equity", "buyout" or "either"
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::option_string")]
    pub deal_type_fit: Option<String>,
}

impl FundMatch {
    pub fn display_name(&self) -> &str {
        self.fund_name.as_deref().unwrap_or("Unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(rank: i64, score: i64) -> FundMatch {
        FundMatch {
            rank: Some(rank),
            fund_name: Some(format!("Fund {}", rank)),
            fit_score: Some(score),
            ..Default::default()
        }
    }

    #[test]
    fn test_audit_clean_list() {
        let result = MatchResult {
            matches: vec![ranked(1, 90), ranked(2, 70)],
            matching_success: true,
            ..Default::default()
        };
        assert!(result.audit(10).is_empty());
    }

    #[test]
    fn test_audit_reports_gaps_scores_and_overflow() {
        let result = MatchResult {
            matches: vec![ranked(1, 90), ranked(3, 140), FundMatch::default()],
            ..Default::default()
        };

        let findings = result.audit(2);
        assert_eq!(findings.len(), 4);
        assert!(findings[0].contains("3 matches returned, 2 requested"));
        assert!(findings.iter().any(|f| f == "position 2 has rank 3"));
        assert!(findings.iter().any(|f| f == "Fund 3 has fit score 140"));
        assert!(findings.iter().any(|f| f == "position 3 has no rank"));
    }

    #[test]
    fn test_unexpected_analysis_and_match_shapes() {
        let result = crate::pipeline::parse_match_result(
            r#"{
                "analysis": "Low readiness",
                "matches": ["Lakeshore Capital", {"rank": 1, "fund_name": "Prairie Growth"}, null]
            }"#,
        )
        .unwrap();

        assert!(result.matching_success);
        assert!(result.analysis.is_none());
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].display_name(), "Prairie Growth");
    }

    #[test]
    fn test_parses_float_scores_and_null_lists() {
        let result: MatchResult = serde_json::from_str(
            r#"{
                "analysis": {"pe_readiness": "Medium"},
                "matches": [{"rank": 1, "fund_name": "A", "fit_score": 82.0, "key_alignment": null}],
                "additional_notes": null
            }"#,
        )
        .unwrap();

        assert_eq!(result.matches[0].fit_score, Some(82));
        assert!(result.matches[0].key_alignment.is_empty());
        assert_eq!(
            result.analysis.unwrap().pe_readiness.as_deref(),
            Some("Medium")
        );
        assert!(result.additional_notes.is_none());
    }
}
