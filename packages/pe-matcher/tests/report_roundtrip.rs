//! Serialized profiles and reports decode back to equal values.

mod common;

use chrono::{TimeZone, Utc};
use common::{MATCH_REPLY, PROFILE_REPLY};
use pe_matcher::pipeline::{parse_match_result, parse_profile};
use pe_matcher::{CompanyProfile, JsonReport, PipelineResult};

#[test]
fn test_profile_survives_serialization() {
    let profile = parse_profile(PROFILE_REPLY).unwrap();
    let json = serde_json::to_string(&profile).unwrap();
    let decoded: CompanyProfile = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, profile);
}

#[test]
fn test_absent_fields_stay_absent() {
    let profile = parse_profile(r#"{"company_name": "Tiny Co", "founded_year": null}"#).unwrap();
    let value: serde_json::Value = serde_json::to_value(&profile).unwrap();
    let object = value.as_object().unwrap();

    assert!(object.contains_key("company_name"));
    assert!(!object.contains_key("founded_year"));
    assert!(!object.contains_key("industry"));
    assert!(!object.contains_key("products_services"));
}

#[test]
fn test_json_report_round_trip() {
    let mut profile = parse_profile(PROFILE_REPLY).unwrap();
    profile.overall_confidence = Some(0.8);
    let matches = parse_match_result(MATCH_REPLY).unwrap();
    let result = PipelineResult::completed("acme.example", profile, Ok(matches))
        .with_processing_time(4.321);

    let generated_at = Utc.with_ymd_and_hms(2026, 5, 4, 3, 2, 1).unwrap();
    let report = JsonReport::from_result(&result, generated_at).unwrap();
    let text = report.to_json_pretty().unwrap();
    let decoded: JsonReport = serde_json::from_str(&text).unwrap();

    assert_eq!(decoded, report);
    assert_eq!(decoded.metadata.processing_time_seconds, 4.32);
    assert_eq!(decoded.pe_matches[1].fit_score, Some(81));
}

#[test]
fn test_pipeline_result_round_trip() {
    let profile = parse_profile(PROFILE_REPLY).unwrap();
    let result = PipelineResult::completed("acme.example", profile, Err("Matching failed: x".into()));

    let decoded: PipelineResult =
        serde_json::from_str(&serde_json::to_string(&result).unwrap()).unwrap();
    assert_eq!(decoded, result);
}
