//! Markdown report.

use chrono::{DateTime, Utc};

use crate::types::matching::MatchResult;
use crate::types::pipeline::PipelineResult;
use crate::types::profile::CompanyProfile;

/// Items listed per profile section.
const MAX_LIST_ITEMS: usize = 5;

/// Render the report for one processed URL. None without a profile.
pub fn markdown_report(result: &PipelineResult, generated_at: DateTime<Utc>) -> Option<String> {
    let profile = result.company_profile.as_ref()?;
    Some(render_markdown(
        &result.url,
        profile,
        result.pe_matches.as_ref(),
        generated_at,
    ))
}

/// Render a profile and optional match result as Markdown.
pub fn render_markdown(
    url: &str,
    profile: &CompanyProfile,
    matches: Option<&MatchResult>,
    generated_at: DateTime<Utc>,
) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("# PE Buyer Analysis: {}", profile.display_name()));
    lines.push(String::new());
    lines.push(format!("**Source URL**: {}", url));
    lines.push(format!(
        "**Generated**: {}",
        generated_at.format("%Y-%m-%d %H:%M")
    ));
    lines.push(String::new());

    push_profile(&mut lines, profile);

    if let Some(matches) = matches {
        push_matches(&mut lines, matches);
    }

    lines.push("---".into());
    lines.push("*Report generated by PE Matcher Tool*".into());

    lines.join("\n")
}

fn push_profile(lines: &mut Vec<String>, profile: &CompanyProfile) {
    lines.push("---".into());
    lines.push("## Company Profile".into());
    lines.push(String::new());

    if let Some(industry) = &profile.industry {
        lines.push(format!("**Industry**: {}", industry));
    }
    if let Some(location) = profile.location_label() {
        lines.push(format!("**Location**: {}", location));
    }
    if let Some(size) = profile.size_estimate() {
        lines.push(format!("**Size**: {}", size));
    }
    if let Some(year) = profile.founded_year.filter(|y| *y != 0) {
        lines.push(format!("**Founded**: {}", year));
    }
    if let Some(model) = &profile.business_model {
        lines.push(format!("**Business Model**: {}", model));
    }
    lines.push(String::new());

    push_list(lines, "### Products & Services", &profile.products_services);
    push_list(lines, "### Target Customers", &profile.customer_segments);

    if let Some(summary) = &profile.summary {
        lines.push("### Summary".into());
        lines.push(summary.clone());
        lines.push(String::new());
    }
}

fn push_list(lines: &mut Vec<String>, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    lines.push(heading.into());
    lines.extend(items.iter().take(MAX_LIST_ITEMS).map(|item| format!("- {}", item)));
    lines.push(String::new());
}

fn push_matches(lines: &mut Vec<String>, result: &MatchResult) {
    if let Some(analysis) = result.analysis.as_ref().filter(|a| !a.is_empty()) {
        lines.push("---".into());
        lines.push("## PE Readiness Assessment".into());
        lines.push(String::new());

        let fields = [
            ("Overview", &analysis.company_summary),
            ("Est. Enterprise Value", &analysis.estimated_enterprise_value),
            ("PE Readiness", &analysis.pe_readiness),
            ("Rationale", &analysis.pe_readiness_rationale),
        ];
        for (label, value) in fields {
            if let Some(value) = value {
                lines.push(format!("**{}**: {}", label, value));
            }
        }
        lines.push(String::new());
    }

    if !result.matches.is_empty() {
        lines.push("---".into());
        lines.push("## Top PE Fund Matches".into());
        lines.push(String::new());

        for m in &result.matches {
            let rank = m.rank.map(|r| r.to_string()).unwrap_or_default();
            lines.push(format!("### {}. {}", rank, m.display_name()));
            lines.push(format!("**Fit Score**: {}/100", m.fit_score.unwrap_or(0)));
            lines.push(String::new());

            if let Some(rationale) = &m.rationale {
                lines.push(format!("**Why they're a fit**: {}", rationale));
                lines.push(String::new());
            }
            if !m.key_alignment.is_empty() {
                lines.push("**Key Alignment Points**:".into());
                lines.extend(m.key_alignment.iter().map(|p| format!("- {}", p)));
                lines.push(String::new());
            }
            if !m.potential_concerns.is_empty() {
                lines.push("**Potential Concerns**:".into());
                lines.extend(m.potential_concerns.iter().map(|c| format!("- {}", c)));
                lines.push(String::new());
            }
            if let Some(deal_type) = &m.deal_type_fit {
                lines.push(format!("**Deal Type**: {}", deal_type));
                lines.push(String::new());
            }

            lines.push("---".into());
            lines.push(String::new());
        }
    }

    if let Some(notes) = &result.additional_notes {
        lines.push("## Additional Notes".into());
        lines.push(notes.clone());
        lines.push(String::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::matching::{FundMatch, PeAnalysis};
    use crate::types::profile::{CompanySize, Location};
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 5, 0).unwrap()
    }

    fn profile() -> CompanyProfile {
        CompanyProfile {
            company_name: Some("Acme Widgets".into()),
            industry: Some("Industrial Manufacturing".into()),
            location: Some(Location {
                city: Some("Duluth".into()),
                state: Some("MN".into()),
                country: None,
            }),
            company_size: Some(CompanySize {
                estimate: Some("50-100 employees".into()),
                signals: vec![],
            }),
            founded_year: Some(1998),
            products_services: (1..=7).map(|i| format!("Widget {}", i)).collect(),
            summary: Some("Acme makes widgets.".into()),
            extraction_success: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_profile_sections() {
        let md = render_markdown("https://acme.example", &profile(), None, at());

        assert!(md.starts_with("# PE Buyer Analysis: Acme Widgets\n"));
        assert!(md.contains("**Generated**: 2026-03-01 09:05"));
        assert!(md.contains("**Location**: Duluth, MN"));
        assert!(md.contains("**Size**: 50-100 employees"));
        assert!(md.contains("**Founded**: 1998"));
        assert!(md.contains("- Widget 5"));
        assert!(!md.contains("- Widget 6"));
        assert!(!md.contains("### Target Customers"));
        assert!(!md.contains("## Top PE Fund Matches"));
        assert!(md.ends_with("*Report generated by PE Matcher Tool*"));
    }

    #[test]
    fn test_match_sections() {
        let matches = MatchResult {
            analysis: Some(PeAnalysis {
                estimated_enterprise_value: Some("$10-25M".into()),
                pe_readiness: Some("Medium".into()),
                ..Default::default()
            }),
            matches: vec![
                FundMatch {
                    rank: Some(1),
                    fund_name: Some("Lakeshore Capital".into()),
                    fit_score: Some(84),
                    key_alignment: vec!["Industrial focus".into()],
                    deal_type_fit: Some("buyout".into()),
                    ..Default::default()
                },
                FundMatch::default(),
            ],
            additional_notes: Some("Owner nearing retirement".into()),
            matching_success: true,
            ..Default::default()
        };

        let md = render_markdown("https://acme.example", &profile(), Some(&matches), at());

        assert!(md.contains("**Est. Enterprise Value**: $10-25M"));
        assert!(!md.contains("**Overview**"));
        assert!(md.contains("### 1. Lakeshore Capital\n**Fit Score**: 84/100"));
        assert!(md.contains("**Key Alignment Points**:\n- Industrial focus"));
        assert!(md.contains("**Deal Type**: buyout"));
        assert!(md.contains("### . Unknown\n**Fit Score**: 0/100"));
        assert!(md.contains("## Additional Notes\nOwner nearing retirement"));
    }

    #[test]
    fn test_unknown_company_name() {
        let md = render_markdown("https://x.example", &CompanyProfile::default(), None, at());
        assert!(md.starts_with("# PE Buyer Analysis: Unknown Company"));
    }
}
