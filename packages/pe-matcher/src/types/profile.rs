//! Company profile inferred from scraped website text.
//!
//! Every fact is optional: the model omits what it cannot find, and an
//! omitted field stays omitted when the profile is serialized again.
//! Unknown fields in the model reply are ignored.

use serde::{Deserialize, Deserializer, Serialize};

use super::lenient;

/// Structured facts about one company.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::option_string")]
    pub company_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::option_string")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::option_f64")]
    pub industry_confidence: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "location_or_text")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::option_f64")]
    pub location_confidence: Option<f64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "lenient::string_list")]
    pub products_services: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::option_f64")]
    pub products_confidence: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "size_or_text")]
    pub company_size: Option<CompanySize>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::option_f64")]
    pub size_confidence: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::option_i64")]
    pub founded_year: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::option_f64")]
    pub founded_confidence: Option<f64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "leaders_or_text")]
    pub leadership: Vec<Leader>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::option_f64")]
    pub leadership_confidence: Option<f64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "lenient::string_list")]
    pub customer_segments: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::option_f64")]
    pub customers_confidence: Option<f64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "lenient::string_list")]
    pub tech_signals: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::option_string")]
    pub business_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::option_f64")]
    pub business_model_confidence: Option<f64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "lenient::string_list")]
    pub growth_signals: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::option_string")]
    pub summary: Option<String>,

    /// Weighted average of six field confidences, set after extraction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_confidence: Option<f64>,

    #[serde(default)]
    pub extraction_success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Unparsed model reply, kept when the reply could not be decoded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

impl CompanyProfile {
    /// A profile describing a failed extraction.
    pub fn failed(error: impl Into<String>, raw_response: Option<String>) -> Self {
        Self {
            extraction_success: false,
            error: Some(error.into()),
            raw_response,
            ..Default::default()
        }
    }

    /// Display name, falling back to "Unknown Company".
    pub fn display_name(&self) -> &str {
        self.company_name.as_deref().unwrap_or("Unknown Company")
    }

    /// Size bucket such as "10-50 employees".
    pub fn size_estimate(&self) -> Option<&str> {
        self.company_size.as_ref().and_then(|s| s.estimate.as_deref())
    }

    /// "City, State, Country" with missing parts skipped.
    pub fn location_label(&self) -> Option<String> {
        self.location.as_ref().and_then(Location::label)
    }
}

// A bare string location is taken as the city, a bare string size as the
// estimate, a bare string leader as the name.
fn location_or_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Location>, D::Error> {
    lenient::option_record_or_text(d, |city| Location {
        city: Some(city),
        ..Default::default()
    })
}

fn size_or_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<CompanySize>, D::Error> {
    lenient::option_record_or_text(d, |estimate| CompanySize {
        estimate: Some(estimate),
        ..Default::default()
    })
}

fn leaders_or_text<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Leader>, D::Error> {
    lenient::record_list_or_text(d, |name| Leader {
        name: Some(name),
        ..Default::default()
    })
}

/// Headquarters location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::option_string")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::option_string")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::option_string")]
    pub country: Option<String>,
}

impl Location {
    pub fn label(&self) -> Option<String> {
        let parts: Vec<&str> = [&self.city, &self.state, &self.country]
            .into_iter()
            .filter_map(|p| p.as_deref())
            .collect();
        (!parts.is_empty()).then(|| parts.join(", "))
    }
}

/// Headcount estimate and the evidence behind it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanySize {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::option_string")]
    pub estimate: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "lenient::string_list")]
    pub signals: Vec<String>,
}

/// A named executive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Leader {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::option_string")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::option_string")]
    pub title: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_model_shape_and_ignores_extras() {
        let json = r#"{
            "company_name": "Acme Robotics",
            "industry": "Industrial Automation",
            "industry_confidence": 0.9,
            "location": {"city": "Minneapolis", "state": "MN", "country": null},
            "products_services": ["Palletizers", "Vision QA"],
            "company_size": {"estimate": "50-100 employees", "signals": null},
            "founded_year": "2009",
            "leadership": [{"name": "Dana Ortiz", "title": "CEO"}],
            "customer_segments": null,
            "favorite_color": "blue"
        }"#;

        let profile: CompanyProfile = serde_json::from_str(json).unwrap();

        assert_eq!(profile.display_name(), "Acme Robotics");
        assert_eq!(profile.industry_confidence, Some(0.9));
        assert_eq!(profile.location_label().as_deref(), Some("Minneapolis, MN"));
        assert_eq!(profile.size_estimate(), Some("50-100 employees"));
        assert_eq!(profile.founded_year, Some(2009));
        assert_eq!(profile.leadership[0].title.as_deref(), Some("CEO"));
        assert!(profile.customer_segments.is_empty());
        assert!(!profile.extraction_success);
    }

    #[test]
    fn test_null_nested_objects() {
        let profile: CompanyProfile =
            serde_json::from_str(r#"{"location": null, "company_size": null, "leadership": null}"#)
                .unwrap();
        assert!(profile.location.is_none());
        assert!(profile.company_size.is_none());
        assert!(profile.leadership.is_empty());
        assert_eq!(profile.display_name(), "Unknown Company");
    }

    #[test]
    fn test_serialization_keeps_absent_fields_absent() {
        let profile = CompanyProfile {
            company_name: Some("Acme".into()),
            extraction_success: true,
            ..Default::default()
        };

        let value = serde_json::to_value(&profile).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(object["company_name"], "Acme");

        let back: CompanyProfile = serde_json::from_value(value).unwrap();
        assert_eq!(back, profile);
    }

    #[test]
    fn test_string_location_size_and_leaders() {
        let profile = crate::pipeline::parse_profile(
            r#"{
                "company_name": "Acme",
                "location": "Minneapolis, MN",
                "company_size": "10-50 employees",
                "leadership": ["Dana Ortiz, CEO", {"name": "Lee Park", "title": "CFO"}, 42]
            }"#,
        )
        .unwrap();

        assert!(profile.extraction_success);
        assert_eq!(profile.location_label().as_deref(), Some("Minneapolis, MN"));
        assert_eq!(profile.size_estimate(), Some("10-50 employees"));
        assert_eq!(profile.leadership.len(), 2);
        assert_eq!(profile.leadership[0].name.as_deref(), Some("Dana Ortiz, CEO"));
        assert_eq!(profile.leadership[1].title.as_deref(), Some("CFO"));
    }

    #[test]
    fn test_unexpected_nested_shapes_become_absent() {
        let profile: CompanyProfile = serde_json::from_str(
            r#"{"company_name": "Acme", "location": ["MN"], "company_size": 40, "leadership": "unknown"}"#,
        )
        .unwrap();

        assert_eq!(profile.display_name(), "Acme");
        assert!(profile.location.is_none());
        assert!(profile.company_size.is_none());
        assert_eq!(profile.leadership.len(), 1);
        assert_eq!(profile.leadership[0].name.as_deref(), Some("unknown"));
    }

    #[test]
    fn test_failed_profile() {
        let profile = CompanyProfile::failed("Extraction failed: boom", Some("raw".into()));
        assert!(!profile.extraction_success);
        assert_eq!(profile.error.as_deref(), Some("Extraction failed: boom"));
        assert_eq!(profile.raw_response.as_deref(), Some("raw"));
    }
}
