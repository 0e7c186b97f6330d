//! Profile extraction - prompt the model and decode its reply into a
//! [`CompanyProfile`].

use std::sync::Arc;
use tracing::{debug, info, warn};

use super::prompts::format_extraction_prompt;
use super::response::extract_json_block;
use crate::traits::ai::{CompletionRequest, LanguageModel};
use crate::types::config::MatcherConfig;
use crate::types::profile::CompanyProfile;

/// Appended when combined content is cut before prompting.
pub const CONTENT_TRUNCATED_MARKER: &str = "\n[Content truncated...]";

/// Error recorded when there is nothing to send.
pub const NO_CONTENT_ERROR: &str = "No content to analyze";

/// Weights of the six field confidences in the overall score.
pub const CONFIDENCE_WEIGHTS: [(ConfidenceField, f64); 6] = [
    (ConfidenceField::Industry, 0.25),
    (ConfidenceField::Location, 0.15),
    (ConfidenceField::Products, 0.20),
    (ConfidenceField::Size, 0.15),
    (ConfidenceField::BusinessModel, 0.15),
    (ConfidenceField::Customers, 0.10),
];

/// Profile fields that contribute to the overall confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceField {
    Industry,
    Location,
    Products,
    Size,
    BusinessModel,
    Customers,
}

impl ConfidenceField {
    fn value(&self, profile: &CompanyProfile) -> Option<f64> {
        match self {
            Self::Industry => profile.industry_confidence,
            Self::Location => profile.location_confidence,
            Self::Products => profile.products_confidence,
            Self::Size => profile.size_confidence,
            Self::BusinessModel => profile.business_model_confidence,
            Self::Customers => profile.customers_confidence,
        }
    }
}

/// Weighted mean of the present field confidences, renormalized over the
/// fields that are present and rounded to two decimals, halves to even.
///
/// Zero for a failed extraction or when no weighted field is present.
pub fn calculate_overall_confidence(profile: &CompanyProfile) -> f64 {
    if !profile.extraction_success {
        return 0.0;
    }

    let (weighted_sum, total_weight) = CONFIDENCE_WEIGHTS
        .iter()
        .filter_map(|(field, weight)| field.value(profile).map(|value| (value, *weight)))
        .fold((0.0, 0.0), |(sum, total), (value, weight)| {
            (sum + value * weight, total + weight)
        });

    if total_weight == 0.0 {
        return 0.0;
    }

    ((weighted_sum / total_weight) * 100.0).round_ties_even() / 100.0
}

/// Turns combined site text into a [`CompanyProfile`] with one model call.
pub struct ProfileExtractor<A: LanguageModel> {
    ai: Arc<A>,
    model: String,
    max_tokens: u32,
    max_content_chars: usize,
}

impl<A: LanguageModel> ProfileExtractor<A> {
    pub fn new(ai: Arc<A>, config: &MatcherConfig) -> Self {
        Self {
            ai,
            model: config.extraction_model.clone(),
            max_tokens: config.extraction_max_tokens,
            max_content_chars: config.max_content_chars,
        }
    }

    /// Extract a profile. Never fails; inspect `extraction_success`.
    pub async fn extract(&self, content: &str) -> CompanyProfile {
        if content.trim().is_empty() {
            return CompanyProfile::failed(NO_CONTENT_ERROR, None);
        }

        let content = self.cap_content(content);
        let prompt = format_extraction_prompt(&content);

        debug!(
            model = %self.model,
            backend = self.ai.name(),
            prompt_chars = prompt.len(),
            "Requesting profile extraction"
        );

        let reply = match self
            .ai
            .complete(CompletionRequest::new(&self.model, prompt, self.max_tokens))
            .await
        {
            Ok(reply) => reply,
            Err(e) => {
                warn!(model = %self.model, error = %e, "Extraction call failed");
                return CompanyProfile::failed(format!("Extraction failed: {}", e), None);
            }
        };

        match parse_profile(&reply) {
            Ok(profile) => {
                info!(
                    company = profile.display_name(),
                    industry = profile.industry.as_deref().unwrap_or("-"),
                    "Extracted company profile"
                );
                profile
            }
            Err(e) => {
                warn!(error = %e, reply_chars = reply.len(), "Extraction reply was not valid JSON");
                CompanyProfile::failed(
                    format!("Failed to parse LLM response as JSON: {}", e),
                    Some(reply),
                )
            }
        }
    }

    fn cap_content<'a>(&self, content: &'a str) -> std::borrow::Cow<'a, str> {
        match content.char_indices().nth(self.max_content_chars) {
            Some((byte_idx, _)) => {
                debug!(
                    limit = self.max_content_chars,
                    "Truncating combined content before extraction"
                );
                format!("{}{}", &content[..byte_idx], CONTENT_TRUNCATED_MARKER).into()
            }
            None => content.into(),
        }
    }
}

/// Decode a model reply into a successful profile.
pub fn parse_profile(reply: &str) -> serde_json::Result<CompanyProfile> {
    let mut profile: CompanyProfile = serde_json::from_str(extract_json_block(reply))?;
    profile.extraction_success = true;
    profile.error = None;
    profile.raw_response = None;
    Ok(profile)
}
