//! Fund matching - rank acquirer funds for a profile with one model call.

use std::sync::Arc;
use tracing::{debug, info, warn};

use super::prompts::format_matching_prompt;
use super::response::extract_json_block;
use crate::error::Result;
use crate::stores::funds::FundStore;
use crate::traits::ai::{CompletionRequest, LanguageModel};
use crate::types::config::MatcherConfig;
use crate::types::fund::{AcquirerFund, FundSummary};
use crate::types::matching::MatchResult;
use crate::types::profile::CompanyProfile;

/// Ranks the fund dataset against a company profile.
pub struct FundMatcher<A: LanguageModel> {
    ai: Arc<A>,
    store: FundStore,
    model: String,
    max_tokens: u32,
}

impl<A: LanguageModel> FundMatcher<A> {
    pub fn new(ai: Arc<A>, config: &MatcherConfig) -> Self {
        Self {
            ai,
            store: FundStore::new(&config.funds_path),
            model: config.matching_model.clone(),
            max_tokens: config.matching_max_tokens,
        }
    }

    /// Use a different fund dataset.
    pub fn with_store(mut self, store: FundStore) -> Self {
        self.store = store;
        self
    }

    pub fn store(&self) -> &FundStore {
        &self.store
    }

    /// Rank every fund in the store. Never fails; inspect
    /// `matching_success`.
    pub async fn match_funds(
        &self,
        profile: &CompanyProfile,
        user_context: &str,
        num_matches: usize,
    ) -> MatchResult {
        match self.store.load().await {
            Ok(funds) => {
                self.match_funds_with(profile, &funds, user_context, num_matches)
                    .await
            }
            Err(e) => {
                warn!(error = %e, "Could not load fund dataset");
                MatchResult::failed(format!("Matching failed: {}", e), None)
            }
        }
    }

    /// Rank a caller-supplied fund list, e.g. one narrowed by a
    /// [`FundFilter`](crate::stores::funds::FundFilter).
    pub async fn match_funds_with(
        &self,
        profile: &CompanyProfile,
        funds: &[AcquirerFund],
        user_context: &str,
        num_matches: usize,
    ) -> MatchResult {
        let prompt = match build_prompt(profile, funds, user_context, num_matches) {
            Ok(prompt) => prompt,
            Err(e) => return MatchResult::failed(format!("Matching failed: {}", e), None),
        };

        debug!(
            model = %self.model,
            backend = self.ai.name(),
            funds = funds.len(),
            num_matches,
            "Requesting fund matching"
        );

        let reply = match self
            .ai
            .complete(CompletionRequest::new(&self.model, prompt, self.max_tokens))
            .await
        {
            Ok(reply) => reply,
            Err(e) => {
                warn!(model = %self.model, error = %e, "Matching call failed");
                return MatchResult::failed(format!("Matching failed: {}", e), None);
            }
        };

        let result = match parse_match_result(&reply) {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, reply_chars = reply.len(), "Matching reply was not valid JSON");
                return MatchResult::failed(
                    format!("Failed to parse LLM response: {}", e),
                    Some(reply),
                );
            }
        };

        for finding in result.audit(num_matches) {
            warn!(company = profile.display_name(), finding = %finding, "Unexpected match list");
        }

        info!(
            company = profile.display_name(),
            matches = result.matches.len(),
            "Fund matching complete"
        );

        result
    }
}

fn build_prompt(
    profile: &CompanyProfile,
    funds: &[AcquirerFund],
    user_context: &str,
    num_matches: usize,
) -> Result<String> {
    let profile_json = serde_json::to_string_pretty(profile)?;
    let summaries: Vec<FundSummary<'_>> = funds.iter().map(AcquirerFund::summary).collect();
    let funds_json = serde_json::to_string_pretty(&summaries)?;

    Ok(format_matching_prompt(
        &profile_json,
        user_context,
        &funds_json,
        num_matches,
    ))
}

/// Decode a model reply into a successful match result.
pub fn parse_match_result(reply: &str) -> serde_json::Result<MatchResult> {
    let mut result: MatchResult = serde_json::from_str(extract_json_block(reply))?;
    result.matching_success = true;
    result.error = None;
    result.raw_response = None;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockLanguageModel;

    const REPLY: &str = r#"{
        "analysis": {"company_summary": "Widget maker", "pe_readiness": "Medium"},
        "matches": [
            {"rank": 1, "fund_name": "Lakeshore Capital", "fit_score": 82, "key_alignment": ["sector"]},
            {"rank": 2, "fund_name": "Prairie Growth", "fit_score": "70"}
        ],
        "additional_notes": "Small but growing"
    }"#;

    fn profile() -> CompanyProfile {
        CompanyProfile {
            company_name: Some("Acme".into()),
            industry: Some("Industrial widgets".into()),
            extraction_success: true,
            ..Default::default()
        }
    }

    fn funds() -> Vec<AcquirerFund> {
        let mut fund = AcquirerFund::new("Lakeshore Capital").with_sectors(["Industrials"]);
        fund.description = Some("Do not send this".into());
        vec![fund, AcquirerFund::new("Prairie Growth")]
    }

    #[tokio::test]
    async fn test_match_with_supplied_funds() {
        let ai = Arc::new(MockLanguageModel::new().with_default_reply(REPLY));
        let matcher = FundMatcher::new(ai.clone(), &MatcherConfig::default());

        let result = matcher
            .match_funds_with(&profile(), &funds(), "prefers buyouts", 2)
            .await;

        assert!(result.matching_success);
        assert_eq!(result.matches.len(), 2);
        assert_eq!(result.matches[0].fund_name.as_deref(), Some("Lakeshore Capital"));
        assert_eq!(result.matches[1].fit_score, Some(70));
        assert_eq!(result.additional_notes.as_deref(), Some("Small but growing"));

        let calls = ai.calls();
        assert_eq!(calls[0].max_tokens, 3000);
        let prompt = &calls[0].prompt;
        assert!(prompt.contains("\"company_name\": \"Acme\""));
        assert!(prompt.contains("prefers buyouts"));
        assert!(prompt.contains("\"name\": \"Prairie Growth\""));
        assert!(!prompt.contains("Do not send this"));
        assert!(prompt.contains("Return the top 2 matches"));
    }

    #[tokio::test]
    async fn test_unparseable_reply() {
        let ai = Arc::new(MockLanguageModel::new().with_default_reply("No good matches, sorry."));
        let matcher = FundMatcher::new(ai, &MatcherConfig::default());

        let result = matcher.match_funds_with(&profile(), &funds(), "", 5).await;

        assert!(!result.matching_success);
        assert!(result
            .error
            .as_deref()
            .unwrap()
            .starts_with("Failed to parse LLM response:"));
        assert_eq!(result.raw_response.as_deref(), Some("No good matches, sorry."));
        assert!(result.matches.is_empty());
    }

    #[tokio::test]
    async fn test_model_error() {
        let ai = Arc::new(MockLanguageModel::new().with_default_error("rate limited"));
        let matcher = FundMatcher::new(ai, &MatcherConfig::default());

        let result = matcher.match_funds_with(&profile(), &funds(), "", 5).await;

        assert!(!result.matching_success);
        assert_eq!(result.error.as_deref(), Some("Matching failed: rate limited"));
    }

    #[tokio::test]
    async fn test_missing_dataset() {
        let ai = Arc::new(MockLanguageModel::new().with_default_reply(REPLY));
        let matcher = FundMatcher::new(ai.clone(), &MatcherConfig::default())
            .with_store(FundStore::new("/nonexistent/funds.json"));

        let result = matcher.match_funds(&profile(), "", 5).await;

        assert!(!result.matching_success);
        assert!(result.error.as_deref().unwrap().starts_with("Matching failed:"));
        assert!(ai.calls().is_empty());
    }

    #[tokio::test]
    async fn test_bundled_dataset_loads() {
        let ai = Arc::new(MockLanguageModel::new().with_default_reply(REPLY));
        let matcher = FundMatcher::new(ai.clone(), &MatcherConfig::default());

        let result = matcher.match_funds(&profile(), "", 10).await;

        assert!(result.matching_success);
        assert!(ai.calls()[0].prompt.contains("\"sector_focus\""));
    }

    #[test]
    fn test_out_of_order_ranks_are_kept() {
        let result = parse_match_result(
            r#"{"matches": [{"rank": 2, "fund_name": "B"}, {"rank": 1, "fund_name": "A"}]}"#,
        )
        .unwrap();
        assert_eq!(result.matches[0].rank, Some(2));
        assert_eq!(result.audit(10).len(), 2);
    }
}
