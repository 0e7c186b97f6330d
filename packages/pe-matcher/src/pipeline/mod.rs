//! The scrape → extract → match pipeline.
//!
//! - [`extract`]: combined site text to [`CompanyProfile`](crate::CompanyProfile)
//! - [`matcher`]: profile to ranked [`MatchResult`](crate::MatchResult)
//! - [`run`]: per-URL and batch orchestration
//!
//! Stage functions are total: they return result values carrying success
//! flags and never propagate errors to the caller.

pub mod extract;
pub mod matcher;
pub mod prompts;
pub mod response;
pub mod run;

pub use extract::{calculate_overall_confidence, parse_profile, ProfileExtractor};
pub use matcher::{parse_match_result, FundMatcher};
pub use prompts::{format_extraction_prompt, format_matching_prompt, EXTRACTION_PROMPT, MATCHING_PROMPT};
pub use response::extract_json_block;
pub use run::{parse_url_list, Pipeline};
