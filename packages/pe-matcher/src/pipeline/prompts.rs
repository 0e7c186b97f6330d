//! LLM prompts for profile extraction and fund matching.

/// Placeholder used when the caller gives no deal context.
pub const NO_USER_CONTEXT: &str = "No additional context provided";

/// Prompt for extracting a company profile from combined site text.
pub const EXTRACTION_PROMPT: &str = r#"Analyze the following website content and extract a structured company profile.

WEBSITE CONTENT:
{content}

Extract the following information. If information is not available, use null. Include a confidence score (0.0-1.0) for each field based on how clearly it was stated vs inferred.

Return ONLY valid JSON in this exact format:
{
    "company_name": "string or null",
    "industry": "string - be specific (e.g., 'B2B SaaS - Marketing Automation' not just 'Technology')",
    "industry_confidence": 0.0-1.0,
    "location": {
        "city": "string or null",
        "state": "string or null",
        "country": "string or null"
    },
    "location_confidence": 0.0-1.0,
    "products_services": ["list of main products/services offered"],
    "products_confidence": 0.0-1.0,
    "company_size": {
        "estimate": "string (e.g., '10-50 employees', '50-100 employees', '100-500 employees')",
        "signals": ["list of signals used to estimate - e.g., 'careers page shows 12 open roles', 'team page lists 25 people'"]
    },
    "size_confidence": 0.0-1.0,
    "founded_year": "integer or null",
    "founded_confidence": 0.0-1.0,
    "leadership": [
        {"name": "string", "title": "string"}
    ],
    "leadership_confidence": 0.0-1.0,
    "customer_segments": ["list of target customer types - e.g., 'Enterprise', 'SMB', 'Healthcare providers'"],
    "customers_confidence": 0.0-1.0,
    "tech_signals": ["any technology stack indicators found"],
    "business_model": "string - e.g., 'SaaS subscription', 'Professional services', 'E-commerce'",
    "business_model_confidence": 0.0-1.0,
    "growth_signals": ["any indicators of growth stage - funding, hiring, expansion mentions"],
    "summary": "2-3 sentence summary of what this company does"
}
"#;

/// Prompt for ranking acquirer funds against a profile.
pub const MATCHING_PROMPT: &str = r#"You are a PE deal sourcing expert. Analyze the company profile and find the best matching PE funds.

COMPANY PROFILE:
{company_profile}

USER CONTEXT (deal notes, preferences, timing):
{user_context}

PE FUND DATABASE:
{pe_funds}

Your task:
1. Analyze the company's industry, size, business model, and growth stage
2. Match against PE funds based on: sector focus, check size fit, geographic alignment, investment thesis fit
3. Consider the user context to adjust rankings (e.g., if they prefer growth equity over buyout)
4. Return the top {num_matches} matches with detailed rationale

IMPORTANT: Be realistic about fit. Not every company is a good PE target. If the company seems too small, too early, or misaligned, note that in your analysis.

Return ONLY valid JSON in this exact format:
{
    "analysis": {
        "company_summary": "1-2 sentence summary of the company",
        "estimated_enterprise_value": "rough estimate based on signals (e.g., '$10-25M', '$50-100M')",
        "pe_readiness": "High/Medium/Low - is this company likely PE-ready?",
        "pe_readiness_rationale": "Why or why not"
    },
    "matches": [
        {
            "rank": 1,
            "fund_name": "string",
            "fit_score": 0-100,
            "rationale": "2-3 sentences explaining why this fund is a good match",
            "key_alignment": ["list of specific alignment points"],
            "potential_concerns": ["list of any concerns or gaps"],
            "deal_type_fit": "growth equity / buyout / either"
        }
    ],
    "additional_notes": "Any other relevant observations for the user"
}
"#;

/// Format the extraction prompt with site content.
pub fn format_extraction_prompt(content: &str) -> String {
    fill_template(EXTRACTION_PROMPT, &[("content", content)])
}

/// Format the matching prompt.
///
/// `company_profile` and `pe_funds` are pre-rendered JSON. Blank
/// `user_context` is replaced by [`NO_USER_CONTEXT`]. Placeholders inside
/// substituted values are left alone.
pub fn format_matching_prompt(
    company_profile: &str,
    user_context: &str,
    pe_funds: &str,
    num_matches: usize,
) -> String {
    let user_context = if user_context.trim().is_empty() {
        NO_USER_CONTEXT
    } else {
        user_context
    };

    let num_matches = num_matches.to_string();
    fill_template(
        MATCHING_PROMPT,
        &[
            ("company_profile", company_profile),
            ("user_context", user_context),
            ("pe_funds", pe_funds),
            ("num_matches", num_matches.as_str()),
        ],
    )
}

/// Replace `{name}` slots in one left-to-right pass. Inserted values are
/// never rescanned; braces that open no known slot are copied through.
fn fill_template(template: &str, slots: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after_brace = &rest[start + 1..];

        let hit = slots.iter().find_map(|(name, value)| {
            after_brace
                .strip_prefix(name)
                .and_then(|tail| tail.strip_prefix('}'))
                .map(|tail| (*value, tail))
        });

        match hit {
            Some((value, tail)) => {
                out.push_str(value);
                rest = tail;
            }
            None => {
                out.push('{');
                rest = after_brace;
            }
        }
    }

    out.push_str(rest);
    out
}
