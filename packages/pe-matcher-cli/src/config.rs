//! Environment-backed settings for the CLI.

use anthropic_client::SecretString;
use anyhow::{anyhow, Context, Result};
use pe_matcher::MatcherConfig;
use std::env;
use std::str::FromStr;

/// Everything read from the environment at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub config: MatcherConfig,
    pub api_key: Option<SecretString>,
    pub base_url: Option<String>,
}

impl Settings {
    /// Read the process environment. `main` loads `.env` beforehand.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = MatcherConfig::default();

        if let Some(model) = get("PE_MATCHER_EXTRACTION_MODEL") {
            config = config.with_extraction_model(model);
        }
        if let Some(model) = get("PE_MATCHER_MATCHING_MODEL") {
            config = config.with_matching_model(model);
        }
        if let Some(secs) = parse_var(&get, "PE_MATCHER_REQUEST_TIMEOUT")? {
            config = config.with_request_timeout(secs);
        }
        if let Some(secs) = parse_var(&get, "PE_MATCHER_LLM_TIMEOUT")? {
            config = config.with_llm_timeout(secs);
        }
        if let Some(max) = parse_var(&get, "PE_MATCHER_MAX_URLS")? {
            config = config.with_max_urls(max);
        }
        if let Some(max) = parse_var(&get, "PE_MATCHER_MAX_MATCHES")? {
            config = config.with_max_matches(max);
        }
        if let Some(user_agent) = get("PE_MATCHER_USER_AGENT") {
            config = config.with_user_agent(user_agent);
        }
        if let Some(path) = get("PE_MATCHER_FUNDS_PATH") {
            config = config.with_funds_path(path);
        }

        Ok(Self {
            config,
            api_key: get("ANTHROPIC_API_KEY").map(SecretString::from),
            base_url: get("ANTHROPIC_BASE_URL"),
        })
    }

    /// The API key, or an error naming the variable to set.
    pub fn require_api_key(&self) -> Result<&SecretString> {
        self.api_key
            .as_ref()
            .ok_or_else(|| anyhow!("ANTHROPIC_API_KEY must be set"))
    }
}

fn parse_var<T>(get: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    get(key)
        .map(|value| {
            value
                .parse::<T>()
                .with_context(|| format!("{} must be a non-negative integer, got {:?}", key, value))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_without_environment() {
        let settings = settings(&[]).unwrap();
        assert_eq!(settings.config, MatcherConfig::default());
        assert!(settings.api_key.is_none());
        assert!(settings.require_api_key().is_err());
    }

    #[test]
    fn test_overrides() {
        let settings = settings(&[
            ("ANTHROPIC_API_KEY", "sk-ant-test"),
            ("ANTHROPIC_BASE_URL", "http://localhost:9999/v1"),
            ("PE_MATCHER_MATCHING_MODEL", "claude-opus-4-20250514"),
            ("PE_MATCHER_REQUEST_TIMEOUT", "5"),
            ("PE_MATCHER_MAX_URLS", "3"),
            ("PE_MATCHER_FUNDS_PATH", "/tmp/funds.json"),
        ])
        .unwrap();

        assert_eq!(settings.require_api_key().unwrap().expose(), "sk-ant-test");
        assert_eq!(settings.base_url.as_deref(), Some("http://localhost:9999/v1"));
        assert_eq!(settings.config.matching_model, "claude-opus-4-20250514");
        assert_eq!(settings.config.request_timeout_secs, 5);
        assert_eq!(settings.config.max_urls_per_batch, 3);
        assert_eq!(settings.config.funds_path.to_str(), Some("/tmp/funds.json"));
        assert_eq!(settings.config.llm_timeout_secs, 120);
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let settings = settings(&[("ANTHROPIC_API_KEY", "  "), ("PE_MATCHER_MAX_URLS", "")]).unwrap();
        assert!(settings.api_key.is_none());
        assert_eq!(settings.config.max_urls_per_batch, 10);
    }

    #[test]
    fn test_bad_number_names_variable() {
        let err = settings(&[("PE_MATCHER_LLM_TIMEOUT", "soon")]).unwrap_err();
        assert!(format!("{:#}", err).contains("PE_MATCHER_LLM_TIMEOUT"));
    }

    #[test]
    fn test_from_env_leaves_dotenv_files_to_main() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".env"), "PE_MATCHER_MAX_MATCHES=3\n").unwrap();
        let previous = env::current_dir().unwrap();

        env::set_current_dir(dir.path()).unwrap();
        let loaded = Settings::from_env();
        env::set_current_dir(previous).unwrap();

        assert!(env::var("PE_MATCHER_MAX_MATCHES").is_err());
        assert_eq!(loaded.unwrap().config.max_matches, 10);
    }

    #[test]
    fn test_api_key_is_redacted() {
        let settings = settings(&[("ANTHROPIC_API_KEY", "sk-ant-test")]).unwrap();
        assert!(!format!("{:?}", settings).contains("sk-ant-test"));
    }
}
