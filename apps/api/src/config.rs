use anyhow::{Context, Result};

use crate::llm_client::Provider;

const DEFAULT_LLM_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_LLM_MODEL: &str = "gpt-4o-mini";
const DEFAULT_FALLBACK_BASE_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_FALLBACK_MODEL: &str = "llama-3.3-70b-versatile";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Primary chat-completions provider. `None` switches the interview flow
    /// to the offline interviewer and disables resume analysis.
    pub llm: Option<Provider>,
    pub llm_fallback: Option<Provider>,
    pub interview_duration_secs: u64,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let llm = optional_env("LLM_API_KEY").map(|api_key| Provider {
            name: "primary".to_string(),
            base_url: env_or("LLM_BASE_URL", DEFAULT_LLM_BASE_URL),
            model: env_or("LLM_MODEL", DEFAULT_LLM_MODEL),
            api_key,
        });

        let llm_fallback = optional_env("LLM_FALLBACK_API_KEY").map(|api_key| Provider {
            name: "fallback".to_string(),
            base_url: env_or("LLM_FALLBACK_BASE_URL", DEFAULT_FALLBACK_BASE_URL),
            model: env_or("LLM_FALLBACK_MODEL", DEFAULT_FALLBACK_MODEL),
            api_key,
        });

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            llm,
            llm_fallback,
            interview_duration_secs: parse_env("INTERVIEW_DURATION_SECS", 120)
                .context("INTERVIEW_DURATION_SECS must be a whole number of seconds")?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 5 * 1024 * 1024)
                .context("MAX_UPLOAD_BYTES must be a byte count")?,
            port: parse_env("PORT", 8080).context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }

    pub fn interview_duration(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.interview_duration_secs as i64)
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Returns the variable only when it is set to something non-blank.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    optional_env(key).unwrap_or_else(|| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    parse_or(optional_env(key).as_deref(), default)
}

fn parse_or<T>(raw: Option<&str>, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(value) => Ok(value.parse::<T>()?),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_or_uses_default_when_unset() {
        assert_eq!(parse_or::<u16>(None, 8080).unwrap(), 8080);
    }

    #[test]
    fn test_parse_or_parses_value() {
        assert_eq!(parse_or::<u64>(Some("300"), 120).unwrap(), 300);
    }

    #[test]
    fn test_parse_or_rejects_garbage() {
        assert!(parse_or::<u16>(Some("eighty"), 8080).is_err());
    }

    #[test]
    fn test_interview_duration_in_seconds() {
        let config = Config {
            database_url: "postgres://localhost/careero".to_string(),
            llm: None,
            llm_fallback: None,
            interview_duration_secs: 90,
            max_upload_bytes: 1024,
            port: 8080,
            rust_log: "info".to_string(),
        };
        assert_eq!(config.interview_duration().num_seconds(), 90);
    }
}
