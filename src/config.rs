use crate::retry::RetryConfig;
use anyhow::{Context, Result};
use std::time::Duration;

pub const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

#[derive(Debug, Clone)]
pub struct Config {
    // OpenAI
    /// Missing keys are not a startup error; translations fail with ApiKeyMissing
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_api_url: String,

    // Retry/timeout for each section translation
    pub translation_max_retries: u32,
    pub translation_initial_delay_ms: u64,
    pub translation_max_delay_ms: u64,
    pub translation_timeout_ms: u64,

    // Content
    pub content_file: String,

    // Server
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // OpenAI
            openai_api_key: std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            openai_model: std::env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            openai_api_url: std::env::var("OPENAI_API_URL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_API_URL.to_string()),

            // Retry
            translation_max_retries: parse_env("TRANSLATION_MAX_RETRIES", 3)?,
            translation_initial_delay_ms: parse_env("TRANSLATION_INITIAL_DELAY_MS", 1000)?,
            translation_max_delay_ms: parse_env("TRANSLATION_MAX_DELAY_MS", 10_000)?,
            translation_timeout_ms: parse_env("TRANSLATION_TIMEOUT_MS", 30_000)?,

            // Content
            content_file: std::env::var("CONTENT_FILE")
                .unwrap_or_else(|_| "data/content.json".to_string()),

            // Server
            port: parse_env("PORT", 8080)?,
        })
    }

    /// Retry settings for section translation calls
    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig::new(
            self.translation_max_retries,
            Duration::from_millis(self.translation_initial_delay_ms),
        )
        .with_max_delay(Duration::from_millis(self.translation_max_delay_ms))
        .with_timeout(self.translation_timeout())
    }

    pub fn translation_timeout(&self) -> Duration {
        Duration::from_millis(self.translation_timeout_ms)
    }
}

/// Read an optional numeric variable; set-but-unparseable is an error
fn parse_env<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{} must be a number, got '{}'", name, value)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "OPENAI_API_KEY",
        "OPENAI_MODEL",
        "OPENAI_API_URL",
        "TRANSLATION_MAX_RETRIES",
        "TRANSLATION_INITIAL_DELAY_MS",
        "TRANSLATION_MAX_DELAY_MS",
        "TRANSLATION_TIMEOUT_MS",
        "CONTENT_FILE",
        "PORT",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = Config::from_env().unwrap();

        assert_eq!(config.openai_api_key, None);
        assert_eq!(config.openai_model, "gpt-4o-mini");
        assert_eq!(config.openai_api_url, DEFAULT_OPENAI_API_URL);
        assert_eq!(config.translation_max_retries, 3);
        assert_eq!(config.translation_initial_delay_ms, 1000);
        assert_eq!(config.translation_max_delay_ms, 10_000);
        assert_eq!(config.translation_timeout_ms, 30_000);
        assert_eq!(config.content_file, "data/content.json");
        assert_eq!(config.port, 8080);
    }

    #[test]
    #[serial]
    fn test_overrides() {
        clear_env();
        std::env::set_var("OPENAI_API_KEY", "sk-test");
        std::env::set_var("TRANSLATION_MAX_RETRIES", "5");
        std::env::set_var("TRANSLATION_TIMEOUT_MS", "2500");
        std::env::set_var("PORT", "3000");

        let config = Config::from_env().unwrap();
        clear_env();

        assert_eq!(config.openai_api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.translation_max_retries, 5);
        assert_eq!(config.translation_timeout(), Duration::from_millis(2500));
        assert_eq!(config.port, 3000);
    }

    #[test]
    #[serial]
    fn test_blank_api_key_is_missing() {
        clear_env();
        std::env::set_var("OPENAI_API_KEY", "  ");

        let config = Config::from_env().unwrap();
        clear_env();

        assert_eq!(config.openai_api_key, None);
    }

    #[test]
    #[serial]
    fn test_invalid_number_is_an_error() {
        clear_env();
        std::env::set_var("PORT", "eighty");

        let result = Config::from_env();
        clear_env();

        let err = result.unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    #[serial]
    fn test_retry_config_from_env() {
        clear_env();
        std::env::set_var("TRANSLATION_INITIAL_DELAY_MS", "200");
        std::env::set_var("TRANSLATION_MAX_DELAY_MS", "800");

        let config = Config::from_env().unwrap();
        clear_env();

        let retry = config.retry_config();
        assert_eq!(retry.max_retries, 3);
        assert_eq!(retry.initial_delay, Duration::from_millis(200));
        assert_eq!(retry.max_delay, Duration::from_millis(800));
        assert_eq!(retry.timeout, Duration::from_secs(30));
    }
}
