//! OpenRouter API configuration.

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Settings for the OpenRouter recommendation backend.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenRouterApiConfig {
    /// API key; never logged or serialized back out.
    pub api_key: Secret<String>,

    /// Base URL of the API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model tried first for every completion.
    #[serde(default = "default_primary_model")]
    pub primary_model: String,

    /// Model tried when the primary keeps failing.
    #[serde(default = "default_fallback_model")]
    pub fallback_model: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Retry attempts per model.
    #[serde(default = "default_retries")]
    pub max_retries: u32,
}

impl OpenRouterApiConfig {
    /// Request timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate OpenRouter configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.api_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("OPENROUTER API KEY"));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn default_base_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_primary_model() -> String {
    "perplexity/llama-3.1-sonar-large-128k-online".to_string()
}

fn default_fallback_model() -> String {
    "anthropic/claude-3-haiku".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_retries() -> u32 {
    2
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_key(key: &str) -> OpenRouterApiConfig {
        OpenRouterApiConfig {
            api_key: Secret::new(key.to_string()),
            base_url: default_base_url(),
            primary_model: default_primary_model(),
            fallback_model: default_fallback_model(),
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
        }
    }

    #[test]
    fn empty_api_key_fails_validation() {
        assert!(with_key("").validate().is_err());
    }

    #[test]
    fn defaults_pass_validation_with_a_key() {
        let config = with_key("sk-or-test");
        assert!(config.validate().is_ok());
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.max_retries, 2);
    }

    #[test]
    fn zero_timeout_fails_validation() {
        let mut config = with_key("sk-or-test");
        config.timeout_secs = 0;
        assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));
    }

    #[test]
    fn debug_output_hides_the_api_key() {
        let config = with_key("sk-or-very-secret");
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-or-very-secret"));
    }
}
