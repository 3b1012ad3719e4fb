//! OpenRouter chat-completions client.
//!
//! Minimal client for the OpenRouter API with bounded retries and a
//! two-tier model strategy: every completion is first attempted on the
//! primary model and, if that keeps failing with a retryable error, once
//! more on the configured fallback model.

use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration for the OpenRouter client.
#[derive(Debug, Clone)]
pub struct OpenRouterConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Base URL of the API.
    pub base_url: String,
    /// Model tried first for every completion.
    pub primary_model: String,
    /// Model tried when the primary keeps failing.
    pub fallback_model: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Retry attempts per model on retryable failures.
    pub max_retries: u32,
}

impl OpenRouterConfig {
    /// Creates a configuration with the given API key and the default
    /// endpoint and models.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: "https://openrouter.ai/api/v1".to_string(),
            primary_model: "perplexity/llama-3.1-sonar-large-128k-online".to_string(),
            fallback_model: "anthropic/claude-3-haiku".to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 2,
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the primary model.
    pub fn with_primary_model(mut self, model: impl Into<String>) -> Self {
        self.primary_model = model.into();
        self
    }

    /// Sets the fallback model.
    pub fn with_fallback_model(mut self, model: impl Into<String>) -> Self {
        self.fallback_model = model.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the per-model retry count.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// A chat message sent to the completion endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Sender role.
    pub role: ChatRole,
    /// Message content.
    pub content: String,
}

impl ChatMessage {
    /// Creates a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// Role of a chat message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// Errors from the OpenRouter API.
#[derive(Debug, Clone, Error)]
pub enum OpenRouterError {
    #[error("rate limited by the API")]
    RateLimited,

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    #[error("unexpected response shape: {0}")]
    Parse(String),
}

impl OpenRouterError {
    /// True when another attempt (same or fallback model) may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            OpenRouterError::RateLimited
            | OpenRouterError::Network(_)
            | OpenRouterError::Timeout => true,
            OpenRouterError::Api { status, .. } => *status >= 500,
            OpenRouterError::AuthenticationFailed | OpenRouterError::Parse(_) => false,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// Client for the OpenRouter chat-completions API.
pub struct OpenRouterClient {
    config: OpenRouterConfig,
    client: Client,
}

impl OpenRouterClient {
    /// Creates a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns the underlying error if the HTTP client cannot be built.
    pub fn new(config: OpenRouterConfig) -> Result<Self, OpenRouterError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| OpenRouterError::Network(e.to_string()))?;
        Ok(Self { config, client })
    }

    /// The model tried first.
    pub fn primary_model(&self) -> &str {
        &self.config.primary_model
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    /// Runs a completion with the two-tier model strategy.
    ///
    /// # Errors
    ///
    /// Returns the fallback model's error when both tiers are exhausted,
    /// or the primary's error when it is not worth retrying elsewhere.
    pub async fn complete(&self, messages: &[ChatMessage]) -> Result<String, OpenRouterError> {
        let primary = self.config.primary_model.clone();
        match self.complete_with_model(&primary, messages).await {
            Ok(content) => Ok(content),
            Err(err) if err.is_retryable() => {
                let fallback = self.config.fallback_model.clone();
                tracing::warn!(
                    primary = %primary,
                    fallback = %fallback,
                    error = %err,
                    "primary model failed, trying fallback"
                );
                self.complete_with_model(&fallback, messages).await
            }
            Err(err) => Err(err),
        }
    }

    /// Runs a completion against one model, retrying retryable failures.
    pub async fn complete_with_model(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<String, OpenRouterError> {
        let mut last_error = None;
        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                tokio::time::sleep(Duration::from_millis(200 * u64::from(attempt))).await;
            }
            match self.send(model, messages).await {
                Ok(content) => return Ok(content),
                Err(err) if err.is_retryable() => {
                    tracing::debug!(model, attempt, error = %err, "completion attempt failed");
                    last_error = Some(err);
                }
                Err(err) => return Err(err),
            }
        }
        Err(last_error.unwrap_or_else(|| OpenRouterError::Network("no attempts made".into())))
    }

    async fn send(&self, model: &str, messages: &[ChatMessage]) -> Result<String, OpenRouterError> {
        let body = ChatCompletionRequest {
            model,
            messages,
            max_tokens: 2000,
            temperature: 0.7,
            top_p: 0.9,
        };

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(self.config.api_key())
            .header("HTTP-Referer", "https://github.com/tripcraft/tripcraft")
            .header("X-Title", "TripCraft")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    OpenRouterError::Timeout
                } else {
                    OpenRouterError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => OpenRouterError::AuthenticationFailed,
                429 => OpenRouterError::RateLimited,
                code => OpenRouterError::Api {
                    status: code,
                    message,
                },
            });
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| OpenRouterError::Parse(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| OpenRouterError::Parse("response contained no choices".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_match_the_public_endpoint() {
        let config = OpenRouterConfig::new("sk-test");
        assert_eq!(config.base_url, "https://openrouter.ai/api/v1");
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn completions_url_tolerates_trailing_slash() {
        let client = OpenRouterClient::new(
            OpenRouterConfig::new("sk-test").with_base_url("https://example.test/api/v1/"),
        )
        .unwrap();
        assert_eq!(
            client.completions_url(),
            "https://example.test/api/v1/chat/completions"
        );
    }

    #[test]
    fn server_errors_are_retryable_client_errors_are_not() {
        assert!(OpenRouterError::Api { status: 503, message: String::new() }.is_retryable());
        assert!(OpenRouterError::RateLimited.is_retryable());
        assert!(OpenRouterError::Timeout.is_retryable());
        assert!(!OpenRouterError::Api { status: 400, message: String::new() }.is_retryable());
        assert!(!OpenRouterError::AuthenticationFailed.is_retryable());
        assert!(!OpenRouterError::Parse("bad json".into()).is_retryable());
    }

    #[test]
    fn chat_messages_serialize_with_lowercase_roles() {
        let json = serde_json::to_string(&ChatMessage::system("hi")).unwrap();
        assert!(json.contains("\"role\":\"system\""));
    }
}
