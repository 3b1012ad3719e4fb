//! Process wiring.
//!
//! Builds the production adapter set from configuration and assembles the
//! conversation engine. Transports receive the engine; nothing else in
//! the crate knows which concrete adapters are behind it.

use secrecy::ExposeSecret;
use std::sync::Arc;
use thiserror::Error;

use crate::adapters::{
    LlmRecommendationService, LogAnalytics, LogNotifier, OpenRouterClient, OpenRouterConfig,
    RedisUserStateRepository,
};
use crate::config::AppConfig;
use crate::domain::foundation::DomainError;

use super::engine::ConversationEngine;

/// Errors raised while wiring the production engine.
#[derive(Debug, Error)]
pub enum WiringError {
    #[error("invalid redis URL: {0}")]
    RedisUrl(#[from] redis::RedisError),

    #[error("redis connection failed: {0}")]
    RedisConnect(DomainError),

    #[error("recommendation client setup failed: {0}")]
    Recommendation(#[from] crate::adapters::recommendation::OpenRouterError),
}

/// Builds production services from configuration.
pub struct ServiceFactory {
    config: AppConfig,
}

impl ServiceFactory {
    /// Creates a factory for the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Assembles the engine with Redis persistence and the OpenRouter
    /// recommendation backend.
    ///
    /// # Errors
    ///
    /// Returns `WiringError` when Redis cannot be reached or the HTTP
    /// client cannot be built.
    pub async fn build_engine(&self) -> Result<ConversationEngine, WiringError> {
        let client = redis::Client::open(self.config.redis.url.as_str())?;
        let repository =
            RedisUserStateRepository::connect(&client, self.config.redis.request_ttl())
                .await
                .map_err(WiringError::RedisConnect)?;

        let openrouter = OpenRouterClient::new(self.openrouter_config())?;
        let recommendations = LlmRecommendationService::new(openrouter);

        Ok(ConversationEngine::new(
            Arc::new(recommendations),
            Arc::new(repository),
            Arc::new(LogAnalytics::new()),
            Arc::new(LogNotifier::new()),
        ))
    }

    fn openrouter_config(&self) -> OpenRouterConfig {
        let api = &self.config.openrouter;
        OpenRouterConfig::new(api.api_key.expose_secret().clone())
            .with_base_url(api.base_url.clone())
            .with_primary_model(api.primary_model.clone())
            .with_fallback_model(api.fallback_model.clone())
            .with_timeout(api.timeout())
            .with_max_retries(api.max_retries)
    }
}
