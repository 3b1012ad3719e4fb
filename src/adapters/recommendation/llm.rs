//! LLM-backed recommendation service.
//!
//! Composes the prompt formatter and the OpenRouter client behind the
//! [`RecommendationService`] port. Whatever goes wrong inside the client
//! (primary and fallback model both failing, timeouts, bad payloads)
//! collapses into `RecommendationUnavailable` at this boundary.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::travel::{TravelRecommendation, TravelRequest};
use crate::ports::RecommendationService;

use super::openrouter::{ChatMessage, OpenRouterClient};
use super::prompt::PromptFormatter;

/// Production recommendation service over the OpenRouter API.
pub struct LlmRecommendationService {
    client: OpenRouterClient,
    formatter: PromptFormatter,
}

impl LlmRecommendationService {
    /// Creates the service from a configured client.
    pub fn new(client: OpenRouterClient) -> Self {
        Self {
            client,
            formatter: PromptFormatter::new(),
        }
    }

    /// Guards against a request crossing this boundary incomplete.
    fn ensure_complete(request: &TravelRequest) -> Result<(), DomainError> {
        let missing = request.missing_questions(
            &crate::domain::travel::policy_for(request.category).required_keys(),
        );
        if missing.is_empty() {
            Ok(())
        } else {
            Err(DomainError::incomplete(
                missing.into_iter().map(String::from).collect(),
            ))
        }
    }

    async fn run(
        &self,
        messages: Vec<ChatMessage>,
        request: &TravelRequest,
    ) -> Result<TravelRecommendation, DomainError> {
        let content = self.client.complete(&messages).await.map_err(|e| {
            tracing::error!(error = %e, "both recommendation tiers failed");
            DomainError::recommendation_unavailable(e.to_string())
        })?;

        Ok(self.formatter.parse_response(&content, request))
    }
}

#[async_trait]
impl RecommendationService for LlmRecommendationService {
    async fn generate(
        &self,
        request: &TravelRequest,
    ) -> Result<TravelRecommendation, DomainError> {
        Self::ensure_complete(request)?;
        let messages = self.formatter.format_request(request);
        self.run(messages, request).await
    }

    async fn generate_alternative(
        &self,
        request: &TravelRequest,
        exclude_destinations: &[String],
    ) -> Result<TravelRecommendation, DomainError> {
        Self::ensure_complete(request)?;
        let messages = self
            .formatter
            .format_alternative_request(request, exclude_destinations);
        self.run(messages, request).await
    }
}
