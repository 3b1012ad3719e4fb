//! Conversation engine - the state machine driving one planning dialogue
//! per user.
//!
//! Orchestrates question sequencing, answer intake and recommendation
//! generation over the four capability ports. All conversation state
//! lives in the repository; the engine itself is stateless apart from the
//! per-user lock registry, so any number of transports can share one
//! instance.

use std::sync::Arc;

use crate::domain::conversation::ConversationPhase;
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::travel::{policy_for, TravelCategory, TravelRecommendation, TravelRequest};
use crate::ports::{attributes, events, Analytics, Notifier, RecommendationService, UserStateRepository};

use super::user_locks::UserLocks;

/// The next question the transport should ask, with progress counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionPrompt {
    /// Key of the question to ask next.
    pub question_key: &'static str,
    /// Required questions already answered.
    pub answered: usize,
    /// Total required questions for the category.
    pub total: usize,
}

/// Result of an accepted answer submission.
#[derive(Debug, Clone)]
pub enum AnswerOutcome {
    /// More questions remain; ask this one next.
    NextQuestion(QuestionPrompt),
    /// The answer set became complete and generation succeeded.
    RecommendationReady(TravelRecommendation),
    /// The conversation was reset while a recommendation was in flight;
    /// the late result was discarded and there is nothing to deliver.
    ConversationReset,
}

/// Drives conversations from category selection to a delivered
/// recommendation.
pub struct ConversationEngine {
    recommendations: Arc<dyn RecommendationService>,
    repository: Arc<dyn UserStateRepository>,
    analytics: Arc<dyn Analytics>,
    notifier: Arc<dyn Notifier>,
    locks: UserLocks,
}

impl ConversationEngine {
    /// Wires an engine from its four collaborators.
    pub fn new(
        recommendations: Arc<dyn RecommendationService>,
        repository: Arc<dyn UserStateRepository>,
        analytics: Arc<dyn Analytics>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            recommendations,
            repository,
            analytics,
            notifier,
            locks: UserLocks::new(),
        }
    }

    /// Starts a new conversation for the user, replacing any prior one.
    ///
    /// Persists a fresh request and returns the first question to ask.
    ///
    /// # Errors
    ///
    /// - `StateUnavailable` when the repository cannot be reached
    pub async fn select_category(
        &self,
        user_id: UserId,
        category: TravelCategory,
    ) -> Result<QuestionPrompt, DomainError> {
        let request = {
            let _guard = self.locks.acquire(user_id).await;
            self.repository.clear(user_id).await?;
            let request = TravelRequest::new(user_id, category);
            self.repository.save(user_id, &request).await?;
            request
        };

        tracing::info!(%user_id, %category, "conversation started");
        self.record(
            events::CATEGORY_SELECTED,
            attributes([("category", category.as_str())]),
        )
        .await;

        Ok(prompt_for(&request).expect("a fresh request always has a next question"))
    }

    /// Accepts one answer for the user's in-progress conversation.
    ///
    /// On validation failure the stored request is untouched and the same
    /// question should be re-asked. Once the answer set is complete,
    /// recommendation generation runs automatically; on success the stored
    /// request is cleared and the recommendation returned.
    ///
    /// # Errors
    ///
    /// - `InvalidAnswer` when validation fails or no conversation exists
    /// - `RecommendationUnavailable` when generation fails; the request is
    ///   preserved and [`retry_generation`](Self::retry_generation) will
    ///   pick it up without re-answering
    /// - `StateUnavailable` when the repository cannot be reached
    pub async fn submit_answer(
        &self,
        user_id: UserId,
        question_key: &str,
        raw_value: &str,
        display_value: &str,
    ) -> Result<AnswerOutcome, DomainError> {
        // Load-modify-save under the per-user lock; generation happens
        // outside it so an abandon can always get through.
        let request = {
            let _guard = self.locks.acquire(user_id).await;

            let mut request = self.repository.load(user_id).await?.ok_or_else(|| {
                DomainError::invalid_answer(question_key, "no conversation in progress")
            })?;

            request.add_answer(question_key, raw_value, display_value)?;
            self.repository.save(user_id, &request).await?;
            request
        };

        if let Some(prompt) = prompt_for(&request) {
            return Ok(AnswerOutcome::NextQuestion(prompt));
        }

        tracing::info!(%user_id, category = %request.category, "answer set complete, generating");
        self.generate_and_complete(user_id, request).await
    }

    /// Re-runs recommendation generation after a failure, without the user
    /// re-entering any answers.
    ///
    /// # Errors
    ///
    /// - `IncompleteRequest` when the stored request is not complete
    /// - `RecommendationUnavailable` when generation fails again
    /// - `StateUnavailable` when the repository cannot be reached
    pub async fn retry_generation(&self, user_id: UserId) -> Result<AnswerOutcome, DomainError> {
        let request = {
            let _guard = self.locks.acquire(user_id).await;
            self.repository.load(user_id).await?
        };

        let Some(request) = request else {
            return Ok(AnswerOutcome::ConversationReset);
        };

        let required = policy_for(request.category).required_keys();
        let missing = request.missing_questions(&required);
        if !missing.is_empty() {
            return Err(DomainError::incomplete(
                missing.into_iter().map(String::from).collect(),
            ));
        }

        self.generate_and_complete(user_id, request).await
    }

    /// Produces another suggestion from an already-delivered
    /// recommendation, avoiding the listed destinations.
    ///
    /// Works after completion: the originating request travels inside the
    /// recommendation, so no repository state is needed.
    ///
    /// # Errors
    ///
    /// - `RecommendationUnavailable` when generation fails
    pub async fn request_alternative(
        &self,
        recommendation: &TravelRecommendation,
        exclude_destinations: &[String],
    ) -> Result<TravelRecommendation, DomainError> {
        self.record(
            events::ALTERNATIVE_REQUESTED,
            attributes([("category", recommendation.category.as_str())]),
        )
        .await;

        self.recommendations
            .generate_alternative(&recommendation.request, exclude_destinations)
            .await
    }

    /// Resets the user's conversation from any phase.
    ///
    /// A recommendation call already in flight is allowed to finish, but
    /// its result will be discarded: the abandon wins.
    ///
    /// # Errors
    ///
    /// - `StateUnavailable` when the repository cannot be reached
    pub async fn abandon(&self, user_id: UserId) -> Result<(), DomainError> {
        {
            let _guard = self.locks.acquire(user_id).await;
            self.repository.clear(user_id).await?;
        }

        tracing::info!(%user_id, "conversation abandoned");
        self.record(events::CONVERSATION_ABANDONED, attributes([])).await;
        Ok(())
    }

    /// Reports the lifecycle phase of the user's conversation.
    ///
    /// # Errors
    ///
    /// - `StateUnavailable` when the repository cannot be reached
    pub async fn conversation_phase(
        &self,
        user_id: UserId,
    ) -> Result<ConversationPhase, DomainError> {
        let request = self.repository.load(user_id).await?;
        Ok(match request {
            None => ConversationPhase::CategorySelection,
            Some(request) if request.is_ready() => ConversationPhase::GeneratingRecommendation,
            Some(_) => ConversationPhase::CollectingAnswers,
        })
    }

    /// Runs generation for a complete request and applies the result.
    ///
    /// The stored request must still carry the same id when the result
    /// arrives; otherwise the conversation was abandoned or restarted in
    /// the meantime and the result is dropped.
    async fn generate_and_complete(
        &self,
        user_id: UserId,
        request: TravelRequest,
    ) -> Result<AnswerOutcome, DomainError> {
        let recommendation = match self.recommendations.generate(&request).await {
            Ok(recommendation) => recommendation,
            Err(error) => {
                tracing::warn!(%user_id, %error, "recommendation generation failed");
                self.record(
                    events::RECOMMENDATION_FAILED,
                    attributes([("category", request.category.as_str())]),
                )
                .await;
                self.alert(user_id, &format!("recommendation generation failed: {error}"))
                    .await;
                // The stored request is untouched: the conversation drops
                // back to collecting answers and stays retryable.
                return Err(error);
            }
        };

        let applied = {
            let _guard = self.locks.acquire(user_id).await;
            match self.repository.load(user_id).await? {
                Some(stored) if stored.id == request.id => {
                    self.repository.clear(user_id).await?;
                    true
                }
                _ => false,
            }
        };

        if !applied {
            tracing::info!(%user_id, "conversation reset mid-generation, dropping late result");
            return Ok(AnswerOutcome::ConversationReset);
        }

        self.record(
            events::RECOMMENDATION_DELIVERED,
            attributes([
                ("category", request.category.as_str()),
                ("destination", recommendation.destination.as_str()),
            ]),
        )
        .await;

        Ok(AnswerOutcome::RecommendationReady(recommendation))
    }

    /// Records an analytics event, never failing the caller.
    async fn record(&self, event_name: &str, attrs: crate::ports::EventAttributes) {
        if let Err(error) = self.analytics.record(event_name, attrs).await {
            tracing::warn!(event = event_name, %error, "analytics record failed, ignoring");
        }
    }

    /// Sends an operator notification, never failing the caller.
    async fn alert(&self, user_id: UserId, message: &str) {
        if let Err(error) = self.notifier.notify(user_id, message).await {
            tracing::warn!(%user_id, %error, "notification failed, ignoring");
        }
    }
}

/// Next prompt for a request, or `None` when it is complete.
fn prompt_for(request: &TravelRequest) -> Option<QuestionPrompt> {
    let required = policy_for(request.category).required_keys();
    let question_key = request.next_question()?;
    let answered = required
        .iter()
        .filter(|key| request.answer(key).is_some())
        .count();
    Some(QuestionPrompt {
        question_key,
        answered,
        total: required.len(),
    })
}
