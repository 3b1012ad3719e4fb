//! Recommendation service port.
//!
//! Contract for turning a complete travel request into an itinerary
//! suggestion. Concrete implementations talk to an LLM backend; tests use
//! the queued mock adapter.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::travel::{TravelRecommendation, TravelRequest};

/// Port for generating travel recommendations.
///
/// Callers must only pass requests whose required questions are all
/// answered; the engine enforces this before crossing the boundary.
///
/// Implementations may retry internally (including falling back to a
/// secondary model), but all generation failures collapse into
/// [`DomainError::RecommendationUnavailable`] at this boundary.
#[async_trait]
pub trait RecommendationService: Send + Sync {
    /// Generate an itinerary for the request.
    ///
    /// # Errors
    ///
    /// - `RecommendationUnavailable` when no backend could produce a result
    async fn generate(&self, request: &TravelRequest)
        -> Result<TravelRecommendation, DomainError>;

    /// Generate an alternative itinerary, avoiding the listed destinations.
    ///
    /// # Errors
    ///
    /// - `RecommendationUnavailable` when no backend could produce a result
    async fn generate_alternative(
        &self,
        request: &TravelRequest,
        exclude_destinations: &[String],
    ) -> Result<TravelRecommendation, DomainError>;
}
