//! Mock recommendation service for testing.
//!
//! Configurable queue of canned outcomes, consumed in order, with call
//! capture for verification. Keeps engine tests off the network.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use crate::domain::foundation::DomainError;
use crate::domain::travel::{TravelRecommendation, TravelRequest};
use crate::ports::RecommendationService;

/// A queued mock outcome.
#[derive(Debug, Clone)]
enum MockOutcome {
    /// Produce a recommendation with this destination and description.
    Success { destination: String, description: String },
    /// Fail with the given error.
    Error(DomainError),
}

/// Queue-driven recommendation service for tests.
///
/// Outcomes are consumed in configuration order; when the queue is empty
/// a generic recommendation is produced. An optional delay simulates a
/// slow backend for race tests.
#[derive(Debug, Default)]
pub struct MockRecommendationService {
    outcomes: Mutex<VecDeque<MockOutcome>>,
    calls: Mutex<Vec<TravelRequest>>,
    exclusions: Mutex<Vec<Vec<String>>>,
    delay: Option<Duration>,
}

impl MockRecommendationService {
    /// Creates a mock with an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful recommendation.
    pub fn with_recommendation(
        self,
        destination: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.outcomes
            .lock()
            .expect("outcomes lock poisoned")
            .push_back(MockOutcome::Success {
                destination: destination.into(),
                description: description.into(),
            });
        self
    }

    /// Queues a failure.
    pub fn with_error(self, error: DomainError) -> Self {
        self.outcomes
            .lock()
            .expect("outcomes lock poisoned")
            .push_back(MockOutcome::Error(error));
        self
    }

    /// Delays every call, for in-flight race tests.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Requests received so far, in call order.
    pub fn calls(&self) -> Vec<TravelRequest> {
        self.calls.lock().expect("calls lock poisoned").clone()
    }

    /// Exclusion lists received by `generate_alternative`.
    pub fn exclusions(&self) -> Vec<Vec<String>> {
        self.exclusions.lock().expect("exclusions lock poisoned").clone()
    }

    async fn respond(&self, request: &TravelRequest) -> Result<TravelRecommendation, DomainError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.calls
            .lock()
            .expect("calls lock poisoned")
            .push(request.clone());

        let outcome = self
            .outcomes
            .lock()
            .expect("outcomes lock poisoned")
            .pop_front();

        match outcome {
            Some(MockOutcome::Success { destination, description }) => {
                Ok(TravelRecommendation::new(
                    destination,
                    description,
                    vec!["Mock highlight".to_string()],
                    "Mock practical info",
                    request.clone(),
                ))
            }
            Some(MockOutcome::Error(error)) => Err(error),
            None => Ok(TravelRecommendation::new(
                "Sample destination",
                "Default mock recommendation",
                vec![],
                "",
                request.clone(),
            )),
        }
    }
}

#[async_trait]
impl RecommendationService for MockRecommendationService {
    async fn generate(
        &self,
        request: &TravelRequest,
    ) -> Result<TravelRecommendation, DomainError> {
        self.respond(request).await
    }

    async fn generate_alternative(
        &self,
        request: &TravelRequest,
        exclude_destinations: &[String],
    ) -> Result<TravelRecommendation, DomainError> {
        self.exclusions
            .lock()
            .expect("exclusions lock poisoned")
            .push(exclude_destinations.to_vec());
        self.respond(request).await
    }
}
