//! Adapters - Implementations of port interfaces.
//!
//! Each port gets one production adapter and one in-memory/mock adapter
//! implementing the same contract, so the engine can be exercised without
//! Redis or the LLM backend.

pub mod analytics;
pub mod notifier;
pub mod recommendation;
pub mod repository;

pub use analytics::{LogAnalytics, RecordingAnalytics};
pub use notifier::{LogNotifier, RecordingNotifier};
pub use recommendation::{
    LlmRecommendationService, MockRecommendationService, OpenRouterClient, OpenRouterConfig,
    PromptFormatter,
};
pub use repository::{InMemoryUserStateRepository, RedisUserStateRepository};
