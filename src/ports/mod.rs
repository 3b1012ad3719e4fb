//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the conversation core and the outside world. Adapters implement them;
//! the engine only ever sees the traits.
//!
//! - `RecommendationService` - itinerary generation (LLM-backed in prod)
//! - `UserStateRepository` - per-user conversation state persistence
//! - `Analytics` - fire-and-forget usage tracking
//! - `Notifier` - best-effort operator alerts

mod analytics;
mod notifier;
mod recommendation;
mod state_repository;

pub use analytics::{attributes, events, Analytics, EventAttributes};
pub use notifier::Notifier;
pub use recommendation::RecommendationService;
pub use state_repository::UserStateRepository;
