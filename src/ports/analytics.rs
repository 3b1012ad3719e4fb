//! Analytics port.
//!
//! Fire-and-forget usage tracking. The engine swallows every error from
//! this port: analytics must never alter conversation state or abort the
//! operation that produced the event.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::domain::foundation::DomainError;

/// Attribute bag attached to an analytics event.
pub type EventAttributes = HashMap<String, String>;

/// Well-known event names emitted by the conversation engine.
pub mod events {
    /// A category was chosen and a new request created.
    pub const CATEGORY_SELECTED: &str = "category_selected";
    /// A recommendation was generated and handed to the caller.
    pub const RECOMMENDATION_DELIVERED: &str = "recommendation_delivered";
    /// Both recommendation tiers failed.
    pub const RECOMMENDATION_FAILED: &str = "recommendation_failed";
    /// The user asked for another option.
    pub const ALTERNATIVE_REQUESTED: &str = "alternative_requested";
    /// The conversation was reset before completion.
    pub const CONVERSATION_ABANDONED: &str = "conversation_abandoned";
}

/// Port for recording usage events.
#[async_trait]
pub trait Analytics: Send + Sync {
    /// Record one event. Best-effort: callers ignore the result beyond
    /// logging it.
    async fn record(
        &self,
        event_name: &str,
        attributes: EventAttributes,
    ) -> Result<(), DomainError>;
}

/// Builds an attribute bag from string pairs.
pub fn attributes<const N: usize>(pairs: [(&str, &str); N]) -> EventAttributes {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
