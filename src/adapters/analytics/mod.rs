//! Analytics adapters.
//!
//! Production wiring uses [`LogAnalytics`], which forwards events to the
//! tracing subscriber; a dedicated analytics backend can be swapped in
//! behind the same port. Tests use [`RecordingAnalytics`] for assertions
//! and its failing mode to prove events never break the main flow.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::foundation::DomainError;
use crate::ports::{Analytics, EventAttributes};

/// Analytics adapter that logs every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAnalytics;

impl LogAnalytics {
    /// Creates the adapter.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Analytics for LogAnalytics {
    async fn record(
        &self,
        event_name: &str,
        attributes: EventAttributes,
    ) -> Result<(), DomainError> {
        tracing::info!(event = event_name, ?attributes, "analytics event");
        Ok(())
    }
}

/// A captured analytics event (test helper).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedEvent {
    pub name: String,
    pub attributes: EventAttributes,
}

/// Analytics adapter that captures events for assertions.
///
/// Can be switched into a failing mode to verify that analytics errors
/// are swallowed by the engine.
#[derive(Debug, Default)]
pub struct RecordingAnalytics {
    events: RwLock<Vec<RecordedEvent>>,
    fail: RwLock<bool>,
}

impl RecordingAnalytics {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `record` call fail.
    pub fn fail_all(&self) {
        *self.fail.write().expect("fail flag lock poisoned") = true;
    }

    /// All captured events, in emission order.
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.read().expect("events lock poisoned").clone()
    }

    /// Names of captured events, in emission order.
    pub fn event_names(&self) -> Vec<String> {
        self.events().into_iter().map(|e| e.name).collect()
    }

    /// True if an event with the given name was recorded.
    pub fn has_event(&self, name: &str) -> bool {
        self.events().iter().any(|e| e.name == name)
    }
}

#[async_trait]
impl Analytics for RecordingAnalytics {
    async fn record(
        &self,
        event_name: &str,
        attributes: EventAttributes,
    ) -> Result<(), DomainError> {
        if *self.fail.read().expect("fail flag lock poisoned") {
            return Err(DomainError::state_unavailable("analytics backend down"));
        }
        self.events
            .write()
            .expect("events lock poisoned")
            .push(RecordedEvent {
                name: event_name.to_string(),
                attributes,
            });
        Ok(())
    }
}
