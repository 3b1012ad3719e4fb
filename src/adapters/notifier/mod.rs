//! Notifier adapters.
//!
//! [`LogNotifier`] writes alerts to the log; the transport layer can
//! provide a real operator channel behind the same port.
//! [`RecordingNotifier`] captures messages for test assertions.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::ports::Notifier;

/// Notifier that logs alerts at warn level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl LogNotifier {
    /// Creates the adapter.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, user_id: UserId, message: &str) -> Result<(), DomainError> {
        tracing::warn!(%user_id, message, "operator notification");
        Ok(())
    }
}

/// Notifier that captures messages for assertions.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: RwLock<Vec<(UserId, String)>>,
}

impl RecordingNotifier {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured notifications, in delivery order.
    pub fn messages(&self) -> Vec<(UserId, String)> {
        self.messages.read().expect("messages lock poisoned").clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, user_id: UserId, message: &str) -> Result<(), DomainError> {
        self.messages
            .write()
            .expect("messages lock poisoned")
            .push((user_id, message.to_string()));
        Ok(())
    }
}
