//! Notification port.
//!
//! Out-of-band alerts, e.g. telling an operator that recommendation
//! generation keeps failing. Best-effort like analytics: failures are
//! logged and swallowed by the engine.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};

/// Port for sending out-of-band notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a free-text message concerning the given user.
    async fn notify(&self, user_id: UserId, message: &str) -> Result<(), DomainError>;
}
