//! User state repository port.
//!
//! Contract for persisting the in-progress travel request of each user.
//! Absence of an entry means no conversation is in progress.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::travel::TravelRequest;

/// Port for per-user conversation state persistence.
///
/// Implementations must keep entries isolated per `user_id`. They are not
/// responsible for ordering concurrent writers: the engine serializes its
/// own load-modify-save cycles per user and calls this port from inside
/// that critical section.
#[async_trait]
pub trait UserStateRepository: Send + Sync {
    /// Load the current request for a user.
    ///
    /// Returns `None` when no conversation is in progress.
    ///
    /// # Errors
    ///
    /// - `StateUnavailable` when the store cannot be reached
    async fn load(&self, user_id: UserId) -> Result<Option<TravelRequest>, DomainError>;

    /// Save (insert or overwrite) the request for a user.
    ///
    /// # Errors
    ///
    /// - `StateUnavailable` when the store cannot be reached; in that case
    ///   no partial state is committed
    async fn save(&self, user_id: UserId, request: &TravelRequest) -> Result<(), DomainError>;

    /// Remove the request for a user. Removing an absent entry is not an
    /// error.
    ///
    /// # Errors
    ///
    /// - `StateUnavailable` when the store cannot be reached
    async fn clear(&self, user_id: UserId) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_state_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn UserStateRepository) {}
    }
}
