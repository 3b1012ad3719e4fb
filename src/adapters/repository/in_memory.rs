//! In-memory user state repository for testing.
//!
//! Deterministic, lock-based map store. Not suitable for production: state
//! dies with the process and is invisible to other instances.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::travel::TravelRequest;
use crate::ports::UserStateRepository;

/// Map-backed repository for tests and local development.
#[derive(Debug, Default)]
pub struct InMemoryUserStateRepository {
    requests: RwLock<HashMap<UserId, TravelRequest>>,
}

impl InMemoryUserStateRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored requests (test helper).
    pub fn len(&self) -> usize {
        self.requests.read().expect("requests lock poisoned").len()
    }

    /// True when no request is stored (test helper).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserStateRepository for InMemoryUserStateRepository {
    async fn load(&self, user_id: UserId) -> Result<Option<TravelRequest>, DomainError> {
        let requests = self.requests.read().expect("requests lock poisoned");
        Ok(requests.get(&user_id).cloned())
    }

    async fn save(&self, user_id: UserId, request: &TravelRequest) -> Result<(), DomainError> {
        let mut requests = self.requests.write().expect("requests lock poisoned");
        requests.insert(user_id, request.clone());
        Ok(())
    }

    async fn clear(&self, user_id: UserId) -> Result<(), DomainError> {
        let mut requests = self.requests.write().expect("requests lock poisoned");
        requests.remove(&user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::travel::TravelCategory;

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let repo = InMemoryUserStateRepository::new();
        let user = UserId::new(10);
        let mut request = TravelRequest::new(user, TravelCategory::Budget);
        request.add_answer("budget", "500", "$500").unwrap();

        repo.save(user, &request).await.unwrap();
        let loaded = repo.load(user).await.unwrap().unwrap();

        assert_eq!(loaded, request);
    }

    #[tokio::test]
    async fn load_of_unknown_user_is_none() {
        let repo = InMemoryUserStateRepository::new();
        assert!(repo.load(UserId::new(99)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn clear_removes_the_entry() {
        let repo = InMemoryUserStateRepository::new();
        let user = UserId::new(11);
        let request = TravelRequest::new(user, TravelCategory::Active);

        repo.save(user, &request).await.unwrap();
        repo.clear(user).await.unwrap();

        assert!(repo.load(user).await.unwrap().is_none());
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn clearing_an_absent_entry_is_not_an_error() {
        let repo = InMemoryUserStateRepository::new();
        assert!(repo.clear(UserId::new(1)).await.is_ok());
    }

    #[tokio::test]
    async fn users_are_isolated() {
        let repo = InMemoryUserStateRepository::new();
        let alice = UserId::new(1);
        let bob = UserId::new(2);
        repo.save(alice, &TravelRequest::new(alice, TravelCategory::Family))
            .await
            .unwrap();
        repo.save(bob, &TravelRequest::new(bob, TravelCategory::Photo))
            .await
            .unwrap();

        repo.clear(alice).await.unwrap();

        assert!(repo.load(alice).await.unwrap().is_none());
        assert!(repo.load(bob).await.unwrap().is_some());
    }
}
