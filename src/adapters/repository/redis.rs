//! Redis-backed user state repository.
//!
//! Stores each user's in-progress travel request as a JSON value under
//! `travel_request:{user_id}` with a TTL, so stale conversations expire on
//! their own and state survives process restarts as long as Redis does.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client};
use std::time::Duration;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::travel::TravelRequest;
use crate::ports::UserStateRepository;

/// Production repository over a multiplexed Redis connection.
pub struct RedisUserStateRepository {
    conn: MultiplexedConnection,
    ttl_secs: u64,
}

impl RedisUserStateRepository {
    /// Connects to Redis and returns a ready repository.
    ///
    /// # Errors
    ///
    /// Returns `StateUnavailable` if the connection cannot be established.
    pub async fn connect(client: &Client, ttl: Duration) -> Result<Self, DomainError> {
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| DomainError::state_unavailable(format!("redis connect: {e}")))?;
        Ok(Self::from_connection(conn, ttl))
    }

    /// Wraps an existing connection.
    pub fn from_connection(conn: MultiplexedConnection, ttl: Duration) -> Self {
        Self {
            conn,
            ttl_secs: ttl.as_secs().max(1),
        }
    }

    /// Checks that Redis answers a PING.
    pub async fn health_check(&self) -> bool {
        let mut conn = self.conn.clone();
        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .is_ok()
    }

    fn request_key(user_id: UserId) -> String {
        format!("travel_request:{user_id}")
    }

    /// Removes a key without failing the surrounding operation.
    async fn delete_corrupt(&self, key: &str) {
        let mut conn = self.conn.clone();
        if let Err(e) = conn.del::<_, ()>(key).await {
            tracing::warn!(key, error = %e, "failed to delete corrupt state entry");
        }
    }
}

#[async_trait]
impl UserStateRepository for RedisUserStateRepository {
    async fn load(&self, user_id: UserId) -> Result<Option<TravelRequest>, DomainError> {
        let key = Self::request_key(user_id);
        let mut conn = self.conn.clone();

        let payload: Option<String> = conn
            .get(&key)
            .await
            .map_err(|e| DomainError::state_unavailable(format!("redis get: {e}")))?;

        let Some(payload) = payload else {
            return Ok(None);
        };

        match serde_json::from_str::<TravelRequest>(&payload) {
            Ok(request) => Ok(Some(request)),
            Err(e) => {
                // Corrupt payloads are dropped and treated as absent so the
                // user can start over instead of being stuck.
                tracing::warn!(%user_id, error = %e, "corrupt travel request payload, deleting");
                self.delete_corrupt(&key).await;
                Ok(None)
            }
        }
    }

    async fn save(&self, user_id: UserId, request: &TravelRequest) -> Result<(), DomainError> {
        let key = Self::request_key(user_id);
        let payload = serde_json::to_string(request)
            .map_err(|e| DomainError::state_unavailable(format!("serialize request: {e}")))?;

        let mut conn = self.conn.clone();
        redis::cmd("SETEX")
            .arg(&key)
            .arg(self.ttl_secs)
            .arg(payload)
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(|e| DomainError::state_unavailable(format!("redis setex: {e}")))?;

        tracing::debug!(%user_id, "travel request saved");
        Ok(())
    }

    async fn clear(&self, user_id: UserId) -> Result<(), DomainError> {
        let key = Self::request_key(user_id);
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(&key)
            .await
            .map_err(|e| DomainError::state_unavailable(format!("redis del: {e}")))?;

        tracing::debug!(%user_id, "travel request cleared");
        Ok(())
    }
}
