//! User state repository adapters.
//!
//! - `RedisUserStateRepository` - production store with TTL expiry
//! - `InMemoryUserStateRepository` - deterministic map store for tests

mod in_memory;
mod redis;

pub use in_memory::InMemoryUserStateRepository;
pub use redis::RedisUserStateRepository;
