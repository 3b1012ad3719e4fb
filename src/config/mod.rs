//! Application configuration module.
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read under the `TRIPCRAFT`
//! prefix with `__` separating nested sections:
//!
//! - `TRIPCRAFT__REDIS__URL=redis://localhost:6379`
//! - `TRIPCRAFT__OPENROUTER__API_KEY=sk-or-...`

mod error;
mod openrouter;
mod redis;

pub use error::{ConfigError, ValidationError};
pub use openrouter::OpenRouterApiConfig;
pub use redis::RedisConfig;

use serde::Deserialize;

/// Root application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Conversation state store.
    pub redis: RedisConfig,

    /// Recommendation backend.
    pub openrouter: OpenRouterApiConfig,
}

impl AppConfig {
    /// Loads configuration from the environment (and a `.env` file when
    /// present, for development).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when required variables are missing or values
    /// cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("TRIPCRAFT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validates all sections.
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.redis.validate()?;
        self.openrouter.validate()?;
        Ok(())
    }
}
