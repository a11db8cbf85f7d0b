//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `PEARLS_DEBRIEF` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use pearls_debrief::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr().unwrap());
//! ```

mod ai;
mod debrief;
mod error;
mod features;
mod server;

pub use ai::{AiConfig, AiProvider};
pub use debrief::DebriefConfig;
pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use server::{Environment, LogFormat, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging, CORS)
    #[serde(default)]
    pub server: ServerConfig,

    /// Completion provider configuration
    #[serde(default)]
    pub ai: AiConfig,

    /// Conversation tuning (history window, sampling)
    #[serde(default)]
    pub debrief: DebriefConfig,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PEARLS_DEBRIEF` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Falls back to the provider's conventional API key variable
    ///
    /// # Environment Variable Format
    ///
    /// - `PEARLS_DEBRIEF__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `PEARLS_DEBRIEF__AI__PROVIDER=together` -> `ai.provider = together`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let mut config: AppConfig = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PEARLS_DEBRIEF")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        config.ai.apply_key_fallback(|var| std::env::var(var).ok());

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid,
    /// including a missing provider API key.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.debrief.validate()?;
        Ok(())
    }
}
