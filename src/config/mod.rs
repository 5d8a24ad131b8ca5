//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `LEARNSCOPE` prefix and nested values use double underscores as separators.
//! Every section has defaults, so an empty environment is a valid configuration.
//!
//! # Example
//!
//! ```no_run
//! use learnscope::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod difficulty;
mod error;
mod jitter;
mod logging;

pub use difficulty::{DifficultyConfig, DomainDifficultyConfig};
pub use error::{ConfigError, ValidationError};
pub use jitter::JitterConfig;
pub use logging::LoggingConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Log filter and output format
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Seed for score jitter
    #[serde(default)]
    pub jitter: JitterConfig,

    /// Per-domain difficulty policies
    #[serde(default)]
    pub difficulty: DifficultyConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `LEARNSCOPE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `LEARNSCOPE__JITTER__SEED=42` -> `jitter.seed = 42`
    /// - `LEARNSCOPE__DIFFICULTY__READING__POLICY=immediate`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("LEARNSCOPE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for an unparsable log filter or a start
    /// tier outside 1-3.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.logging.validate()?;
        self.difficulty.validate()?;
        Ok(())
    }
}
