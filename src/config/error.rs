//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid start tier {tier} for {domain} (expected 1-3)")]
    InvalidStartTier { domain: &'static str, tier: i64 },

    #[error("Invalid log filter directive: {0}")]
    InvalidLogFilter(String),
}
