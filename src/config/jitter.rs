//! Jitter configuration

use serde::Deserialize;

/// Randomness used for presentational jitter in risk scores.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JitterConfig {
    /// Fixed seed for reproducible runs; OS entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
}
