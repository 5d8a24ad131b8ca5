//! Difficulty configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::difficulty::{
    DifficultySettings, DifficultyTier, DomainDifficulty, PolicyKind,
};
use crate::domain::foundation::TaskDomain;

/// Policy and start tier for one task domain.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DomainDifficultyConfig {
    pub policy: PolicyKind,
    pub start_tier: i64,
}

impl DomainDifficultyConfig {
    fn defaults_for(domain: TaskDomain) -> Self {
        let defaults = DifficultySettings::default().for_domain(domain);
        Self {
            policy: defaults.policy,
            start_tier: i64::from(defaults.start_tier.level()),
        }
    }

    fn to_domain(self, domain: TaskDomain) -> Result<DomainDifficulty, ValidationError> {
        let start_tier = DifficultyTier::try_from(self.start_tier).map_err(|_| {
            ValidationError::InvalidStartTier {
                domain: domain.as_str(),
                tier: self.start_tier,
            }
        })?;
        Ok(DomainDifficulty {
            policy: self.policy,
            start_tier,
        })
    }
}

/// Per-domain difficulty adaptation
#[derive(Debug, Clone, Deserialize)]
pub struct DifficultyConfig {
    #[serde(default = "default_reading")]
    pub reading: DomainDifficultyConfig,

    #[serde(default = "default_number")]
    pub number: DomainDifficultyConfig,

    #[serde(default = "default_attention")]
    pub attention: DomainDifficultyConfig,

    #[serde(default = "default_writing")]
    pub writing: DomainDifficultyConfig,
}

impl DifficultyConfig {
    /// Converts to domain settings, rejecting out-of-range start tiers.
    pub fn settings(&self) -> Result<DifficultySettings, ValidationError> {
        Ok(DifficultySettings {
            reading: self.reading.to_domain(TaskDomain::Reading)?,
            number: self.number.to_domain(TaskDomain::Number)?,
            attention: self.attention.to_domain(TaskDomain::Attention)?,
            writing: self.writing.to_domain(TaskDomain::Writing)?,
        })
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.settings().map(|_| ())
    }
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Self {
            reading: default_reading(),
            number: default_number(),
            attention: default_attention(),
            writing: default_writing(),
        }
    }
}

fn default_reading() -> DomainDifficultyConfig {
    DomainDifficultyConfig::defaults_for(TaskDomain::Reading)
}

fn default_number() -> DomainDifficultyConfig {
    DomainDifficultyConfig::defaults_for(TaskDomain::Number)
}

fn default_attention() -> DomainDifficultyConfig {
    DomainDifficultyConfig::defaults_for(TaskDomain::Attention)
}

fn default_writing() -> DomainDifficultyConfig {
    DomainDifficultyConfig::defaults_for(TaskDomain::Writing)
}
