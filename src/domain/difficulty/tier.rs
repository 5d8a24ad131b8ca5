//! Difficulty tier value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{StateMachine, ValidationError};

/// Ordered difficulty tier, 1 (easiest) to 3 (grade level).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum DifficultyTier {
    Easy,
    Medium,
    Hard,
}

impl DifficultyTier {
    pub const MIN: Self = DifficultyTier::Easy;
    pub const MAX: Self = DifficultyTier::Hard;

    /// Numeric level, 1..=3.
    pub fn level(&self) -> u8 {
        match self {
            DifficultyTier::Easy => 1,
            DifficultyTier::Medium => 2,
            DifficultyTier::Hard => 3,
        }
    }

    /// One step harder, or `None` at the ceiling.
    pub fn harder(&self) -> Option<Self> {
        match self {
            DifficultyTier::Easy => Some(DifficultyTier::Medium),
            DifficultyTier::Medium => Some(DifficultyTier::Hard),
            DifficultyTier::Hard => None,
        }
    }

    /// One step easier, or `None` at the floor.
    pub fn easier(&self) -> Option<Self> {
        match self {
            DifficultyTier::Easy => None,
            DifficultyTier::Medium => Some(DifficultyTier::Easy),
            DifficultyTier::Hard => Some(DifficultyTier::Medium),
        }
    }
}

impl TryFrom<i64> for DifficultyTier {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(DifficultyTier::Easy),
            2 => Ok(DifficultyTier::Medium),
            3 => Ok(DifficultyTier::Hard),
            other => Err(ValidationError::InvalidDifficultyTier(other)),
        }
    }
}

impl From<DifficultyTier> for i64 {
    fn from(tier: DifficultyTier) -> Self {
        i64::from(tier.level())
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Level {}", self.level())
    }
}

impl StateMachine for DifficultyTier {
    /// Tiers only ever move one step at a time.
    fn can_transition_to(&self, target: &Self) -> bool {
        self.harder().as_ref() == Some(target) || self.easier().as_ref() == Some(target)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        self.easier().into_iter().chain(self.harder()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_from_accepts_one_to_three() {
        assert_eq!(DifficultyTier::try_from(1), Ok(DifficultyTier::Easy));
        assert_eq!(DifficultyTier::try_from(2), Ok(DifficultyTier::Medium));
        assert_eq!(DifficultyTier::try_from(3), Ok(DifficultyTier::Hard));
    }

    #[test]
    fn try_from_rejects_out_of_range() {
        assert_eq!(
            DifficultyTier::try_from(0),
            Err(ValidationError::InvalidDifficultyTier(0))
        );
        assert_eq!(
            DifficultyTier::try_from(4),
            Err(ValidationError::InvalidDifficultyTier(4))
        );
    }

    #[test]
    fn tiers_are_ordered() {
        assert!(DifficultyTier::Easy < DifficultyTier::Medium);
        assert!(DifficultyTier::Medium < DifficultyTier::Hard);
    }

    #[test]
    fn transitions_are_single_steps() {
        assert!(DifficultyTier::Easy.transition_to(DifficultyTier::Medium).is_ok());
        assert!(DifficultyTier::Hard.transition_to(DifficultyTier::Medium).is_ok());
        assert!(DifficultyTier::Easy.transition_to(DifficultyTier::Hard).is_err());
        assert!(DifficultyTier::Medium.transition_to(DifficultyTier::Medium).is_err());
    }

    #[test]
    fn no_tier_is_terminal() {
        assert_eq!(
            DifficultyTier::Medium.valid_transitions(),
            vec![DifficultyTier::Easy, DifficultyTier::Hard]
        );
        assert!(!DifficultyTier::Easy.is_terminal());
        assert!(!DifficultyTier::Hard.is_terminal());
    }

    #[test]
    fn serializes_as_number() {
        assert_eq!(serde_json::to_string(&DifficultyTier::Hard).unwrap(), "3");
        let tier: DifficultyTier = serde_json::from_str("2").unwrap();
        assert_eq!(tier, DifficultyTier::Medium);
        assert!(serde_json::from_str::<DifficultyTier>("5").is_err());
    }
}
