//! Per-domain difficulty state machine.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{DifficultyPolicy, DifficultyTier, PolicyKind};
use crate::domain::foundation::{DomainError, StateMachine, TaskDomain};

/// Policy and starting tier for one task domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainDifficulty {
    pub policy: PolicyKind,
    pub start_tier: DifficultyTier,
}

/// Difficulty configuration for every task domain.
///
/// Reading and number tasks follow the batched detector behavior from
/// tier 1. Attention and writing question sets start at grade level and
/// adapt on every answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultySettings {
    pub reading: DomainDifficulty,
    pub number: DomainDifficulty,
    pub attention: DomainDifficulty,
    pub writing: DomainDifficulty,
}

impl DifficultySettings {
    pub fn for_domain(&self, domain: TaskDomain) -> DomainDifficulty {
        match domain {
            TaskDomain::Reading => self.reading,
            TaskDomain::Number => self.number,
            TaskDomain::Attention => self.attention,
            TaskDomain::Writing => self.writing,
        }
    }
}

impl Default for DifficultySettings {
    fn default() -> Self {
        let batched = DomainDifficulty {
            policy: PolicyKind::Batched,
            start_tier: DifficultyTier::Easy,
        };
        let immediate = DomainDifficulty {
            policy: PolicyKind::Immediate,
            start_tier: DifficultyTier::Hard,
        };
        Self {
            reading: batched,
            number: batched,
            attention: immediate,
            writing: immediate,
        }
    }
}

/// Result of observing one answer in a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierChange {
    pub previous: DifficultyTier,
    pub current: DifficultyTier,
    pub critical_failure: bool,
}

impl TierChange {
    pub fn moved(&self) -> bool {
        self.previous != self.current
    }
}

#[derive(Debug)]
struct DomainTrack {
    tier: DifficultyTier,
    policy: Box<dyn DifficultyPolicy>,
    critical_failures: u32,
}

/// Holds one independent tier per task domain.
#[derive(Debug)]
pub struct DifficultyController {
    tracks: BTreeMap<TaskDomain, DomainTrack>,
}

impl DifficultyController {
    pub fn new(settings: DifficultySettings) -> Self {
        let tracks = TaskDomain::ALL
            .into_iter()
            .map(|domain| {
                let config = settings.for_domain(domain);
                let track = DomainTrack {
                    tier: config.start_tier,
                    policy: config.policy.build(),
                    critical_failures: 0,
                };
                (domain, track)
            })
            .collect();
        Self { tracks }
    }

    /// Tier the next question in `domain` should be built at.
    pub fn next_tier(&self, domain: TaskDomain) -> DifficultyTier {
        self.tracks
            .get(&domain)
            .map(|track| track.tier)
            .unwrap_or(DifficultyTier::MIN)
    }

    /// Policy driving `domain`.
    pub fn policy_kind(&self, domain: TaskDomain) -> Option<PolicyKind> {
        self.tracks.get(&domain).map(|track| track.policy.kind())
    }

    /// Number of easiest-tier failures flagged in `domain`.
    pub fn critical_failures(&self, domain: TaskDomain) -> u32 {
        self.tracks
            .get(&domain)
            .map(|track| track.critical_failures)
            .unwrap_or(0)
    }

    /// Feeds one answered question to the domain's policy.
    ///
    /// The policy reacts to `answered`, the tier the question was actually
    /// built at, which may differ from the stored tier when callers build
    /// questions without asking `next_tier` first.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if a policy proposes a jump of more than
    ///   one tier.
    pub fn observe(
        &mut self,
        domain: TaskDomain,
        answered: DifficultyTier,
        correct: bool,
    ) -> Result<TierChange, DomainError> {
        let track = self.tracks.entry(domain).or_insert_with(|| DomainTrack {
            tier: DifficultyTier::MIN,
            policy: PolicyKind::Batched.build(),
            critical_failures: 0,
        });

        let previous = track.tier;
        let decision = track.policy.observe(answered, correct);

        track.tier = if decision.next != answered {
            answered.transition_to(decision.next)?
        } else {
            answered
        };
        if decision.critical_failure {
            track.critical_failures += 1;
        }

        Ok(TierChange {
            previous,
            current: track.tier,
            critical_failure: decision.critical_failure,
        })
    }
}

impl Default for DifficultyController {
    fn default() -> Self {
        Self::new(DifficultySettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_start_tiers_follow_settings() {
        let controller = DifficultyController::default();
        assert_eq!(controller.next_tier(TaskDomain::Reading), DifficultyTier::Easy);
        assert_eq!(controller.next_tier(TaskDomain::Number), DifficultyTier::Easy);
        assert_eq!(controller.next_tier(TaskDomain::Attention), DifficultyTier::Hard);
        assert_eq!(controller.policy_kind(TaskDomain::Writing), Some(PolicyKind::Immediate));
    }

    #[test]
    fn domains_move_independently() {
        let mut controller = DifficultyController::default();
        for _ in 0..5 {
            controller.observe(TaskDomain::Reading, DifficultyTier::Easy, true).unwrap();
        }
        assert_eq!(controller.next_tier(TaskDomain::Reading), DifficultyTier::Medium);
        assert_eq!(controller.next_tier(TaskDomain::Number), DifficultyTier::Easy);
    }

    #[test]
    fn immediate_domain_drops_to_easy_and_flags_critical_failures() {
        let mut controller = DifficultyController::default();
        let first = controller.observe(TaskDomain::Attention, DifficultyTier::Hard, false).unwrap();
        assert_eq!(first.current, DifficultyTier::Medium);
        assert!(first.moved());

        controller.observe(TaskDomain::Attention, DifficultyTier::Medium, false).unwrap();
        let critical = controller.observe(TaskDomain::Attention, DifficultyTier::Easy, false).unwrap();
        assert!(critical.critical_failure);
        assert!(!critical.moved());
        assert_eq!(controller.critical_failures(TaskDomain::Attention), 1);
    }

    #[test]
    fn custom_settings_are_honored() {
        let settings = DifficultySettings {
            reading: DomainDifficulty {
                policy: PolicyKind::Immediate,
                start_tier: DifficultyTier::Medium,
            },
            ..DifficultySettings::default()
        };
        let mut controller = DifficultyController::new(settings);
        assert_eq!(controller.next_tier(TaskDomain::Reading), DifficultyTier::Medium);
        let change = controller.observe(TaskDomain::Reading, DifficultyTier::Medium, true).unwrap();
        assert_eq!(change.current, DifficultyTier::Hard);
    }

    #[test]
    fn easy_failure_is_critical_even_when_stored_tier_is_hard() {
        let mut controller = DifficultyController::default();
        assert_eq!(controller.next_tier(TaskDomain::Attention), DifficultyTier::Hard);

        let change = controller
            .observe(TaskDomain::Attention, DifficultyTier::Easy, false)
            .unwrap();

        assert!(change.critical_failure);
        assert_eq!(change.previous, DifficultyTier::Hard);
        assert_eq!(change.current, DifficultyTier::Easy);
        assert_eq!(controller.critical_failures(TaskDomain::Attention), 1);
    }

    #[test]
    fn hard_failure_is_not_critical_even_when_stored_tier_is_easy() {
        let mut controller = DifficultyController::default();
        controller.observe(TaskDomain::Attention, DifficultyTier::Medium, false).unwrap();
        assert_eq!(controller.next_tier(TaskDomain::Attention), DifficultyTier::Easy);

        let change = controller
            .observe(TaskDomain::Attention, DifficultyTier::Hard, false)
            .unwrap();

        assert!(!change.critical_failure);
        assert_eq!(change.current, DifficultyTier::Medium);
        assert_eq!(controller.critical_failures(TaskDomain::Attention), 0);
    }
}
