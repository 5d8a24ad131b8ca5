//! Difficulty policies: how a tier reacts to answered questions.
//!
//! Two strategies coexist because different task generators expect
//! different behavior:
//!
//! - `BatchedDifficultyPolicy` looks at the success rate over a window of
//!   at least three attempts before moving.
//! - `ImmediateDifficultyPolicy` reacts to every single answer.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::DifficultyTier;

/// Minimum attempts in the window before the batched policy moves at all.
pub const BATCH_MIN_ATTEMPTS: usize = 3;

/// Attempts required before the batched policy may promote.
pub const BATCH_PROMOTION_ATTEMPTS: usize = 5;

/// Longest window the batched policy remembers.
pub const BATCH_WINDOW: usize = 10;

pub const DEMOTION_SUCCESS_RATE: f64 = 0.4;
pub const PROMOTION_SUCCESS_RATE: f64 = 0.8;

/// Selects which policy drives a task domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    Batched,
    Immediate,
}

impl PolicyKind {
    /// Builds a fresh policy instance of this kind.
    pub fn build(&self) -> Box<dyn DifficultyPolicy> {
        match self {
            PolicyKind::Batched => Box::new(BatchedDifficultyPolicy::new()),
            PolicyKind::Immediate => Box::new(ImmediateDifficultyPolicy),
        }
    }
}

/// Outcome of feeding one answer to a policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierDecision {
    pub next: DifficultyTier,
    /// Set when an easiest-tier question was failed.
    pub critical_failure: bool,
}

impl TierDecision {
    fn to(tier: DifficultyTier) -> Self {
        Self {
            next: tier,
            critical_failure: false,
        }
    }
}

/// Strategy seam for tier selection.
pub trait DifficultyPolicy: Send + Sync + std::fmt::Debug {
    /// Feeds one answered question at `current` and returns the tier to use next.
    fn observe(&mut self, current: DifficultyTier, correct: bool) -> TierDecision;

    fn kind(&self) -> PolicyKind;
}

/// Moves one step after a window of attempts: down below 40% success,
/// up above 80% once five attempts are in. The window restarts after
/// every move so the new tier collects its own evidence.
#[derive(Debug, Clone, Default)]
pub struct BatchedDifficultyPolicy {
    window: VecDeque<bool>,
}

impl BatchedDifficultyPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Success rate over the current window, `None` when empty.
    pub fn success_rate(&self) -> Option<f64> {
        if self.window.is_empty() {
            return None;
        }
        let successes = self.window.iter().filter(|correct| **correct).count();
        Some(successes as f64 / self.window.len() as f64)
    }

    pub fn window_len(&self) -> usize {
        self.window.len()
    }
}

impl DifficultyPolicy for BatchedDifficultyPolicy {
    fn observe(&mut self, current: DifficultyTier, correct: bool) -> TierDecision {
        self.window.push_back(correct);
        if self.window.len() > BATCH_WINDOW {
            self.window.pop_front();
        }

        if self.window.len() < BATCH_MIN_ATTEMPTS {
            return TierDecision::to(current);
        }

        let rate = self.success_rate().unwrap_or(0.0);
        let next = if rate < DEMOTION_SUCCESS_RATE {
            current.easier()
        } else if rate > PROMOTION_SUCCESS_RATE && self.window.len() >= BATCH_PROMOTION_ATTEMPTS {
            current.harder()
        } else {
            None
        };

        match next {
            Some(tier) => {
                self.window.clear();
                TierDecision::to(tier)
            }
            None => TierDecision::to(current),
        }
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::Batched
    }
}

/// Reacts to every answer. A failure at the easiest tier cannot go lower
/// and is reported as a critical failure instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateDifficultyPolicy;

impl DifficultyPolicy for ImmediateDifficultyPolicy {
    fn observe(&mut self, current: DifficultyTier, correct: bool) -> TierDecision {
        use DifficultyTier::*;

        match (current, correct) {
            (Hard, true) => TierDecision::to(Hard),
            (Hard, false) => TierDecision::to(Medium),
            (Medium, true) => TierDecision::to(Hard),
            (Medium, false) => TierDecision::to(Easy),
            (Easy, true) => TierDecision::to(Medium),
            (Easy, false) => TierDecision {
                next: Easy,
                critical_failure: true,
            },
        }
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::Immediate
    }
}
