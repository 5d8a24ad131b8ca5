//! State machine trait for small ordered state enums.
//!
//! Difficulty tiers are the main implementor: every policy moves a tier
//! through `transition_to` so illegal jumps surface as errors instead of
//! silently landing in a wrong state.

use super::{DomainError, ErrorCode};

/// Trait for enums whose values form a state machine.
///
/// Implementors define the legal edges; `transition_to` and `is_terminal`
/// come for free.
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, DomainError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
