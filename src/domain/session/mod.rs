//! Session domain module.
//!
//! An `AssessmentSession` owns all per-session state and is the only way
//! events reach the emotion, difficulty and risk stores.

mod assessment;
mod errors;
mod events;

pub use assessment::{
    AssessmentSession, AttemptApplied, EmotionApplied, SessionState, SHIFTS_PER_ADHD_INCREMENT,
    SKIP_AFTER_FAILURES,
};
pub use errors::SessionError;
pub use events::{EmotionEvent, GameCompletionEvent, SessionEvent, TaskAttemptEvent};
