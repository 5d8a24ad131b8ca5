//! Difficulty module - tier selection per task domain.

mod controller;
mod policy;
mod tier;

pub use controller::{DifficultyController, DifficultySettings, DomainDifficulty, TierChange};
pub use policy::{
    BatchedDifficultyPolicy, DifficultyPolicy, ImmediateDifficultyPolicy, PolicyKind,
    TierDecision, BATCH_MIN_ATTEMPTS, BATCH_PROMOTION_ATTEMPTS, BATCH_WINDOW,
};
pub use tier::DifficultyTier;
