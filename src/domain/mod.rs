//! Domain layer containing the assessment engine.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (IDs, timestamps, task domains, errors)
//! - `emotion` - Emotion labels and the rolling history
//! - `difficulty` - Per-domain difficulty tiers and adaptation policies
//! - `risk` - Risk channels, the ledger and the two update pathways
//! - `report` - Read-only report snapshot
//! - `session` - The per-session aggregate and inbound events

pub mod difficulty;
pub mod emotion;
pub mod foundation;
pub mod report;
pub mod risk;
pub mod session;
