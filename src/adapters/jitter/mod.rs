//! Jitter source adapters.

mod fixed_jitter;
mod rng_jitter;

pub use fixed_jitter::FixedJitter;
pub use rng_jitter::RngJitter;
