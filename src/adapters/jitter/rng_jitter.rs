//! Random jitter backed by `rand`'s standard generator.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::ports::JitterSource;

/// Jitter drawn from a `StdRng`.
///
/// Use `from_seed` for reproducible sessions (replays, tests) and
/// `from_entropy` for live sessions.
#[derive(Debug, Clone)]
pub struct RngJitter {
    rng: StdRng,
}

impl RngJitter {
    /// Deterministic generator: the same seed yields the same sequence.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generator seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Seeded when `seed` is set, entropy-seeded otherwise.
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        seed.map(Self::from_seed).unwrap_or_else(Self::from_entropy)
    }
}

impl JitterSource for RngJitter {
    fn next_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}
