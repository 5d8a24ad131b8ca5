//! Jitter source port.
//!
//! Risk formulas add small random offsets so displayed scores do not look
//! quantized. The offsets are presentational only, so the randomness is
//! injected: production wires an entropy-seeded generator, tests wire a
//! seeded or constant one and can assert exact values.

/// Source of uniformly distributed values in `[0, 1)`.
pub trait JitterSource: Send + Sync {
    /// Returns the next value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Returns a value in `[low, high)`.
    fn between(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_unit()
    }

    /// Returns a value in `[-half_width, half_width)`.
    fn spread(&mut self, half_width: f64) -> f64 {
        self.between(-half_width, half_width)
    }
}
