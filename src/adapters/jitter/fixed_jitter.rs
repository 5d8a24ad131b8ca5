//! Constant jitter for deterministic tests and replays.

use crate::ports::JitterSource;

/// Always returns the same unit value.
///
/// `0.0` pins every jittered quantity to the low end of its range,
/// `0.5` to the middle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedJitter(f64);

impl FixedJitter {
    /// Creates a source returning `unit`, clamped into `[0, 1)`.
    pub fn new(unit: f64) -> Self {
        let unit = if unit.is_finite() { unit } else { 0.0 };
        Self(unit.clamp(0.0, 1.0 - f64::EPSILON))
    }

    /// Pins everything to the bottom of its range.
    pub fn low() -> Self {
        Self(0.0)
    }
}

impl JitterSource for FixedJitter {
    fn next_unit(&mut self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_constant() {
        let mut jitter = FixedJitter::new(0.25);
        assert_eq!(jitter.next_unit(), 0.25);
        assert_eq!(jitter.next_unit(), 0.25);
    }

    #[test]
    fn clamps_out_of_range_values() {
        assert_eq!(FixedJitter::new(-3.0).next_unit(), 0.0);
        assert!(FixedJitter::new(2.0).next_unit() < 1.0);
        assert_eq!(FixedJitter::new(f64::NAN).next_unit(), 0.0);
    }

    #[test]
    fn spread_at_midpoint_is_zero() {
        assert_eq!(FixedJitter::new(0.5).spread(0.2), 0.0);
    }
}
