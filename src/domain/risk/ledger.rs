//! Risk ledger: clamped per-channel accumulators and the read-time
//! comorbidity view.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ChannelScores, DisorderChannel};
use crate::ports::JitterSource;

/// Lower bound of the Medium band.
pub const MEDIUM_THRESHOLD: f64 = 25.0;

/// Lower bound of the High band.
pub const HIGH_THRESHOLD: f64 = 50.0;

/// A channel strictly above this value triggers the comorbidity discount.
pub const COMORBIDITY_TRIGGER: f64 = 50.0;

/// Flat discount applied to the other channels.
pub const COMORBIDITY_DISCOUNT: f64 = 5.0;

/// Half-width of the jitter around the discount.
pub const COMORBIDITY_JITTER: f64 = 0.2;

/// Severity band derived from a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SeverityBand {
    Low,
    Medium,
    High,
}

impl SeverityBand {
    /// Bands at 25 and 50: `< 25` Low, `< 50` Medium, otherwise High.
    pub fn from_score(score: f64) -> Self {
        if score < MEDIUM_THRESHOLD {
            SeverityBand::Low
        } else if score < HIGH_THRESHOLD {
            SeverityBand::Medium
        } else {
            SeverityBand::High
        }
    }
}

impl fmt::Display for SeverityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeverityBand::Low => write!(f, "Low"),
            SeverityBand::Medium => write!(f, "Medium"),
            SeverityBand::High => write!(f, "High"),
        }
    }
}

/// Applies the comorbidity discount to a snapshot.
///
/// When any channel is above `COMORBIDITY_TRIGGER`, every channel at or
/// below it loses its discount (floored at 0). Channels above the trigger
/// are left alone. The input is never modified.
pub fn comorbidity_adjusted(raw: &ChannelScores, discounts: &ChannelScores) -> ChannelScores {
    let triggered = raw.iter().any(|(_, value)| value > COMORBIDITY_TRIGGER);
    if !triggered {
        return *raw;
    }

    let mut adjusted = *raw;
    for (channel, value) in raw.iter() {
        if value <= COMORBIDITY_TRIGGER {
            adjusted.set(channel, (value - discounts.get(channel)).max(0.0));
        }
    }
    adjusted
}

/// Owns the raw per-channel accumulators.
///
/// Every write clamps to `[0, cap]`. The comorbidity discount is only ever
/// computed on a copy, so raw values are what gets stored.
#[derive(Debug, Clone)]
pub struct RiskLedger {
    raw: ChannelScores,
    comorbidity_discounts: ChannelScores,
}

impl RiskLedger {
    /// Creates an empty ledger. The per-channel comorbidity discounts are
    /// drawn once here so repeated reads of the same state agree.
    pub fn new(jitter: &mut dyn JitterSource) -> Self {
        let mut discounts = ChannelScores::zero();
        for channel in DisorderChannel::ALL {
            discounts.set(
                channel,
                COMORBIDITY_DISCOUNT + jitter.spread(COMORBIDITY_JITTER),
            );
        }
        Self {
            raw: ChannelScores::zero(),
            comorbidity_discounts: discounts,
        }
    }

    pub fn value(&self, channel: DisorderChannel) -> f64 {
        self.raw.get(channel)
    }

    /// Raw accumulators, without the comorbidity discount.
    pub fn raw(&self) -> &ChannelScores {
        &self.raw
    }

    /// Adds `delta` (which may be negative) and clamps to `[0, cap]`.
    ///
    /// Returns the new value.
    pub fn apply(&mut self, channel: DisorderChannel, delta: f64) -> f64 {
        self.apply_capped(channel, delta, channel.cap())
    }

    /// Like `apply`, but increases stop at `ceiling` (itself bounded by the
    /// channel cap). A value already at or above `ceiling` is not raised
    /// further and is not pulled down either.
    pub fn apply_capped(&mut self, channel: DisorderChannel, delta: f64, ceiling: f64) -> f64 {
        let current = self.raw.get(channel);
        let ceiling = ceiling.min(channel.cap());

        let next = if delta >= 0.0 {
            if current >= ceiling {
                current
            } else {
                (current + delta).min(ceiling)
            }
        } else {
            (current + delta).max(0.0)
        };

        let next = next.clamp(0.0, channel.cap());
        self.raw.set(channel, next);
        next
    }

    /// Overwrites a channel with a clamped value.
    pub fn set(&mut self, channel: DisorderChannel, value: f64) -> f64 {
        let value = value.clamp(0.0, channel.cap());
        self.raw.set(channel, value);
        value
    }

    /// Comorbidity-adjusted view of the current state.
    pub fn adjusted(&self) -> ChannelScores {
        comorbidity_adjusted(&self.raw, &self.comorbidity_discounts)
    }

    /// Band of the highest adjusted channel.
    pub fn overall_band(&self) -> SeverityBand {
        SeverityBand::from_score(self.adjusted().max())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::FixedJitter;
    use proptest::prelude::*;

    fn ledger() -> RiskLedger {
        // 0.5 sits in the middle of the jitter range: discount is exactly 5.0
        RiskLedger::new(&mut FixedJitter::new(0.5))
    }

    #[test]
    fn band_thresholds_are_25_and_50() {
        assert_eq!(SeverityBand::from_score(0.0), SeverityBand::Low);
        assert_eq!(SeverityBand::from_score(24.9), SeverityBand::Low);
        assert_eq!(SeverityBand::from_score(25.0), SeverityBand::Medium);
        assert_eq!(SeverityBand::from_score(49.9), SeverityBand::Medium);
        assert_eq!(SeverityBand::from_score(50.0), SeverityBand::High);
    }

    #[test]
    fn apply_clamps_to_channel_cap() {
        let mut ledger = ledger();
        assert_eq!(ledger.apply(DisorderChannel::Dyslexia, 200.0), 77.0);
        assert_eq!(ledger.apply(DisorderChannel::Dyscalculia, 200.0), 78.0);
    }

    #[test]
    fn apply_floors_at_zero() {
        let mut ledger = ledger();
        ledger.apply(DisorderChannel::Adhd, 3.0);
        assert_eq!(ledger.apply(DisorderChannel::Adhd, -10.0), 0.0);
    }

    #[test]
    fn apply_capped_stops_at_lower_ceiling() {
        let mut ledger = ledger();
        assert_eq!(ledger.apply_capped(DisorderChannel::Adhd, 15.0, 20.0), 15.0);
        assert_eq!(ledger.apply_capped(DisorderChannel::Adhd, 15.0, 20.0), 20.0);
    }

    #[test]
    fn apply_capped_never_pulls_value_down() {
        let mut ledger = ledger();
        ledger.set(DisorderChannel::Adhd, 40.0);
        assert_eq!(ledger.apply_capped(DisorderChannel::Adhd, 2.0, 20.0), 40.0);
    }

    #[test]
    fn comorbidity_discounts_only_lower_channels() {
        let mut ledger = ledger();
        ledger.set(DisorderChannel::Dyslexia, 60.0);
        ledger.set(DisorderChannel::Dyscalculia, 30.0);
        ledger.set(DisorderChannel::Adhd, 3.0);

        let adjusted = ledger.adjusted();
        assert_eq!(adjusted.get(DisorderChannel::Dyslexia), 60.0);
        assert!((adjusted.get(DisorderChannel::Dyscalculia) - 25.0).abs() < 1e-9);
        assert_eq!(adjusted.get(DisorderChannel::Adhd), 0.0);
    }

    #[test]
    fn comorbidity_needs_channel_strictly_above_fifty() {
        let mut ledger = ledger();
        ledger.set(DisorderChannel::Dyslexia, 50.0);
        ledger.set(DisorderChannel::Dyscalculia, 30.0);
        assert_eq!(ledger.adjusted(), *ledger.raw());
    }

    #[test]
    fn comorbidity_is_read_only_and_repeatable() {
        let mut ledger = ledger();
        ledger.set(DisorderChannel::Dysgraphia, 70.0);
        ledger.set(DisorderChannel::Dyspraxia, 12.0);
        let raw_before = *ledger.raw();

        let first = ledger.adjusted();
        let second = ledger.adjusted();

        assert_eq!(first, second);
        assert_eq!(*ledger.raw(), raw_before);
    }

    #[test]
    fn overall_band_uses_adjusted_values() {
        let mut ledger = ledger();
        ledger.set(DisorderChannel::Dyslexia, 27.0);
        assert_eq!(ledger.overall_band(), SeverityBand::Medium);
        ledger.set(DisorderChannel::Adhd, 55.0);
        assert_eq!(ledger.overall_band(), SeverityBand::High);
    }

    fn channel_strategy() -> impl Strategy<Value = DisorderChannel> {
        prop::sample::select(DisorderChannel::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn every_update_stays_within_bounds(
            updates in prop::collection::vec((channel_strategy(), -40.0f64..40.0, 0.0f64..100.0), 1..200)
        ) {
            let mut ledger = ledger();
            for (channel, delta, ceiling) in updates {
                let value = if ceiling < 50.0 {
                    ledger.apply_capped(channel, delta, ceiling)
                } else {
                    ledger.apply(channel, delta)
                };
                prop_assert!(value >= 0.0);
                prop_assert!(value <= channel.cap());
                for (other, raw) in ledger.raw().iter() {
                    prop_assert!(raw >= 0.0 && raw <= other.cap());
                }
            }
        }
    }
}
