//! Per-attempt risk pathway.
//!
//! Each answered (or timed-out) question produces a risk delta from its
//! tier, correctness, latency and the emotion seen at that instant. The
//! delta is routed to the channel(s) the task domain maps to.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{DisorderChannel, RiskLedger};
use crate::domain::difficulty::DifficultyTier;
use crate::domain::emotion::EmotionLabel;
use crate::domain::foundation::{AttemptId, TaskDomain, Timestamp, ValidationError};

/// Latency at or above this is a timeout, whatever the answer was.
pub const TIMEOUT_SECONDS: f64 = 10.0;

/// Correct answers at or above this latency on tiers 1-2 still carry risk.
pub const SLOW_CORRECT_SECONDS: f64 = 8.0;

/// Ceiling for per-attempt ADHD growth once attention games showed strong focus.
pub const HIGH_ATTENTION_ADHD_CEILING: f64 = 20.0;

/// Flat bonus for domain-specific emotional load.
pub const EMOTIONAL_LOAD_BONUS: f64 = 1.0;

/// Share of a reading or number delta that also feeds ADHD.
pub const ADHD_SIDE_WEIGHT: f64 = 0.5;

/// Validated task attempt, ready to be applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttemptInput {
    pub domain: TaskDomain,
    pub tier: DifficultyTier,
    pub correct: bool,
    pub latency_seconds: f64,
}

impl AttemptInput {
    /// # Errors
    ///
    /// - `InvalidLatency` if latency is negative, NaN or infinite
    pub fn new(
        domain: TaskDomain,
        tier: DifficultyTier,
        correct: bool,
        latency_seconds: f64,
    ) -> Result<Self, ValidationError> {
        if !latency_seconds.is_finite() || latency_seconds < 0.0 {
            return Err(ValidationError::InvalidLatency(latency_seconds));
        }
        Ok(Self {
            domain,
            tier,
            correct,
            latency_seconds,
        })
    }

    pub fn timed_out(&self) -> bool {
        self.latency_seconds >= TIMEOUT_SECONDS
    }
}

/// Immutable log entry for one attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub id: AttemptId,
    pub domain: TaskDomain,
    pub tier: DifficultyTier,
    pub correct: bool,
    pub timed_out: bool,
    pub latency_seconds: f64,
    pub emotion: EmotionLabel,
    pub risk_delta: f64,
    pub recorded_at: Timestamp,
}

/// Success/failure counts for one domain. Timeouts count as failures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainStats {
    pub successes: u32,
    pub failures: u32,
}

impl DomainStats {
    pub fn total(&self) -> u32 {
        self.successes + self.failures
    }

    /// Failure share, `None` before the first attempt.
    pub fn failure_rate(&self) -> Option<f64> {
        match self.total() {
            0 => None,
            total => Some(f64::from(self.failures) / f64::from(total)),
        }
    }
}

/// Extra risk per concurrent emotion on a wrong answer.
pub fn emotion_modifier(emotion: EmotionLabel) -> f64 {
    match emotion {
        EmotionLabel::Sad => 0.7,
        EmotionLabel::Fearful => 0.9,
        EmotionLabel::Angry => 0.5,
        EmotionLabel::Disgusted => 0.4,
        _ => 0.3,
    }
}

/// Risk delta for one attempt.
///
/// Failing an easy question weighs most: it signals a missing basic skill.
/// Correct and fast answers contribute exactly zero.
pub fn risk_delta(input: &AttemptInput, emotion: EmotionLabel) -> f64 {
    use DifficultyTier::*;

    let latency = input.latency_seconds;
    let base = if input.timed_out() {
        match input.tier {
            Easy => 8.0,
            Medium => 5.0,
            Hard => 3.0,
        }
    } else if !input.correct {
        let modifier = emotion_modifier(emotion);
        match input.tier {
            Easy => 4.0 + modifier + if latency > SLOW_CORRECT_SECONDS { 0.6 } else { 0.2 },
            Medium if latency >= 7.0 => 3.0 + modifier + 0.4,
            Medium => 2.5 + modifier,
            Hard if latency >= 7.0 => 2.3 + modifier,
            Hard if latency >= 4.0 => 1.8 + modifier,
            Hard => 1.2 + modifier,
        }
    } else if latency >= SLOW_CORRECT_SECONDS && input.tier <= Medium {
        if emotion == EmotionLabel::Happy {
            1.0
        } else {
            1.3
        }
    } else {
        0.0
    };

    if base > 0.0 && has_emotional_load(input.domain, emotion) {
        base + EMOTIONAL_LOAD_BONUS
    } else {
        base
    }
}

/// Frustration while reading or anxiety during math.
fn has_emotional_load(domain: TaskDomain, emotion: EmotionLabel) -> bool {
    matches!(
        (domain, emotion),
        (TaskDomain::Reading, EmotionLabel::Angry) | (TaskDomain::Number, EmotionLabel::Fearful)
    )
}

/// Channels a domain's delta feeds, with their weights.
pub fn channel_weights(domain: TaskDomain) -> &'static [(DisorderChannel, f64)] {
    match domain {
        TaskDomain::Reading => &[
            (DisorderChannel::Dyslexia, 1.0),
            (DisorderChannel::Adhd, ADHD_SIDE_WEIGHT),
        ],
        TaskDomain::Number => &[
            (DisorderChannel::Dyscalculia, 1.0),
            (DisorderChannel::Adhd, ADHD_SIDE_WEIGHT),
        ],
        TaskDomain::Attention | TaskDomain::Writing => &[
            (DisorderChannel::Dysgraphia, 0.6),
            (DisorderChannel::Adhd, 0.8),
        ],
    }
}

/// Ingests attempts, keeps the append-only log and applies deltas.
#[derive(Debug, Clone, Default)]
pub struct AttemptRecorder {
    log: Vec<AttemptRecord>,
    stats: BTreeMap<TaskDomain, DomainStats>,
}

impl AttemptRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes the delta for `input`, applies it to `ledger` and appends
    /// the record to the log.
    ///
    /// With `high_attention` set, ADHD growth from this pathway stops at
    /// `HIGH_ATTENTION_ADHD_CEILING`.
    pub fn record(
        &mut self,
        input: AttemptInput,
        emotion: EmotionLabel,
        high_attention: bool,
        ledger: &mut RiskLedger,
        recorded_at: Timestamp,
    ) -> AttemptRecord {
        let delta = risk_delta(&input, emotion);

        for (channel, weight) in channel_weights(input.domain) {
            let contribution = delta * weight;
            if *channel == DisorderChannel::Adhd && high_attention {
                ledger.apply_capped(*channel, contribution, HIGH_ATTENTION_ADHD_CEILING);
            } else {
                ledger.apply(*channel, contribution);
            }
        }

        let stats = self.stats.entry(input.domain).or_default();
        if input.correct && !input.timed_out() {
            stats.successes += 1;
        } else {
            stats.failures += 1;
        }

        let record = AttemptRecord {
            id: AttemptId::new(),
            domain: input.domain,
            tier: input.tier,
            correct: input.correct,
            timed_out: input.timed_out(),
            latency_seconds: input.latency_seconds,
            emotion,
            risk_delta: delta,
            recorded_at,
        };
        self.log.push(record.clone());
        record
    }

    /// Every attempt recorded so far, oldest first.
    pub fn log(&self) -> &[AttemptRecord] {
        &self.log
    }

    pub fn last(&self) -> Option<&AttemptRecord> {
        self.log.last()
    }

    pub fn stats(&self, domain: TaskDomain) -> DomainStats {
        self.stats.get(&domain).copied().unwrap_or_default()
    }

    pub fn total_attempts(&self) -> usize {
        self.log.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::FixedJitter;
    use DifficultyTier::*;

    fn input(domain: TaskDomain, tier: DifficultyTier, correct: bool, latency: f64) -> AttemptInput {
        AttemptInput::new(domain, tier, correct, latency).unwrap()
    }

    fn ledger() -> RiskLedger {
        RiskLedger::new(&mut FixedJitter::new(0.5))
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn timeout_on_easy_reading_is_eight_whatever_the_answer() {
        for correct in [true, false] {
            let attempt = input(TaskDomain::Reading, Easy, correct, 10.0);
            assert_eq!(risk_delta(&attempt, EmotionLabel::Neutral), 8.0);
        }
    }

    #[test]
    fn timeout_weights_by_tier() {
        assert_eq!(risk_delta(&input(TaskDomain::Number, Medium, false, 12.0), EmotionLabel::Happy), 5.0);
        assert_eq!(risk_delta(&input(TaskDomain::Number, Hard, true, 30.0), EmotionLabel::Happy), 3.0);
    }

    #[test]
    fn correct_fast_hard_math_is_exactly_zero() {
        let attempt = input(TaskDomain::Number, Hard, true, 1.0);
        assert_eq!(risk_delta(&attempt, EmotionLabel::Neutral), 0.0);
        // no emotional-load bonus without an underlying signal
        assert_eq!(risk_delta(&attempt, EmotionLabel::Fearful), 0.0);
    }

    #[test]
    fn wrong_easy_answer_adds_emotion_and_latency_modifiers() {
        let fast = input(TaskDomain::Attention, Easy, false, 2.0);
        assert!(approx(risk_delta(&fast, EmotionLabel::Sad), 4.9));
        let slow = input(TaskDomain::Attention, Easy, false, 9.0);
        assert!(approx(risk_delta(&slow, EmotionLabel::Fearful), 5.5));
    }

    #[test]
    fn wrong_medium_and_hard_answers_scale_with_latency() {
        let neutral = EmotionLabel::Neutral;
        assert!(approx(risk_delta(&input(TaskDomain::Writing, Medium, false, 7.5), neutral), 3.7));
        assert!(approx(risk_delta(&input(TaskDomain::Writing, Medium, false, 3.0), neutral), 2.8));
        assert!(approx(risk_delta(&input(TaskDomain::Writing, Hard, false, 8.0), neutral), 2.6));
        assert!(approx(risk_delta(&input(TaskDomain::Writing, Hard, false, 5.0), neutral), 2.1));
        assert!(approx(risk_delta(&input(TaskDomain::Writing, Hard, false, 1.0), neutral), 1.5));
    }

    #[test]
    fn slow_correct_answer_flags_processing_speed() {
        let attempt = input(TaskDomain::Writing, Medium, true, 8.5);
        assert!(approx(risk_delta(&attempt, EmotionLabel::Neutral), 1.3));
        assert!(approx(risk_delta(&attempt, EmotionLabel::Happy), 1.0));

        let hard = input(TaskDomain::Writing, Hard, true, 8.5);
        assert_eq!(risk_delta(&hard, EmotionLabel::Neutral), 0.0);
    }

    #[test]
    fn emotional_load_adds_flat_bonus() {
        let reading = input(TaskDomain::Reading, Hard, false, 1.0);
        assert!(approx(risk_delta(&reading, EmotionLabel::Angry), 1.2 + 0.5 + 1.0));
        let number = input(TaskDomain::Number, Hard, false, 1.0);
        assert!(approx(risk_delta(&number, EmotionLabel::Fearful), 1.2 + 0.9 + 1.0));
        // anger during math is not task-specific load
        assert!(approx(risk_delta(&number, EmotionLabel::Angry), 1.7));
    }

    #[test]
    fn invalid_latency_is_rejected() {
        assert_eq!(
            AttemptInput::new(TaskDomain::Reading, Easy, true, -1.0),
            Err(ValidationError::InvalidLatency(-1.0))
        );
        assert!(AttemptInput::new(TaskDomain::Reading, Easy, true, f64::NAN).is_err());
    }

    #[test]
    fn reading_delta_feeds_dyslexia_and_adhd_side_channel() {
        let mut recorder = AttemptRecorder::new();
        let mut ledger = ledger();
        let record = recorder.record(
            input(TaskDomain::Reading, Easy, false, 2.0),
            EmotionLabel::Sad,
            false,
            &mut ledger,
            Timestamp::now(),
        );
        assert!(approx(record.risk_delta, 4.9));
        assert!(approx(ledger.value(DisorderChannel::Dyslexia), 4.9));
        assert!(approx(ledger.value(DisorderChannel::Adhd), 2.45));
        assert_eq!(ledger.value(DisorderChannel::Dyscalculia), 0.0);
    }

    #[test]
    fn attention_delta_splits_between_dysgraphia_and_adhd() {
        let mut recorder = AttemptRecorder::new();
        let mut ledger = ledger();
        recorder.record(
            input(TaskDomain::Attention, Easy, false, 10.0),
            EmotionLabel::Neutral,
            false,
            &mut ledger,
            Timestamp::now(),
        );
        assert!(approx(ledger.value(DisorderChannel::Dysgraphia), 4.8));
        assert!(approx(ledger.value(DisorderChannel::Adhd), 6.4));
    }

    #[test]
    fn high_attention_caps_adhd_at_twenty() {
        let mut recorder = AttemptRecorder::new();
        let mut ledger = ledger();
        for _ in 0..10 {
            recorder.record(
                input(TaskDomain::Attention, Easy, false, 10.0),
                EmotionLabel::Neutral,
                true,
                &mut ledger,
                Timestamp::now(),
            );
        }
        assert_eq!(ledger.value(DisorderChannel::Adhd), HIGH_ATTENTION_ADHD_CEILING);
        assert!(approx(ledger.value(DisorderChannel::Dysgraphia), 48.0));
    }

    #[test]
    fn repeated_easy_reading_failures_grow_dyslexia_strictly_below_cap() {
        let mut recorder = AttemptRecorder::new();
        let mut ledger = ledger();
        let mut previous = 0.0;
        for _ in 0..10 {
            recorder.record(
                input(TaskDomain::Reading, Easy, false, 2.0),
                EmotionLabel::Sad,
                false,
                &mut ledger,
                Timestamp::now(),
            );
            let current = ledger.value(DisorderChannel::Dyslexia);
            assert!(current > previous);
            assert!(current <= 77.0);
            previous = current;
        }
    }

    #[test]
    fn log_and_stats_track_every_attempt() {
        let mut recorder = AttemptRecorder::new();
        let mut ledger = ledger();
        let now = Timestamp::now();
        recorder.record(input(TaskDomain::Number, Easy, true, 1.0), EmotionLabel::Happy, false, &mut ledger, now);
        recorder.record(input(TaskDomain::Number, Easy, true, 11.0), EmotionLabel::Happy, false, &mut ledger, now);
        recorder.record(input(TaskDomain::Number, Easy, false, 3.0), EmotionLabel::Happy, false, &mut ledger, now);

        assert_eq!(recorder.total_attempts(), 3);
        assert!(recorder.last().map(|r| !r.correct).unwrap_or(false));
        let stats = recorder.stats(TaskDomain::Number);
        assert_eq!(stats, DomainStats { successes: 1, failures: 2 });
        assert_eq!(recorder.stats(TaskDomain::Reading).failure_rate(), None);
    }
}
