//! Rolling emotion history with cumulative pattern counters.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::EmotionLabel;
use crate::domain::foundation::{Timestamp, ValidationError};

/// Number of observations kept in the queryable history.
pub const HISTORY_WINDOW: usize = 20;

/// Number of most recent observations searched by `has_pattern`.
pub const PATTERN_WINDOW: usize = 10;

/// Two differing observations closer than this count as a rapid change.
pub const RAPID_CHANGE_MILLIS: i64 = 3_000;

/// A single emotion label seen at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionObservation {
    pub label: EmotionLabel,
    pub observed_at: Timestamp,
}

/// Session-wide pattern counters.
///
/// These are cumulative over the whole session and are never windowed,
/// even though the history itself is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionCounters {
    pub rapid_changes: u32,
    pub negative_transitions: u32,
    pub confusion_states: u32,
}

/// What a single `record` call detected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordOutcome {
    pub rapid_change: bool,
    pub negative_transition: bool,
    pub confusion: bool,
}

/// Bounded, time-stamped emotion history.
#[derive(Debug, Clone, Default)]
pub struct EmotionHistoryTracker {
    history: VecDeque<EmotionObservation>,
    counters: EmotionCounters,
}

impl EmotionHistoryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a label observed now.
    pub fn record(&mut self, label: EmotionLabel) -> RecordOutcome {
        self.record_at(label, Timestamp::now())
    }

    /// Parses and records a raw label string.
    ///
    /// # Errors
    ///
    /// - `InvalidLabel` if the string is not one of the known labels; the
    ///   history is left untouched.
    pub fn record_raw(&mut self, raw: &str) -> Result<RecordOutcome, ValidationError> {
        let label: EmotionLabel = raw.parse()?;
        Ok(self.record(label))
    }

    /// Records a label observed at an explicit instant.
    pub fn record_at(&mut self, label: EmotionLabel, observed_at: Timestamp) -> RecordOutcome {
        let mut outcome = RecordOutcome::default();

        if let Some(previous) = self.history.back() {
            let gap = observed_at.millis_since(&previous.observed_at);
            // Out-of-order observations never count as rapid.
            if (0..RAPID_CHANGE_MILLIS).contains(&gap) && label != previous.label {
                outcome.rapid_change = true;
                self.counters.rapid_changes += 1;
            }
        }

        // An empty history reads as neutral, so a first negative label
        // already counts as a transition.
        if !self.current().is_negative() && label.is_negative() {
            outcome.negative_transition = true;
            self.counters.negative_transitions += 1;
        }

        if label.is_confusion() {
            outcome.confusion = true;
            self.counters.confusion_states += 1;
        }

        self.history.push_back(EmotionObservation { label, observed_at });
        while self.history.len() > HISTORY_WINDOW {
            self.history.pop_front();
        }

        outcome
    }

    /// Latest observed label, neutral when nothing has been seen yet.
    pub fn current(&self) -> EmotionLabel {
        self.history
            .back()
            .map(|observation| observation.label)
            .unwrap_or_default()
    }

    /// True iff `sequence` occurs as a contiguous run within the last
    /// `PATTERN_WINDOW` observations.
    ///
    /// An empty sequence never matches.
    pub fn has_pattern(&self, sequence: &[EmotionLabel]) -> bool {
        if sequence.is_empty() {
            return false;
        }

        let skip = self.history.len().saturating_sub(PATTERN_WINDOW);
        let recent: Vec<EmotionLabel> = self
            .history
            .iter()
            .skip(skip)
            .map(|observation| observation.label)
            .collect();

        recent.windows(sequence.len()).any(|window| window == sequence)
    }

    /// Observations currently retained, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &EmotionObservation> {
        self.history.iter()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn counters(&self) -> EmotionCounters {
        self.counters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use EmotionLabel::*;

    fn t(millis: i64) -> Timestamp {
        Timestamp::from_unix_millis(1_700_000_000_000 + millis)
    }

    fn tracker_with(labels: &[EmotionLabel], spacing_ms: i64) -> EmotionHistoryTracker {
        let mut tracker = EmotionHistoryTracker::new();
        for (i, label) in labels.iter().enumerate() {
            tracker.record_at(*label, t(i as i64 * spacing_ms));
        }
        tracker
    }

    #[test]
    fn current_defaults_to_neutral() {
        assert_eq!(EmotionHistoryTracker::new().current(), Neutral);
    }

    #[test]
    fn current_returns_latest_label() {
        let tracker = tracker_with(&[Happy, Sad], 5_000);
        assert_eq!(tracker.current(), Sad);
    }

    #[test]
    fn rapid_change_requires_short_gap_and_different_label() {
        let mut tracker = EmotionHistoryTracker::new();
        assert!(!tracker.record_at(Happy, t(0)).rapid_change);
        assert!(tracker.record_at(Sad, t(2_999)).rapid_change);
        assert!(!tracker.record_at(Sad, t(3_500)).rapid_change);
        assert!(!tracker.record_at(Happy, t(6_500)).rapid_change);
        assert_eq!(tracker.counters().rapid_changes, 1);
    }

    #[test]
    fn earlier_timestamps_are_not_rapid_changes() {
        let mut tracker = EmotionHistoryTracker::new();
        tracker.record_at(Happy, t(100_000));
        assert!(!tracker.record_at(Sad, t(0)).rapid_change);
        assert!(!tracker.record_at(Happy, t(-1_000)).rapid_change);
        assert!(!tracker.record_at(Sad, t(-10_000)).rapid_change);
        assert_eq!(tracker.counters().rapid_changes, 0);
        assert_eq!(tracker.current(), Sad);
    }

    #[test]
    fn negative_transition_counts_positive_to_negative_only() {
        let tracker = tracker_with(&[Happy, Sad, Angry, Surprised, Fearful], 5_000);
        // happy->sad, surprised->fearful; sad->angry stays negative
        assert_eq!(tracker.counters().negative_transitions, 2);
    }

    #[test]
    fn first_negative_label_counts_as_transition_from_neutral() {
        let tracker = tracker_with(&[Sad], 0);
        assert_eq!(tracker.counters().negative_transitions, 1);
    }

    #[test]
    fn confusion_counts_fearful_and_disgusted() {
        let tracker = tracker_with(&[Fearful, Disgusted, Sad, Fearful], 5_000);
        assert_eq!(tracker.counters().confusion_states, 3);
    }

    #[test]
    fn history_is_truncated_but_counters_are_cumulative() {
        let mut labels = Vec::new();
        for i in 0..21 {
            labels.push(if i % 2 == 0 { Happy } else { Fearful });
        }
        let tracker = tracker_with(&labels, 1_000);

        assert_eq!(tracker.len(), HISTORY_WINDOW);
        assert_eq!(tracker.history().next().map(|o| o.observed_at), Some(t(1_000)));
        // 20 label changes, 10 happy->fearful transitions, 10 fearful labels
        assert_eq!(tracker.counters().rapid_changes, 20);
        assert_eq!(tracker.counters().negative_transitions, 10);
        assert_eq!(tracker.counters().confusion_states, 10);
    }

    #[test]
    fn has_pattern_matches_contiguous_run() {
        let tracker = tracker_with(&[Neutral, Happy, Sad, Fearful, Neutral], 5_000);
        assert!(tracker.has_pattern(&[Happy, Sad, Fearful]));
    }

    #[test]
    fn has_pattern_rejects_permutation_and_gaps() {
        let permuted = tracker_with(&[Sad, Happy, Fearful], 5_000);
        assert!(!permuted.has_pattern(&[Happy, Sad, Fearful]));

        let gapped = tracker_with(&[Happy, Sad, Neutral, Fearful], 5_000);
        assert!(!gapped.has_pattern(&[Happy, Sad, Fearful]));
    }

    #[test]
    fn has_pattern_only_searches_last_ten() {
        let mut labels = vec![Happy, Sad, Fearful];
        labels.extend(std::iter::repeat(Neutral).take(8));
        let tracker = tracker_with(&labels, 5_000);
        // the run now starts 11 observations back
        assert!(!tracker.has_pattern(&[Happy, Sad, Fearful]));

        let mut labels = vec![Happy, Sad, Fearful];
        labels.extend(std::iter::repeat(Neutral).take(7));
        let tracker = tracker_with(&labels, 5_000);
        assert!(tracker.has_pattern(&[Happy, Sad, Fearful]));
    }

    #[test]
    fn has_pattern_empty_sequence_never_matches() {
        let tracker = tracker_with(&[Happy], 0);
        assert!(!tracker.has_pattern(&[]));
    }

    #[test]
    fn record_raw_rejects_unknown_label_without_mutation() {
        let mut tracker = tracker_with(&[Happy], 0);
        let result = tracker.record_raw("bored");
        assert_eq!(result, Err(ValidationError::InvalidLabel("bored".into())));
        assert_eq!(tracker.len(), 1);
        assert_eq!(tracker.counters(), EmotionCounters::default());
    }
}
