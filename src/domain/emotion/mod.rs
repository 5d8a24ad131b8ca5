//! Emotion module - labels from the external emotion feed and the rolling
//! history the risk engine consults.

mod history;
mod label;

pub use history::{
    EmotionCounters, EmotionHistoryTracker, EmotionObservation, RecordOutcome, HISTORY_WINDOW,
    PATTERN_WINDOW, RAPID_CHANGE_MILLIS,
};
pub use label::{EmotionLabel, Valence};
