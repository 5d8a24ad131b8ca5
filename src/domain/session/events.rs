//! Inbound event payloads.
//!
//! These mirror what collaborators send: loosely typed strings and
//! integers. Each one validates into typed domain input before any state
//! is touched.

use serde::{Deserialize, Serialize};

use crate::domain::difficulty::DifficultyTier;
use crate::domain::emotion::EmotionLabel;
use crate::domain::foundation::{TaskDomain, Timestamp, ValidationError};
use crate::domain::risk::{AttemptInput, GameId, GameOutcome, QuestionnaireAnalysis};

/// One answered (or timed-out) question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskAttemptEvent {
    pub domain: String,
    pub difficulty_tier: i64,
    pub correct: bool,
    pub latency_seconds: f64,
}

impl TaskAttemptEvent {
    /// # Errors
    ///
    /// - `UnknownDomain`, `InvalidDifficultyTier` or `InvalidLatency`
    pub fn validate(&self) -> Result<AttemptInput, ValidationError> {
        let domain: TaskDomain = self.domain.parse()?;
        let tier = DifficultyTier::try_from(self.difficulty_tier)?;
        AttemptInput::new(domain, tier, self.correct, self.latency_seconds)
    }
}

/// One finished mini-game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameCompletionEvent {
    pub game_id: String,
    pub score: i64,
    pub grade: String,
    #[serde(default)]
    pub correct: i64,
    #[serde(default)]
    pub incorrect: i64,
}

impl GameCompletionEvent {
    /// # Errors
    ///
    /// - `UnknownGame`, `InvalidGrade`, or `OutOfRange` for negative counts
    pub fn validate(&self) -> Result<(GameId, GameOutcome), ValidationError> {
        let game: GameId = self.game_id.parse()?;
        let outcome = GameOutcome {
            score: non_negative("score", self.score)?,
            grade: self.grade.parse()?,
            correct: non_negative("correct", self.correct)?,
            incorrect: non_negative("incorrect", self.incorrect)?,
        };
        Ok((game, outcome))
    }
}

fn non_negative(field: &str, value: i64) -> Result<u32, ValidationError> {
    u32::try_from(value)
        .map_err(|_| ValidationError::out_of_range(field, 0, i64::from(u32::MAX), value))
}

/// One label from the emotion feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionEvent {
    pub label: String,
    /// Observation time; the session clock is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_at_millis: Option<i64>,
}

impl EmotionEvent {
    /// # Errors
    ///
    /// - `InvalidLabel` for anything outside the seven known labels
    pub fn validate(&self) -> Result<(EmotionLabel, Option<Timestamp>), ValidationError> {
        let label: EmotionLabel = self.label.parse()?;
        Ok((label, self.observed_at_millis.map(Timestamp::from_unix_millis)))
    }
}

/// Everything a session can be fed, as one tagged stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SessionEvent {
    Questionnaire(QuestionnaireAnalysis),
    Emotion(EmotionEvent),
    BeginQuestion { domain: String },
    Attempt(TaskAttemptEvent),
    GameCompletion(GameCompletionEvent),
}
