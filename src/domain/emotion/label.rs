//! Emotion labels reported by the external emotion feed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Closed set of facial-emotion labels the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionLabel {
    Happy,
    Neutral,
    Surprised,
    Sad,
    Fearful,
    Disgusted,
    Angry,
}

/// Fixed partition of the label set used by transition detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Valence {
    PositiveOrNeutral,
    Negative,
}

impl EmotionLabel {
    /// All labels, in declaration order.
    pub const ALL: [EmotionLabel; 7] = [
        EmotionLabel::Happy,
        EmotionLabel::Neutral,
        EmotionLabel::Surprised,
        EmotionLabel::Sad,
        EmotionLabel::Fearful,
        EmotionLabel::Disgusted,
        EmotionLabel::Angry,
    ];

    /// Returns which side of the valence partition this label sits on.
    pub fn valence(&self) -> Valence {
        match self {
            EmotionLabel::Happy | EmotionLabel::Neutral | EmotionLabel::Surprised => {
                Valence::PositiveOrNeutral
            }
            EmotionLabel::Sad
            | EmotionLabel::Fearful
            | EmotionLabel::Disgusted
            | EmotionLabel::Angry => Valence::Negative,
        }
    }

    pub fn is_negative(&self) -> bool {
        self.valence() == Valence::Negative
    }

    /// Fearful and disgusted are read as cognitive overload.
    pub fn is_confusion(&self) -> bool {
        matches!(self, EmotionLabel::Fearful | EmotionLabel::Disgusted)
    }

    /// Returns the wire name of this label.
    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionLabel::Happy => "happy",
            EmotionLabel::Neutral => "neutral",
            EmotionLabel::Surprised => "surprised",
            EmotionLabel::Sad => "sad",
            EmotionLabel::Fearful => "fearful",
            EmotionLabel::Disgusted => "disgusted",
            EmotionLabel::Angry => "angry",
        }
    }
}

impl Default for EmotionLabel {
    fn default() -> Self {
        EmotionLabel::Neutral
    }
}

impl fmt::Display for EmotionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmotionLabel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EmotionLabel::ALL
            .into_iter()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidLabel(s.to_string()))
    }
}
