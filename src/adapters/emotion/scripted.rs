//! Emotion source that replays a fixed list.

use async_trait::async_trait;
use std::collections::VecDeque;

use crate::domain::emotion::EmotionLabel;
use crate::domain::foundation::ValidationError;
use crate::ports::EmotionSource;

#[derive(Debug, Clone, Default)]
pub struct ScriptedEmotionSource {
    remaining: VecDeque<EmotionLabel>,
}

impl ScriptedEmotionSource {
    pub fn new(labels: impl IntoIterator<Item = EmotionLabel>) -> Self {
        Self {
            remaining: labels.into_iter().collect(),
        }
    }

    /// Parses raw labels up front; one bad label rejects the whole script.
    pub fn parse<S: AsRef<str>>(raw: &[S]) -> Result<Self, ValidationError> {
        let labels = raw
            .iter()
            .map(|label| label.as_ref().parse())
            .collect::<Result<Vec<EmotionLabel>, _>>()?;
        Ok(Self::new(labels))
    }

    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }
}

#[async_trait]
impl EmotionSource for ScriptedEmotionSource {
    async fn next(&mut self) -> Option<EmotionLabel> {
        self.remaining.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replays_in_order_then_ends() {
        let mut source = ScriptedEmotionSource::new([EmotionLabel::Happy, EmotionLabel::Sad]);
        assert_eq!(source.next().await, Some(EmotionLabel::Happy));
        assert_eq!(source.next().await, Some(EmotionLabel::Sad));
        assert_eq!(source.next().await, None);
    }

    #[test]
    fn parse_rejects_unknown_label() {
        let err = ScriptedEmotionSource::parse(&["happy", "bored"]).unwrap_err();
        assert_eq!(err, ValidationError::InvalidLabel("bored".into()));
    }

    #[test]
    fn parse_accepts_known_labels() {
        let source = ScriptedEmotionSource::parse(&["neutral", "surprised"]).unwrap();
        assert_eq!(source.remaining(), 2);
    }
}
