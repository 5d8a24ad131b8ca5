//! Emotion source port.
//!
//! The emotion feed (webcam classifier, game simulation, test script) is
//! an external collaborator. The engine only pulls labels from it.

use async_trait::async_trait;

use crate::domain::emotion::EmotionLabel;

/// Produces emotion labels one at a time.
#[async_trait]
pub trait EmotionSource: Send + Sync {
    /// Next label, or `None` once the feed is exhausted.
    async fn next(&mut self) -> Option<EmotionLabel>;
}
