//! Emotion source that simulates a child playing.
//!
//! Labels mostly persist and occasionally jump, with a bias towards the
//! calmer labels. Seeded for reproducible demos.

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::emotion::EmotionLabel;
use crate::ports::EmotionSource;

/// Chance that the next label differs from the current one.
const DEFAULT_CHANGE_PROBABILITY: f64 = 0.3;

const WEIGHTED_LABELS: [(EmotionLabel, u32); 7] = [
    (EmotionLabel::Neutral, 30),
    (EmotionLabel::Happy, 25),
    (EmotionLabel::Surprised, 10),
    (EmotionLabel::Sad, 10),
    (EmotionLabel::Fearful, 10),
    (EmotionLabel::Angry, 8),
    (EmotionLabel::Disgusted, 7),
];

#[derive(Debug, Clone)]
pub struct SimulatedEmotionSource {
    rng: StdRng,
    current: EmotionLabel,
    change_probability: f64,
    remaining: Option<usize>,
}

impl SimulatedEmotionSource {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            current: EmotionLabel::Neutral,
            change_probability: DEFAULT_CHANGE_PROBABILITY,
            remaining: None,
        }
    }

    /// Stops after `count` labels.
    pub fn with_limit(mut self, count: usize) -> Self {
        self.remaining = Some(count);
        self
    }

    pub fn with_change_probability(mut self, probability: f64) -> Self {
        self.change_probability = probability.clamp(0.0, 1.0);
        self
    }

    fn pick_label(&mut self) -> EmotionLabel {
        let total: u32 = WEIGHTED_LABELS.iter().map(|(_, weight)| weight).sum();
        let mut roll = self.rng.random_range(0..total);
        for (label, weight) in WEIGHTED_LABELS {
            if roll < weight {
                return label;
            }
            roll -= weight;
        }
        EmotionLabel::Neutral
    }
}

#[async_trait]
impl EmotionSource for SimulatedEmotionSource {
    async fn next(&mut self) -> Option<EmotionLabel> {
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                return None;
            }
            *remaining -= 1;
        }

        if self.rng.random::<f64>() < self.change_probability {
            self.current = self.pick_label();
        }
        Some(self.current)
    }
}
