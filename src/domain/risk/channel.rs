//! Disorder channels and per-channel score sets.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// One of the tracked risk categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DisorderChannel {
    Dyslexia,
    Dyscalculia,
    Dysgraphia,
    Adhd,
    Dyspraxia,
    AuditoryProcessing,
}

impl DisorderChannel {
    /// All channels, in report order.
    pub const ALL: [DisorderChannel; 6] = [
        DisorderChannel::Dyslexia,
        DisorderChannel::Dyscalculia,
        DisorderChannel::Dysgraphia,
        DisorderChannel::Adhd,
        DisorderChannel::Dyspraxia,
        DisorderChannel::AuditoryProcessing,
    ];

    /// Hard ceiling for this channel. Never 100: this is a screening
    /// signal, not a diagnosis.
    pub fn cap(&self) -> f64 {
        match self {
            DisorderChannel::Dyslexia => 77.0,
            DisorderChannel::Dyscalculia => 78.0,
            DisorderChannel::Dysgraphia => 76.0,
            DisorderChannel::Adhd => 77.0,
            DisorderChannel::Dyspraxia => 76.0,
            DisorderChannel::AuditoryProcessing => 80.0,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DisorderChannel::Dyslexia => "Dyslexia",
            DisorderChannel::Dyscalculia => "Dyscalculia",
            DisorderChannel::Dysgraphia => "Dysgraphia",
            DisorderChannel::Adhd => "ADHD",
            DisorderChannel::Dyspraxia => "Dyspraxia",
            DisorderChannel::AuditoryProcessing => "Auditory Processing",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DisorderChannel::Dyslexia => "Reading & Language Processing",
            DisorderChannel::Dyscalculia => "Mathematical & Numerical Processing",
            DisorderChannel::Dysgraphia => "Writing & Fine Motor Skills",
            DisorderChannel::Adhd => "Attention & Focus",
            DisorderChannel::Dyspraxia => "Motor Coordination",
            DisorderChannel::AuditoryProcessing => "Sound & Language Comprehension",
        }
    }

    fn index(&self) -> usize {
        match self {
            DisorderChannel::Dyslexia => 0,
            DisorderChannel::Dyscalculia => 1,
            DisorderChannel::Dysgraphia => 2,
            DisorderChannel::Adhd => 3,
            DisorderChannel::Dyspraxia => 4,
            DisorderChannel::AuditoryProcessing => 5,
        }
    }
}

impl fmt::Display for DisorderChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One real number per channel.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChannelScores([f64; 6]);

impl ChannelScores {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn get(&self, channel: DisorderChannel) -> f64 {
        self.0[channel.index()]
    }

    pub fn set(&mut self, channel: DisorderChannel, value: f64) {
        self.0[channel.index()] = value;
    }

    /// Channels paired with their values, in report order.
    pub fn iter(&self) -> impl Iterator<Item = (DisorderChannel, f64)> + '_ {
        DisorderChannel::ALL
            .into_iter()
            .map(move |channel| (channel, self.get(channel)))
    }

    /// Largest value across all channels.
    pub fn max(&self) -> f64 {
        self.0.iter().copied().fold(0.0, f64::max)
    }

    /// Channel holding the largest value; ties resolve to report order.
    pub fn highest(&self) -> (DisorderChannel, f64) {
        self.iter()
            .fold((DisorderChannel::Dyslexia, f64::MIN), |best, candidate| {
                if candidate.1 > best.1 {
                    candidate
                } else {
                    best
                }
            })
    }
}

impl Serialize for ChannelScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}
