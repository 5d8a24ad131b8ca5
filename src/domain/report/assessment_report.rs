//! Assessment report snapshot.

use serde::Serialize;
use std::collections::BTreeMap;

use super::channel_indicators;
use crate::domain::difficulty::DifficultyController;
use crate::domain::emotion::{EmotionCounters, EmotionHistoryTracker};
use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::risk::{AttemptRecorder, DisorderChannel, GameId, RiskLedger, SeverityBand};

/// Appended to every report.
pub const DISCLAIMER: &str = "This assessment is a screening tool for educational purposes only \
and does not constitute a medical or clinical diagnosis. Please consult qualified professionals \
such as educational psychologists, pediatricians or learning specialists.";

/// Borrowed view of the session state a report is built from.
pub struct ReportContext<'a> {
    pub session_id: SessionId,
    pub ledger: &'a RiskLedger,
    pub emotions: &'a EmotionHistoryTracker,
    pub attempts: &'a AttemptRecorder,
    pub difficulty: &'a DifficultyController,
    pub game_scores: &'a BTreeMap<GameId, u32>,
    pub questionnaire_flags: &'a [DisorderChannel],
    pub adhd_shift_count: u32,
    pub high_attention: bool,
}

/// One channel in the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelReport {
    pub name: String,
    pub description: String,
    /// Comorbidity-adjusted score, one decimal.
    pub score: f64,
    /// Accumulated score before the comorbidity discount, one decimal.
    pub raw_score: f64,
    pub band: SeverityBand,
    pub indicators: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_attempts: usize,
    pub games_completed: usize,
    #[serde(flatten)]
    pub emotions: EmotionCounters,
    pub adhd_shift_count: u32,
    pub high_attention: bool,
}

/// Read-only snapshot handed to results and export consumers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentReport {
    pub session_id: SessionId,
    pub generated_at: Timestamp,
    pub channels: BTreeMap<DisorderChannel, ChannelReport>,
    pub overall_band: SeverityBand,
    pub highest_channel: DisorderChannel,
    pub recommendation: String,
    pub disclaimer: String,
    pub summary: ReportSummary,
}

impl AssessmentReport {
    /// Projects the session state. Reads only, so two reports built from
    /// the same state carry the same scores.
    pub fn build(ctx: &ReportContext<'_>, generated_at: Timestamp) -> Self {
        let adjusted = ctx.ledger.adjusted();

        let channels: BTreeMap<DisorderChannel, ChannelReport> = DisorderChannel::ALL
            .into_iter()
            .map(|channel| {
                let score = round_tenth(adjusted.get(channel));
                let report = ChannelReport {
                    name: channel.display_name().to_string(),
                    description: channel.description().to_string(),
                    score,
                    raw_score: round_tenth(ctx.ledger.value(channel)),
                    band: SeverityBand::from_score(adjusted.get(channel)),
                    indicators: channel_indicators(channel, ctx),
                };
                (channel, report)
            })
            .collect();

        let (highest_channel, _) = adjusted.highest();
        let overall_band = ctx.ledger.overall_band();
        let any_indicator = channels.values().any(|c| !c.indicators.is_empty());

        Self {
            session_id: ctx.session_id,
            generated_at,
            channels,
            overall_band,
            highest_channel,
            recommendation: recommendation(overall_band, any_indicator).to_string(),
            disclaimer: DISCLAIMER.to_string(),
            summary: ReportSummary {
                total_attempts: ctx.attempts.total_attempts(),
                games_completed: ctx.game_scores.len(),
                emotions: ctx.emotions.counters(),
                adhd_shift_count: ctx.adhd_shift_count,
                high_attention: ctx.high_attention,
            },
        }
    }

    pub fn channel(&self, channel: DisorderChannel) -> Option<&ChannelReport> {
        self.channels.get(&channel)
    }
}

fn recommendation(band: SeverityBand, any_indicator: bool) -> &'static str {
    match (band, any_indicator) {
        (SeverityBand::High, _) => {
            "URGENT: High risk indicators detected. Strongly recommend consultation with an \
             educational psychologist or learning specialist."
        }
        (SeverityBand::Medium, _) => {
            "MODERATE: Some concerning patterns observed. Consider a screening assessment by a \
             qualified professional."
        }
        (SeverityBand::Low, true) => {
            "LOW: Minor indicators present. Continue monitoring and provide a supportive \
             environment."
        }
        (SeverityBand::Low, false) => {
            "POSITIVE: No significant learning difficulty indicators detected. Continue engaging \
             learning activities."
        }
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
