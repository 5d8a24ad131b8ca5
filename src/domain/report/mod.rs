//! Report module - read-only projection of a session for results and
//! export consumers.

mod assessment_report;
mod indicators;

pub use assessment_report::{
    AssessmentReport, ChannelReport, ReportContext, ReportSummary, DISCLAIMER,
};
pub use indicators::{channel_indicators, LOW_GAME_SCORE};
