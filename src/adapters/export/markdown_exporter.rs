//! Printable document rendering of the report.
//!
//! Mirrors the JSON fields, one section per channel, with a risk level
//! label from the same 25/50 bands used live.

use async_trait::async_trait;
use std::fmt::Write;

use crate::domain::report::AssessmentReport;
use crate::domain::risk::SeverityBand;
use crate::ports::{ExportError, ExportFormat, ReportExporter};

#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownReportExporter;

impl MarkdownReportExporter {
    pub fn new() -> Self {
        Self
    }

    fn render(report: &AssessmentReport) -> Result<String, std::fmt::Error> {
        let mut out = String::new();
        writeln!(out, "# Learning Assessment Report")?;
        writeln!(out)?;
        writeln!(out, "- Session: `{}`", report.session_id)?;
        writeln!(out, "- Generated: {}", report.generated_at.as_datetime().to_rfc3339())?;
        writeln!(out, "- Overall risk: **{}**", level_label(report.overall_band))?;
        writeln!(out)?;
        writeln!(out, "## Recommendation")?;
        writeln!(out)?;
        writeln!(out, "{}", report.recommendation)?;

        for channel in report.channels.values() {
            writeln!(out)?;
            writeln!(out, "## {}", channel.name)?;
            writeln!(out)?;
            writeln!(out, "_{}_", channel.description)?;
            writeln!(out)?;
            writeln!(
                out,
                "Score: {:.1} ({})",
                channel.score,
                level_label(channel.band)
            )?;
            if !channel.indicators.is_empty() {
                writeln!(out)?;
                for indicator in &channel.indicators {
                    writeln!(out, "- {}", indicator)?;
                }
            }
        }

        writeln!(out)?;
        writeln!(out, "## Session Summary")?;
        writeln!(out)?;
        let summary = &report.summary;
        writeln!(out, "- Questions answered: {}", summary.total_attempts)?;
        writeln!(out, "- Games completed: {}", summary.games_completed)?;
        writeln!(out, "- Rapid emotion changes: {}", summary.emotions.rapid_changes)?;
        writeln!(out, "- Negative transitions: {}", summary.emotions.negative_transitions)?;
        writeln!(out, "- Confusion states: {}", summary.emotions.confusion_states)?;
        writeln!(out)?;
        writeln!(out, "---")?;
        writeln!(out)?;
        writeln!(out, "{}", report.disclaimer)?;
        Ok(out)
    }
}

fn level_label(band: SeverityBand) -> &'static str {
    match band {
        SeverityBand::High => "High Risk",
        SeverityBand::Medium => "Medium Risk",
        SeverityBand::Low => "Low Risk",
    }
}

#[async_trait]
impl ReportExporter for MarkdownReportExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Markdown
    }

    async fn export(&self, report: &AssessmentReport) -> Result<Vec<u8>, ExportError> {
        Self::render(report)
            .map(String::into_bytes)
            .map_err(|e| ExportError::Serialization(e.to_string()))
    }
}
