//! Report exporter port.
//!
//! Renders an `AssessmentReport` into bytes for the results UI or a
//! download. The report is never altered by exporting it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::report::AssessmentReport;

/// Output format of an exporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Markdown,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Markdown => "md",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("Failed to serialize report: {0}")]
    Serialization(String),

    #[error("Failed to write report: {0}")]
    Io(String),
}

#[async_trait]
pub trait ReportExporter: Send + Sync {
    fn format(&self) -> ExportFormat;

    /// Renders the report.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Serialization` if rendering fails.
    async fn export(&self, report: &AssessmentReport) -> Result<Vec<u8>, ExportError>;
}
