//! Flat JSON rendering of the report snapshot.

use async_trait::async_trait;

use crate::domain::report::AssessmentReport;
use crate::ports::{ExportError, ExportFormat, ReportExporter};

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReportExporter {
    pretty: bool,
}

impl JsonReportExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

#[async_trait]
impl ReportExporter for JsonReportExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Json
    }

    async fn export(&self, report: &AssessmentReport) -> Result<Vec<u8>, ExportError> {
        let rendered = if self.pretty {
            serde_json::to_vec_pretty(report)
        } else {
            serde_json::to_vec(report)
        };
        rendered.map_err(|e| ExportError::Serialization(e.to_string()))
    }
}
