//! ExportReportHandler - Renders a session's report in a chosen format.

use std::sync::Arc;

use tracing::info;

use super::load_session;
use crate::domain::foundation::SessionId;
use crate::domain::report::AssessmentReport;
use crate::domain::session::SessionError;
use crate::ports::{ExportFormat, ReportExporter, SessionStore};

#[derive(Debug, Clone)]
pub struct ExportReportCommand {
    pub session_id: SessionId,
    pub format: ExportFormat,
}

#[derive(Debug, Clone)]
pub struct ExportReportResult {
    pub format: ExportFormat,
    pub content: Vec<u8>,
    /// The snapshot that was rendered.
    pub report: AssessmentReport,
}

pub struct ExportReportHandler {
    store: Arc<dyn SessionStore>,
    exporters: Vec<Arc<dyn ReportExporter>>,
}

impl ExportReportHandler {
    pub fn new(store: Arc<dyn SessionStore>, exporters: Vec<Arc<dyn ReportExporter>>) -> Self {
        Self { store, exporters }
    }

    pub async fn handle(&self, cmd: ExportReportCommand) -> Result<ExportReportResult, SessionError> {
        let exporter = self
            .exporters
            .iter()
            .find(|exporter| exporter.format() == cmd.format)
            .ok_or_else(|| SessionError::export(format!("no exporter for {:?}", cmd.format)))?;

        let session = load_session(self.store.as_ref(), cmd.session_id).await?;
        let report = session.lock().await.report();

        let content = exporter
            .export(&report)
            .await
            .map_err(|e| SessionError::export(e.to_string()))?;

        info!(
            session_id = %cmd.session_id,
            format = ?cmd.format,
            bytes = content.len(),
            "report exported"
        );

        Ok(ExportReportResult {
            format: cmd.format,
            content,
            report,
        })
    }
}
