//! Writes exported reports to a directory.

use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::warn;

use crate::domain::report::AssessmentReport;
use crate::ports::{ExportError, ReportExporter};

/// Writes `{output_dir}/report_{session_id}.{ext}`.
///
/// Content goes to a `.tmp` sibling first and is renamed into place, so a
/// reader never sees a half-written report.
#[derive(Debug, Clone)]
pub struct ReportFileWriter {
    output_dir: PathBuf,
}

impl ReportFileWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub async fn write(
        &self,
        report: &AssessmentReport,
        exporter: &dyn ReportExporter,
    ) -> Result<PathBuf, ExportError> {
        let bytes = exporter.export(report).await?;

        fs::create_dir_all(&self.output_dir).await.map_err(|e| {
            ExportError::Io(format!(
                "Failed to create {}: {}",
                self.output_dir.display(),
                e
            ))
        })?;

        let file_name = format!(
            "report_{}.{}",
            report.session_id,
            exporter.format().extension()
        );
        let path = self.output_dir.join(&file_name);
        let temp = self.output_dir.join(format!("{}.tmp", file_name));

        let written = match write_synced(&temp, &bytes).await {
            Ok(()) => fs::rename(&temp, &path)
                .await
                .map_err(|e| ExportError::Io(format!("Failed to move {}: {}", path.display(), e))),
            Err(err) => Err(err),
        };
        if let Err(err) = written {
            if let Err(cleanup) = fs::remove_file(&temp).await {
                warn!(path = %temp.display(), error = %cleanup, "temp report not removed");
            }
            return Err(err);
        }

        Ok(path)
    }
}

async fn write_synced(temp: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    let mut file = fs::File::create(temp)
        .await
        .map_err(|e| ExportError::Io(format!("Failed to create {}: {}", temp.display(), e)))?;
    file.write_all(bytes)
        .await
        .map_err(|e| ExportError::Io(format!("Failed to write {}: {}", temp.display(), e)))?;
    file.sync_all()
        .await
        .map_err(|e| ExportError::Io(format!("Failed to sync {}: {}", temp.display(), e)))
}
