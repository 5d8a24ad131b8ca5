//! GetReportHandler - Query handler for the current report snapshot.

use std::sync::Arc;

use super::load_session;
use crate::domain::foundation::SessionId;
use crate::domain::report::AssessmentReport;
use crate::domain::session::SessionError;
use crate::ports::SessionStore;

#[derive(Debug, Clone)]
pub struct GetReportQuery {
    pub session_id: SessionId,
}

pub struct GetReportHandler {
    store: Arc<dyn SessionStore>,
}

impl GetReportHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetReportQuery) -> Result<AssessmentReport, SessionError> {
        let session = load_session(self.store.as_ref(), query.session_id).await?;
        let report = session.lock().await.report();
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::assessment::test_support::store_with_session;
    use crate::domain::risk::SeverityBand;

    #[tokio::test]
    async fn returns_snapshot_for_session() {
        let (store, id) = store_with_session().await;
        let handler = GetReportHandler::new(store);

        let report = handler.handle(GetReportQuery { session_id: id }).await.unwrap();

        assert_eq!(report.session_id, id);
        assert_eq!(report.overall_band, SeverityBand::Low);
        assert_eq!(report.channels.len(), 6);
    }

    #[tokio::test]
    async fn missing_session_is_not_found() {
        let (store, _) = store_with_session().await;
        let handler = GetReportHandler::new(store);
        let missing = SessionId::new();

        let err = handler.handle(GetReportQuery { session_id: missing }).await.unwrap_err();
        assert_eq!(err, SessionError::NotFound(missing));
    }
}
