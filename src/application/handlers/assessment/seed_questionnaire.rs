//! SeedQuestionnaireHandler - Applies the intake questionnaire.

use std::sync::Arc;

use tracing::warn;

use super::load_session;
use crate::domain::foundation::SessionId;
use crate::domain::risk::QuestionnaireAnalysis;
use crate::domain::session::SessionError;
use crate::ports::SessionStore;

#[derive(Debug, Clone)]
pub struct SeedQuestionnaireCommand {
    pub session_id: SessionId,
    pub analysis: QuestionnaireAnalysis,
}

pub struct SeedQuestionnaireHandler {
    store: Arc<dyn SessionStore>,
}

impl SeedQuestionnaireHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: SeedQuestionnaireCommand) -> Result<(), SessionError> {
        let session = load_session(self.store.as_ref(), cmd.session_id).await?;
        let mut session = session.lock().await;
        session.seed_questionnaire(&cmd.analysis).inspect_err(|err| {
            warn!(session_id = %cmd.session_id, error = %err, "questionnaire rejected");
        })
    }
}
