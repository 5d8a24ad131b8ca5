//! BeginQuestionHandler - Asks a session which tier the next question uses.

use std::sync::Arc;

use super::load_session;
use crate::domain::difficulty::DifficultyTier;
use crate::domain::foundation::{SessionId, TaskDomain};
use crate::domain::session::SessionError;
use crate::ports::SessionStore;

#[derive(Debug, Clone)]
pub struct BeginQuestionCommand {
    pub session_id: SessionId,
    pub domain: String,
}

#[derive(Debug, Clone, Copy)]
pub struct BeginQuestionResult {
    pub domain: TaskDomain,
    pub tier: DifficultyTier,
}

pub struct BeginQuestionHandler {
    store: Arc<dyn SessionStore>,
}

impl BeginQuestionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: BeginQuestionCommand) -> Result<BeginQuestionResult, SessionError> {
        let domain: TaskDomain = cmd.domain.parse()?;
        let session = load_session(self.store.as_ref(), cmd.session_id).await?;
        let tier = session.lock().await.begin_question(domain)?;
        Ok(BeginQuestionResult { domain, tier })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::assessment::test_support::store_with_session;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::session::SessionState;

    #[tokio::test]
    async fn returns_domain_start_tier() {
        let (store, id) = store_with_session().await;
        let handler = BeginQuestionHandler::new(store.clone());

        let reading = handler
            .handle(BeginQuestionCommand { session_id: id, domain: "reading".into() })
            .await
            .unwrap();
        let writing = handler
            .handle(BeginQuestionCommand { session_id: id, domain: "writing".into() })
            .await
            .unwrap();

        assert_eq!(reading.tier, DifficultyTier::Easy);
        assert_eq!(writing.tier, DifficultyTier::Hard);
        assert_eq!(store.get(&id).await.unwrap().lock().await.state(), SessionState::InPlay);
    }

    #[tokio::test]
    async fn unknown_domain_is_rejected() {
        let (store, id) = store_with_session().await;
        let handler = BeginQuestionHandler::new(store);

        let err = handler
            .handle(BeginQuestionCommand { session_id: id, domain: "music".into() })
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::UnknownDomain);
    }
}
