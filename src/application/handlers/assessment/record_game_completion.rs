//! RecordGameCompletionHandler - Applies one finished game.

use std::sync::Arc;

use tracing::warn;

use super::load_session;
use crate::domain::foundation::SessionId;
use crate::domain::risk::GameImpact;
use crate::domain::session::{GameCompletionEvent, SessionError};
use crate::ports::SessionStore;

#[derive(Debug, Clone)]
pub struct RecordGameCompletionCommand {
    pub session_id: SessionId,
    pub event: GameCompletionEvent,
}

#[derive(Debug, Clone)]
pub struct RecordGameCompletionResult {
    pub impact: GameImpact,
    pub high_attention: bool,
}

pub struct RecordGameCompletionHandler {
    store: Arc<dyn SessionStore>,
}

impl RecordGameCompletionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: RecordGameCompletionCommand,
    ) -> Result<RecordGameCompletionResult, SessionError> {
        let session = load_session(self.store.as_ref(), cmd.session_id).await?;
        let mut session = session.lock().await;

        let impact = session.record_game_completion(&cmd.event).inspect_err(|err| {
            warn!(session_id = %cmd.session_id, game_id = %cmd.event.game_id, error = %err, "game event rejected");
        })?;

        Ok(RecordGameCompletionResult {
            impact,
            high_attention: session.high_attention(),
        })
    }
}
