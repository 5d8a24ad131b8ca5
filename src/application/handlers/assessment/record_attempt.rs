//! RecordAttemptHandler - Applies one answered question.

use std::sync::Arc;

use tracing::warn;

use super::load_session;
use crate::domain::difficulty::DifficultyTier;
use crate::domain::foundation::SessionId;
use crate::domain::risk::AttemptRecord;
use crate::domain::session::{SessionError, TaskAttemptEvent};
use crate::ports::SessionStore;

#[derive(Debug, Clone)]
pub struct RecordAttemptCommand {
    pub session_id: SessionId,
    pub event: TaskAttemptEvent,
    /// Failures in a row before this attempt, as tracked by the game UI.
    pub consecutive_failures: u32,
}

#[derive(Debug, Clone)]
pub struct RecordAttemptResult {
    pub record: AttemptRecord,
    pub next_tier: DifficultyTier,
    /// Whether the UI should offer to skip the next question.
    pub suggest_skip: bool,
}

pub struct RecordAttemptHandler {
    store: Arc<dyn SessionStore>,
}

impl RecordAttemptHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: RecordAttemptCommand) -> Result<RecordAttemptResult, SessionError> {
        let session = load_session(self.store.as_ref(), cmd.session_id).await?;
        let mut session = session.lock().await;

        let applied = session.record_attempt(&cmd.event).inspect_err(|err| {
            warn!(session_id = %cmd.session_id, error = %err, "attempt event rejected");
        })?;

        let failures = if applied.record.correct && !applied.record.timed_out {
            0
        } else {
            cmd.consecutive_failures + 1
        };

        Ok(RecordAttemptResult {
            next_tier: applied.tier_change.current,
            suggest_skip: session.should_skip_question(failures),
            record: applied.record,
        })
    }
}
