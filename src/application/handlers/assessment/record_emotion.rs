//! RecordEmotionHandler - Feeds emotion labels into a session.

use std::sync::Arc;

use tracing::{debug, warn};

use super::load_session;
use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::session::{EmotionApplied, EmotionEvent, SessionError};
use crate::ports::{EmotionSource, SessionStore};

#[derive(Debug, Clone)]
pub struct RecordEmotionCommand {
    pub session_id: SessionId,
    pub event: EmotionEvent,
}

#[derive(Debug, Clone)]
pub struct RecordEmotionResult {
    pub applied: EmotionApplied,
    pub shift_count: u32,
}

pub struct RecordEmotionHandler {
    store: Arc<dyn SessionStore>,
}

impl RecordEmotionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: RecordEmotionCommand) -> Result<RecordEmotionResult, SessionError> {
        let session = load_session(self.store.as_ref(), cmd.session_id).await?;
        let mut session = session.lock().await;
        let applied = session.record_emotion(&cmd.event).inspect_err(|err| {
            warn!(session_id = %cmd.session_id, label = %cmd.event.label, error = %err, "emotion event rejected");
        })?;

        Ok(RecordEmotionResult {
            applied,
            shift_count: session.shift_count(),
        })
    }

    /// Pulls every label from `source` into the session, stamped with the
    /// current time. Returns how many labels were applied.
    pub async fn drain(
        &self,
        session_id: SessionId,
        source: &mut dyn EmotionSource,
    ) -> Result<usize, SessionError> {
        let session = load_session(self.store.as_ref(), session_id).await?;
        let mut applied = 0;
        while let Some(label) = source.next().await {
            session.lock().await.record_emotion_at(label, Timestamp::now());
            applied += 1;
        }
        debug!(session_id = %session_id, applied, "emotion source drained");
        Ok(applied)
    }
}
