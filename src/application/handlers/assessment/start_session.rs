//! StartSessionHandler - Command handler for opening an assessment session.

use std::sync::Arc;

use tracing::info;

use crate::domain::difficulty::DifficultySettings;
use crate::domain::foundation::SessionId;
use crate::domain::session::{AssessmentSession, SessionError};
use crate::ports::{JitterSource, SessionStore};

/// Builds the jitter source for a new session from an optional seed.
pub type JitterFactory = Arc<dyn Fn(Option<u64>) -> Box<dyn JitterSource> + Send + Sync>;

/// Command to start a new session.
#[derive(Debug, Clone)]
pub struct StartSessionCommand {
    pub settings: DifficultySettings,
    pub jitter_seed: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct StartSessionResult {
    pub session_id: SessionId,
}

pub struct StartSessionHandler {
    store: Arc<dyn SessionStore>,
    jitter_factory: JitterFactory,
}

impl StartSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>, jitter_factory: JitterFactory) -> Self {
        Self {
            store,
            jitter_factory,
        }
    }

    pub async fn handle(&self, cmd: StartSessionCommand) -> Result<StartSessionResult, SessionError> {
        let session_id = SessionId::new();
        let jitter = (self.jitter_factory)(cmd.jitter_seed);
        let session = AssessmentSession::new(session_id, cmd.settings, jitter);

        self.store.insert(session).await?;
        info!(session_id = %session_id, seeded = cmd.jitter_seed.is_some(), "session registered");

        Ok(StartSessionResult { session_id })
    }
}
