//! In-memory session store.
//!
//! Live sessions are process-local; nothing here outlives the process.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::domain::foundation::{DomainError, ErrorCode, SessionId};
use crate::domain::session::AssessmentSession;
use crate::ports::{SessionStore, SharedSession};

#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, SharedSession>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

fn not_found(id: &SessionId) -> DomainError {
    DomainError::new(ErrorCode::SessionNotFound, format!("Session not found: {}", id))
        .with_detail("session_id", id.to_string())
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn insert(&self, session: AssessmentSession) -> Result<SharedSession, DomainError> {
        let id = session.id();
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&id) {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Session already exists: {}", id),
            ));
        }
        let shared = Arc::new(Mutex::new(session));
        sessions.insert(id, Arc::clone(&shared));
        Ok(shared)
    }

    async fn get(&self, id: &SessionId) -> Result<SharedSession, DomainError> {
        self.sessions
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn exists(&self, id: &SessionId) -> Result<bool, DomainError> {
        Ok(self.sessions.read().await.contains_key(id))
    }

    async fn remove(&self, id: &SessionId) -> Result<(), DomainError> {
        self.sessions
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }
}
