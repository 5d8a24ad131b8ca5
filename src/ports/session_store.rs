//! Session store port.
//!
//! Keeps live assessment sessions. Each session sits behind its own lock so
//! events for one session are applied in order while different sessions
//! proceed independently.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::foundation::{DomainError, SessionId};
use crate::domain::session::AssessmentSession;

/// A session shared between handlers.
pub type SharedSession = Arc<Mutex<AssessmentSession>>;

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Registers a new session and returns its handle.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if a session with the same id exists
    async fn insert(&self, session: AssessmentSession) -> Result<SharedSession, DomainError>;

    /// Looks a session up.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if no session has this id
    async fn get(&self, id: &SessionId) -> Result<SharedSession, DomainError>;

    async fn exists(&self, id: &SessionId) -> Result<bool, DomainError>;

    /// Drops a finished session.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if no session has this id
    async fn remove(&self, id: &SessionId) -> Result<(), DomainError>;
}
