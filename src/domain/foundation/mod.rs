//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, time, task domains, the state machine trait and
//! the error vocabulary shared by every assessment module.

mod errors;
mod ids;
mod state_machine;
mod task_domain;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{AttemptId, SessionId};
pub use state_machine::StateMachine;
pub use task_domain::TaskDomain;
pub use timestamp::Timestamp;
