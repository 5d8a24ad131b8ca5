//! Assessment command and query handlers.

mod begin_question;
mod export_report;
mod get_report;
mod record_attempt;
mod record_emotion;
mod record_game_completion;
mod seed_questionnaire;
mod start_session;

pub use begin_question::{BeginQuestionCommand, BeginQuestionHandler, BeginQuestionResult};
pub use export_report::{ExportReportCommand, ExportReportHandler, ExportReportResult};
pub use get_report::{GetReportHandler, GetReportQuery};
pub use record_attempt::{RecordAttemptCommand, RecordAttemptHandler, RecordAttemptResult};
pub use record_emotion::{RecordEmotionCommand, RecordEmotionHandler, RecordEmotionResult};
pub use record_game_completion::{
    RecordGameCompletionCommand, RecordGameCompletionHandler, RecordGameCompletionResult,
};
pub use seed_questionnaire::{SeedQuestionnaireCommand, SeedQuestionnaireHandler};
pub use start_session::{JitterFactory, StartSessionCommand, StartSessionHandler, StartSessionResult};

use crate::domain::foundation::{ErrorCode, SessionId};
use crate::domain::session::SessionError;
use crate::ports::{SessionStore, SharedSession};

/// Fetches a session, turning a store miss into `SessionError::NotFound`.
async fn load_session(store: &dyn SessionStore, id: SessionId) -> Result<SharedSession, SessionError> {
    store.get(&id).await.map_err(|err| match err.code {
        ErrorCode::SessionNotFound => SessionError::not_found(id),
        _ => SessionError::from(err),
    })
}
