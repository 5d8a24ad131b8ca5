//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod assessment;

pub use assessment::{
    BeginQuestionCommand, BeginQuestionHandler, BeginQuestionResult, ExportReportCommand,
    ExportReportHandler, ExportReportResult, GetReportHandler, GetReportQuery, JitterFactory,
    RecordAttemptCommand, RecordAttemptHandler, RecordAttemptResult, RecordEmotionCommand,
    RecordEmotionHandler, RecordEmotionResult, RecordGameCompletionCommand,
    RecordGameCompletionHandler, RecordGameCompletionResult, SeedQuestionnaireCommand,
    SeedQuestionnaireHandler, StartSessionCommand, StartSessionHandler, StartSessionResult,
};
