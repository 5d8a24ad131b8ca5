//! Replays a JSON-lines event script through one session.
//!
//! Each non-blank line is one `SessionEvent`. Lines that fail to parse or
//! are rejected by the session are logged and skipped; the rest of the
//! script still runs.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::handlers::{
    BeginQuestionCommand, BeginQuestionHandler, GetReportHandler, GetReportQuery, JitterFactory,
    RecordAttemptCommand, RecordAttemptHandler, RecordEmotionCommand, RecordEmotionHandler,
    RecordGameCompletionCommand, RecordGameCompletionHandler, SeedQuestionnaireCommand,
    SeedQuestionnaireHandler, StartSessionCommand, StartSessionHandler,
};
use crate::domain::difficulty::DifficultySettings;
use crate::domain::foundation::SessionId;
use crate::domain::report::AssessmentReport;
use crate::domain::session::{SessionError, SessionEvent};
use crate::ports::SessionStore;

/// A script line that was not applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedLine {
    pub line: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayOutcome {
    pub session_id: SessionId,
    pub applied: usize,
    pub rejected: Vec<RejectedLine>,
    pub report: AssessmentReport,
}

pub struct ReplayRunner {
    start: StartSessionHandler,
    seed: SeedQuestionnaireHandler,
    emotion: RecordEmotionHandler,
    question: BeginQuestionHandler,
    attempt: RecordAttemptHandler,
    game: RecordGameCompletionHandler,
    report: GetReportHandler,
}

impl ReplayRunner {
    pub fn new(store: Arc<dyn SessionStore>, jitter_factory: JitterFactory) -> Self {
        Self {
            start: StartSessionHandler::new(Arc::clone(&store), jitter_factory),
            seed: SeedQuestionnaireHandler::new(Arc::clone(&store)),
            emotion: RecordEmotionHandler::new(Arc::clone(&store)),
            question: BeginQuestionHandler::new(Arc::clone(&store)),
            attempt: RecordAttemptHandler::new(Arc::clone(&store)),
            game: RecordGameCompletionHandler::new(Arc::clone(&store)),
            report: GetReportHandler::new(store),
        }
    }

    pub async fn run(
        &self,
        script: &str,
        settings: DifficultySettings,
        jitter_seed: Option<u64>,
    ) -> Result<ReplayOutcome, SessionError> {
        let session_id = self
            .start
            .handle(StartSessionCommand {
                settings,
                jitter_seed,
            })
            .await?
            .session_id;

        let mut applied = 0;
        let mut rejected = Vec::new();
        let mut consecutive_failures = 0;

        for (index, raw) in script.lines().enumerate() {
            let line = index + 1;
            if raw.trim().is_empty() {
                continue;
            }

            let event: SessionEvent = match serde_json::from_str(raw) {
                Ok(event) => event,
                Err(err) => {
                    warn!(line, error = %err, "unparsable script line");
                    rejected.push(RejectedLine {
                        line,
                        reason: err.to_string(),
                    });
                    continue;
                }
            };

            let result = self
                .apply(session_id, event, &mut consecutive_failures)
                .await;
            match result {
                Ok(()) => applied += 1,
                Err(err @ SessionError::NotFound(_)) => return Err(err),
                Err(err) => rejected.push(RejectedLine {
                    line,
                    reason: err.to_string(),
                }),
            }
        }

        let report = self.report.handle(GetReportQuery { session_id }).await?;
        info!(session_id = %session_id, applied, rejected = rejected.len(), "replay finished");

        Ok(ReplayOutcome {
            session_id,
            applied,
            rejected,
            report,
        })
    }

    async fn apply(
        &self,
        session_id: SessionId,
        event: SessionEvent,
        consecutive_failures: &mut u32,
    ) -> Result<(), SessionError> {
        match event {
            SessionEvent::Questionnaire(analysis) => {
                self.seed
                    .handle(SeedQuestionnaireCommand {
                        session_id,
                        analysis,
                    })
                    .await
            }
            SessionEvent::Emotion(event) => self
                .emotion
                .handle(RecordEmotionCommand { session_id, event })
                .await
                .map(|_| ()),
            SessionEvent::BeginQuestion { domain } => self
                .question
                .handle(BeginQuestionCommand { session_id, domain })
                .await
                .map(|_| ()),
            SessionEvent::Attempt(event) => {
                let result = self
                    .attempt
                    .handle(RecordAttemptCommand {
                        session_id,
                        event,
                        consecutive_failures: *consecutive_failures,
                    })
                    .await?;
                *consecutive_failures = if result.record.correct && !result.record.timed_out {
                    0
                } else {
                    *consecutive_failures + 1
                };
                Ok(())
            }
            SessionEvent::GameCompletion(event) => self
                .game
                .handle(RecordGameCompletionCommand { session_id, event })
                .await
                .map(|_| ()),
        }
    }
}
