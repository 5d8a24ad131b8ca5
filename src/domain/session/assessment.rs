//! Assessment session aggregate.
//!
//! One session is one child in one sitting. It owns every per-session
//! store (emotion history, difficulty tracks, attempt log, risk ledger)
//! so concurrent sessions never share state. Each inbound event is a
//! local transition: it validates first and only then mutates.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::{debug, info};

use super::{EmotionEvent, GameCompletionEvent, SessionError, TaskAttemptEvent};
use crate::domain::difficulty::{DifficultyController, DifficultySettings, DifficultyTier, TierChange};
use crate::domain::emotion::{EmotionHistoryTracker, EmotionLabel, RecordOutcome};
use crate::domain::foundation::{SessionId, StateMachine, TaskDomain, Timestamp};
use crate::domain::report::{AssessmentReport, ReportContext};
use crate::domain::risk::{
    shows_high_attention, AttemptRecord, AttemptRecorder, DisorderChannel, GameId, GameImpact,
    GameOutcomeAggregator, QuestionnaireAnalysis, RiskLedger, HIGH_ATTENTION_ADHD_CEILING,
};
use crate::ports::JitterSource;

/// Every this many counted emotion shifts, ADHD risk grows once.
pub const SHIFTS_PER_ADHD_INCREMENT: u32 = 3;

/// Range of the ADHD increment from emotion shifts.
pub const SHIFT_INCREMENT_RANGE: (f64, f64) = (1.2, 1.6);

/// Consecutive failures after which a question may be skipped.
pub const SKIP_AFTER_FAILURES: u32 = 2;

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionState {
    /// Nothing played yet.
    Created,
    /// Questionnaire applied, nothing played yet.
    Seeded,
    /// At least one question or game has been played.
    InPlay,
}

impl StateMachine for SessionState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SessionState::*;
        matches!(
            (self, target),
            (Created, Seeded) | (Created, InPlay) | (Seeded, InPlay) | (InPlay, InPlay)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SessionState::*;
        match self {
            Created => vec![Seeded, InPlay],
            Seeded => vec![InPlay],
            InPlay => vec![InPlay],
        }
    }
}

/// The question currently on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct QuestionContext {
    domain: TaskDomain,
    tier: DifficultyTier,
}

/// Result of applying one attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptApplied {
    pub record: AttemptRecord,
    pub tier_change: TierChange,
}

/// Result of applying one emotion label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmotionApplied {
    pub outcome: RecordOutcome,
    /// Whether this label counted towards the ADHD shift rule.
    pub counted_shift: bool,
    /// ADHD value after the shift rule, when it fired.
    pub adhd_after_increment: Option<f64>,
}

pub struct AssessmentSession {
    id: SessionId,
    created_at: Timestamp,
    state: SessionState,
    jitter: Box<dyn JitterSource>,
    ledger: RiskLedger,
    emotions: EmotionHistoryTracker,
    difficulty: DifficultyController,
    attempts: AttemptRecorder,
    game_scores: BTreeMap<GameId, u32>,
    questionnaire_flags: Vec<DisorderChannel>,
    question: Option<QuestionContext>,
    shift_count: u32,
}

impl fmt::Debug for AssessmentSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssessmentSession")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("ledger", &self.ledger)
            .field("attempts", &self.attempts.total_attempts())
            .field("games", &self.game_scores)
            .finish_non_exhaustive()
    }
}

impl AssessmentSession {
    pub fn new(id: SessionId, settings: DifficultySettings, mut jitter: Box<dyn JitterSource>) -> Self {
        let ledger = RiskLedger::new(jitter.as_mut());
        info!(session_id = %id, "assessment session started");
        Self {
            id,
            created_at: Timestamp::now(),
            state: SessionState::Created,
            jitter,
            ledger,
            emotions: EmotionHistoryTracker::new(),
            difficulty: DifficultyController::new(settings),
            attempts: AttemptRecorder::new(),
            game_scores: BTreeMap::new(),
            questionnaire_flags: Vec::new(),
            question: None,
            shift_count: 0,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn ledger(&self) -> &RiskLedger {
        &self.ledger
    }

    pub fn emotions(&self) -> &EmotionHistoryTracker {
        &self.emotions
    }

    pub fn attempts(&self) -> &AttemptRecorder {
        &self.attempts
    }

    pub fn difficulty(&self) -> &DifficultyController {
        &self.difficulty
    }

    /// Latest score per completed game.
    pub fn game_scores(&self) -> &BTreeMap<GameId, u32> {
        &self.game_scores
    }

    /// Emotion shifts counted towards the ADHD rule so far.
    pub fn shift_count(&self) -> u32 {
        self.shift_count
    }

    /// Tier the next question in `domain` should use. Does not start a question.
    pub fn next_tier(&self, domain: TaskDomain) -> DifficultyTier {
        self.difficulty.next_tier(domain)
    }

    /// True once attention games demonstrated sustained focus.
    pub fn high_attention(&self) -> bool {
        shows_high_attention(
            self.game_scores.get(&GameId::FocusFlight).copied(),
            self.game_scores.get(&GameId::VoidChallenge).copied(),
        )
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Commands
    // ─────────────────────────────────────────────────────────────────────────

    /// Applies the intake questionnaire.
    ///
    /// # Errors
    ///
    /// - `InvalidState` if already seeded or play has started
    /// - `Validation` if any score is out of range (nothing is applied)
    pub fn seed_questionnaire(&mut self, analysis: &QuestionnaireAnalysis) -> Result<(), SessionError> {
        match self.state {
            SessionState::Created => {}
            SessionState::Seeded => {
                return Err(SessionError::invalid_state("questionnaire already applied"))
            }
            SessionState::InPlay => {
                return Err(SessionError::invalid_state(
                    "questionnaire must be applied before play starts",
                ))
            }
        }

        analysis.seed(&mut self.ledger)?;
        self.questionnaire_flags = analysis.flagged();
        self.state = self.state.transition_to(SessionState::Seeded)?;
        info!(session_id = %self.id, flagged = self.questionnaire_flags.len(), "questionnaire applied");
        Ok(())
    }

    /// Records a raw emotion event, using the current time when the event
    /// carries none.
    pub fn record_emotion(&mut self, event: &EmotionEvent) -> Result<EmotionApplied, SessionError> {
        let (label, observed_at) = event.validate()?;
        Ok(self.record_emotion_at(label, observed_at.unwrap_or_else(Timestamp::now)))
    }

    /// Records a typed label at `observed_at`.
    ///
    /// Rapid changes count as shifts unless a tier-3 question is on screen.
    /// Every third counted shift adds a small ADHD increment.
    pub fn record_emotion_at(&mut self, label: EmotionLabel, observed_at: Timestamp) -> EmotionApplied {
        let outcome = self.emotions.record_at(label, observed_at);

        let on_hard_question = self
            .question
            .is_some_and(|question| question.tier == DifficultyTier::MAX);
        let counted_shift = outcome.rapid_change && !on_hard_question;

        let mut adhd_after_increment = None;
        if counted_shift {
            self.shift_count += 1;
            if self.shift_count % SHIFTS_PER_ADHD_INCREMENT == 0 {
                let (low, high) = SHIFT_INCREMENT_RANGE;
                let increment = self.jitter.between(low, high);
                let ceiling = if self.high_attention() {
                    HIGH_ATTENTION_ADHD_CEILING
                } else {
                    DisorderChannel::Adhd.cap()
                };
                let after = self.ledger.apply_capped(DisorderChannel::Adhd, increment, ceiling);
                adhd_after_increment = Some(after);
            }
        }

        debug!(
            session_id = %self.id,
            label = %label,
            rapid_change = outcome.rapid_change,
            counted_shift,
            shift_count = self.shift_count,
            "emotion recorded"
        );

        EmotionApplied {
            outcome,
            counted_shift,
            adhd_after_increment,
        }
    }

    /// Starts a question in `domain` and returns the tier to build it at.
    pub fn begin_question(&mut self, domain: TaskDomain) -> Result<DifficultyTier, SessionError> {
        self.state = self.state.transition_to(SessionState::InPlay)?;
        let tier = self.difficulty.next_tier(domain);
        self.question = Some(QuestionContext { domain, tier });
        debug!(session_id = %self.id, domain = %domain.as_str(), tier = tier.level(), "question started");
        Ok(tier)
    }

    /// Applies one answered question.
    ///
    /// The emotion snapshot is taken before anything moves, so the delta
    /// reflects the label current when the answer arrived.
    ///
    /// # Errors
    ///
    /// - `Validation` for malformed events; the session is left untouched
    pub fn record_attempt(&mut self, event: &TaskAttemptEvent) -> Result<AttemptApplied, SessionError> {
        let input = event.validate()?;
        let next_state = self.state.transition_to(SessionState::InPlay)?;
        let emotion = self.emotions.current();
        let high_attention = self.high_attention();

        let tier_change = self
            .difficulty
            .observe(input.domain, input.tier, input.correct && !input.timed_out())?;
        let record = self.attempts.record(
            input,
            emotion,
            high_attention,
            &mut self.ledger,
            Timestamp::now(),
        );
        self.question = None;
        self.state = next_state;

        debug!(
            session_id = %self.id,
            domain = %input.domain.as_str(),
            tier = input.tier.level(),
            correct = input.correct,
            timed_out = record.timed_out,
            emotion = %emotion,
            delta = record.risk_delta,
            next_tier = tier_change.current.level(),
            "attempt recorded"
        );

        Ok(AttemptApplied {
            record,
            tier_change,
        })
    }

    /// Applies one finished game.
    ///
    /// # Errors
    ///
    /// - `Validation` for malformed events; the session is left untouched
    pub fn record_game_completion(&mut self, event: &GameCompletionEvent) -> Result<GameImpact, SessionError> {
        let (game, outcome) = event.validate()?;
        let next_state = self.state.transition_to(SessionState::InPlay)?;
        let emotion = self.emotions.current();

        let impact = GameOutcomeAggregator::apply(
            game,
            &outcome,
            emotion,
            &mut self.ledger,
            self.jitter.as_mut(),
        );
        self.game_scores.insert(game, outcome.score);
        self.state = next_state;

        debug!(
            session_id = %self.id,
            game = %game,
            score = outcome.score,
            game_risk = impact.game_risk,
            changes = impact.changes.len(),
            "game completion recorded"
        );

        Ok(impact)
    }

    /// True when the child has failed repeatedly and currently looks upset.
    pub fn should_skip_question(&self, consecutive_failures: u32) -> bool {
        consecutive_failures >= SKIP_AFTER_FAILURES && self.emotions.current().is_negative()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Current report snapshot.
    pub fn report(&self) -> AssessmentReport {
        self.report_at(Timestamp::now())
    }

    pub fn report_at(&self, generated_at: Timestamp) -> AssessmentReport {
        let ctx = ReportContext {
            session_id: self.id,
            ledger: &self.ledger,
            emotions: &self.emotions,
            attempts: &self.attempts,
            difficulty: &self.difficulty,
            game_scores: &self.game_scores,
            questionnaire_flags: &self.questionnaire_flags,
            adhd_shift_count: self.shift_count,
            high_attention: self.high_attention(),
        };
        let report = AssessmentReport::build(&ctx, generated_at);
        info!(session_id = %self.id, overall_band = %report.overall_band, "report generated");
        report
    }
}
