//! Risk module - per-channel accumulators and the two pathways that feed
//! them (task attempts and game completions), plus the questionnaire seed.

mod attempt;
mod channel;
mod game_outcome;
mod ledger;
mod questionnaire;

pub use attempt::{
    channel_weights, emotion_modifier, risk_delta, AttemptInput, AttemptRecord, AttemptRecorder,
    DomainStats, HIGH_ATTENTION_ADHD_CEILING, SLOW_CORRECT_SECONDS, TIMEOUT_SECONDS,
};
pub use channel::{ChannelScores, DisorderChannel};
pub use game_outcome::{
    shows_high_attention, ChannelChange, GameId, GameImpact, GameOutcome, GameOutcomeAggregator,
    Grade, EXCELLENT_SCORE, GOOD_SCORE,
};
pub use ledger::{
    comorbidity_adjusted, RiskLedger, SeverityBand, COMORBIDITY_TRIGGER, HIGH_THRESHOLD,
    MEDIUM_THRESHOLD,
};
pub use questionnaire::{QuestionnaireAnalysis, MAX_QUESTIONNAIRE_SCORE};
