//! Human-readable indicator strings per channel.

use super::ReportContext;
use crate::domain::emotion::EmotionLabel;
use crate::domain::foundation::TaskDomain;
use crate::domain::risk::DisorderChannel;

/// Games scoring below this are listed as an indicator on their channels.
pub const LOW_GAME_SCORE: u32 = 150;

const FAILURE_RATE_INDICATOR: f64 = 0.5;
const NEGATIVE_TRANSITION_INDICATOR: u32 = 3;
const CONFUSION_INDICATOR: u32 = 4;
const PERSISTENT_CONFUSION_INDICATOR: u32 = 6;
const VOLATILITY_INDICATOR: u32 = 5;
const SHIFT_INDICATOR: u32 = 3;

const READING_FRUSTRATION: [EmotionLabel; 3] =
    [EmotionLabel::Happy, EmotionLabel::Sad, EmotionLabel::Fearful];
const MATH_ANXIETY: [EmotionLabel; 3] =
    [EmotionLabel::Neutral, EmotionLabel::Fearful, EmotionLabel::Sad];

/// Collects every indicator that applies to `channel`.
pub fn channel_indicators(channel: DisorderChannel, ctx: &ReportContext<'_>) -> Vec<String> {
    let counters = ctx.emotions.counters();
    let mut indicators = Vec::new();
    let mut push_if = |condition: bool, text: &str| {
        if condition {
            indicators.push(text.to_string());
        }
    };

    match channel {
        DisorderChannel::Dyslexia => {
            push_if(high_failure_rate(ctx, TaskDomain::Reading), "High reading task failure rate");
            push_if(
                counters.negative_transitions > NEGATIVE_TRANSITION_INDICATOR,
                "Frequent negative emotional responses",
            );
            push_if(
                counters.confusion_states > CONFUSION_INDICATOR,
                "Multiple confusion states during reading",
            );
            push_if(
                ctx.emotions.has_pattern(&READING_FRUSTRATION),
                "Frustration pattern detected",
            );
        }
        DisorderChannel::Dyscalculia => {
            push_if(high_failure_rate(ctx, TaskDomain::Number), "High math task failure rate");
            push_if(
                counters.confusion_states > CONFUSION_INDICATOR,
                "Anxiety during number tasks",
            );
            push_if(
                counters.negative_transitions > NEGATIVE_TRANSITION_INDICATOR,
                "Negative emotional patterns",
            );
            push_if(ctx.emotions.has_pattern(&MATH_ANXIETY), "Math anxiety pattern detected");
        }
        DisorderChannel::Dysgraphia => {
            push_if(
                counters.rapid_changes > VOLATILITY_INDICATOR,
                "High emotional volatility",
            );
            push_if(
                counters.confusion_states > PERSISTENT_CONFUSION_INDICATOR,
                "Persistent confusion across tasks",
            );
            push_if(high_failure_rate(ctx, TaskDomain::Writing), "High writing task failure rate");
        }
        DisorderChannel::Adhd => {
            push_if(
                ctx.adhd_shift_count >= SHIFT_INDICATOR,
                "Frequent emotional shifts during tasks",
            );
            push_if(
                high_failure_rate(ctx, TaskDomain::Attention),
                "High attention task failure rate",
            );
            push_if(ctx.high_attention, "Sustained focus shown in attention games");
        }
        DisorderChannel::Dyspraxia | DisorderChannel::AuditoryProcessing => {}
    }

    for domain in TaskDomain::ALL {
        if primary_channel(domain) != channel {
            continue;
        }
        let critical = ctx.difficulty.critical_failures(domain);
        if critical > 0 {
            indicators.push(format!(
                "Failed {} basic-level {} task(s)",
                critical,
                domain.as_str()
            ));
        }
    }

    for (game, score) in ctx.game_scores {
        if *score < LOW_GAME_SCORE && game.channels().contains(&channel) {
            indicators.push(format!("Low {} score ({})", game, score));
        }
    }

    if ctx.questionnaire_flags.contains(&channel) {
        indicators.push("Flagged by intake questionnaire".to_string());
    }

    indicators
}

fn high_failure_rate(ctx: &ReportContext<'_>, domain: TaskDomain) -> bool {
    ctx.attempts
        .stats(domain)
        .failure_rate()
        .is_some_and(|rate| rate > FAILURE_RATE_INDICATOR)
}

fn primary_channel(domain: TaskDomain) -> DisorderChannel {
    match domain {
        TaskDomain::Reading => DisorderChannel::Dyslexia,
        TaskDomain::Number => DisorderChannel::Dyscalculia,
        TaskDomain::Attention => DisorderChannel::Adhd,
        TaskDomain::Writing => DisorderChannel::Dysgraphia,
    }
}
