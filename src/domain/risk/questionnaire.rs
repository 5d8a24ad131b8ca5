//! One-time questionnaire seed.

use serde::{Deserialize, Serialize};

use super::{DisorderChannel, RiskLedger};
use crate::domain::foundation::ValidationError;

/// Highest questionnaire score per channel.
pub const MAX_QUESTIONNAIRE_SCORE: i64 = 2;

/// Seed per score for channels the intake form grades in two steps.
const GRADED_SEEDS: [f64; 3] = [0.0, 2.0, 5.0];

/// Seed per score for channels the intake form only flags.
const FLAG_SEEDS: [f64; 3] = [0.0, 3.0, 3.0];

fn seed_table(channel: DisorderChannel) -> &'static [f64; 3] {
    match channel {
        DisorderChannel::Dyslexia | DisorderChannel::Dyscalculia | DisorderChannel::Adhd => {
            &GRADED_SEEDS
        }
        DisorderChannel::Dysgraphia
        | DisorderChannel::Dyspraxia
        | DisorderChannel::AuditoryProcessing => &FLAG_SEEDS,
    }
}

/// Raw questionnaire result as delivered by the intake form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuestionnaireAnalysis {
    pub dyslexia_score: i64,
    pub dyscalculia_score: i64,
    pub adhd_score: i64,
    pub dysgraphia_score: i64,
    pub dyspraxia_score: i64,
    pub auditory_score: i64,
}

impl QuestionnaireAnalysis {
    fn scores(&self) -> [(DisorderChannel, &'static str, i64); 6] {
        [
            (DisorderChannel::Dyslexia, "dyslexiaScore", self.dyslexia_score),
            (DisorderChannel::Dyscalculia, "dyscalculiaScore", self.dyscalculia_score),
            (DisorderChannel::Adhd, "adhdScore", self.adhd_score),
            (DisorderChannel::Dysgraphia, "dysgraphiaScore", self.dysgraphia_score),
            (DisorderChannel::Dyspraxia, "dyspraxiaScore", self.dyspraxia_score),
            (DisorderChannel::AuditoryProcessing, "auditoryScore", self.auditory_score),
        ]
    }

    /// Checks every score and maps it to its seed value.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` naming the first field outside `0..=2`
    pub fn seed_values(&self) -> Result<Vec<(DisorderChannel, f64)>, ValidationError> {
        self.scores()
            .into_iter()
            .map(|(channel, field, score)| {
                usize::try_from(score)
                    .ok()
                    .and_then(|index| seed_table(channel).get(index))
                    .map(|seed| (channel, *seed))
                    .ok_or_else(|| {
                        ValidationError::out_of_range(field, 0, MAX_QUESTIONNAIRE_SCORE, score)
                    })
            })
            .collect()
    }

    /// Channels the questionnaire flagged at all.
    pub fn flagged(&self) -> Vec<DisorderChannel> {
        self.scores()
            .into_iter()
            .filter(|(_, _, score)| *score > 0)
            .map(|(channel, _, _)| channel)
            .collect()
    }

    /// Validates, then overwrites the seeded channels. Nothing is written
    /// when any score is rejected.
    pub fn seed(&self, ledger: &mut RiskLedger) -> Result<(), ValidationError> {
        for (channel, value) in self.seed_values()? {
            ledger.set(channel, value);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::FixedJitter;

    #[test]
    fn seeds_small_fixed_values() {
        let analysis = QuestionnaireAnalysis {
            dyslexia_score: 2,
            adhd_score: 1,
            auditory_score: 2,
            dysgraphia_score: 1,
            ..Default::default()
        };
        let mut ledger = RiskLedger::new(&mut FixedJitter::new(0.5));
        analysis.seed(&mut ledger).unwrap();

        assert_eq!(ledger.value(DisorderChannel::Dyslexia), 5.0);
        assert_eq!(ledger.value(DisorderChannel::Adhd), 2.0);
        assert_eq!(ledger.value(DisorderChannel::AuditoryProcessing), 3.0);
        assert_eq!(ledger.value(DisorderChannel::Dysgraphia), 3.0);
        assert_eq!(ledger.value(DisorderChannel::Dyscalculia), 0.0);
    }

    #[test]
    fn rejects_score_above_two() {
        let analysis = QuestionnaireAnalysis {
            dyscalculia_score: 3,
            ..Default::default()
        };
        let mut ledger = RiskLedger::new(&mut FixedJitter::new(0.5));
        let err = analysis.seed(&mut ledger).unwrap_err();

        assert_eq!(err, ValidationError::out_of_range("dyscalculiaScore", 0, 2, 3));
        assert_eq!(ledger.value(DisorderChannel::Dyscalculia), 0.0);
    }

    #[test]
    fn rejects_out_of_range_without_writing() {
        let analysis = QuestionnaireAnalysis {
            dyslexia_score: 2,
            dyspraxia_score: 4,
            ..Default::default()
        };
        let mut ledger = RiskLedger::new(&mut FixedJitter::new(0.5));
        let err = analysis.seed(&mut ledger).unwrap_err();

        assert_eq!(err, ValidationError::out_of_range("dyspraxiaScore", 0, 2, 4));
        assert_eq!(ledger.value(DisorderChannel::Dyslexia), 0.0);
    }

    #[test]
    fn rejects_negative_scores() {
        let analysis = QuestionnaireAnalysis {
            adhd_score: -1,
            ..Default::default()
        };
        assert!(analysis.seed_values().is_err());
    }

    #[test]
    fn lists_flagged_channels() {
        let analysis = QuestionnaireAnalysis {
            dyscalculia_score: 1,
            ..Default::default()
        };
        assert_eq!(analysis.flagged(), vec![DisorderChannel::Dyscalculia]);
    }

    #[test]
    fn deserializes_camel_case_with_missing_fields() {
        let analysis: QuestionnaireAnalysis =
            serde_json::from_str(r#"{"dyslexiaScore": 1, "auditoryScore": 2}"#).unwrap();
        assert_eq!(analysis.dyslexia_score, 1);
        assert_eq!(analysis.auditory_score, 2);
        assert_eq!(analysis.adhd_score, 0);
    }
}
