use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::catalog::{trait_for_question, PersonalityTrait, MAX_RATING, MIN_RATING};

/// Complete set of question-id to rating pairs from one submission.
/// Ratings are carried as `i64` so out-of-range values survive until
/// validation and can be reported verbatim.
pub type AnswerSet = BTreeMap<u16, i64>;

/// Accumulated ratings for a single trait. The exact `sum`/`count` pair is
/// kept instead of a float so the final two-decimal rendering can round
/// over integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitScore {
    sum: u32,
    count: u32,
}

impl TraitScore {
    fn accumulate(&mut self, rating: i64) {
        self.sum += rating as u32;
        self.count += 1;
    }

    pub fn sum(&self) -> u32 {
        self.sum
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Average rating for the trait. Scores only exist for traits with at
    /// least one answer, so the division is always defined.
    pub fn average(&self) -> f64 {
        f64::from(self.sum) / f64::from(self.count)
    }

    /// Two-decimal rendering with half-away-from-zero rounding, computed
    /// over integers: `round(sum * 100 / count)` without ever leaving exact
    /// arithmetic. An average of 3.835 renders as "3.84" on every platform.
    pub fn formatted(&self) -> String {
        let sum = u64::from(self.sum);
        let count = u64::from(self.count);
        let hundredths = (sum * 200 + count) / (count * 2);
        format!("{}.{:02}", hundredths / 100, hundredths % 100)
    }
}

/// Per-trait averaged ratings derived from one answer set. Traits that
/// received no answers are absent, never present as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TraitScoreSet {
    scores: BTreeMap<PersonalityTrait, TraitScore>,
}

impl TraitScoreSet {
    pub fn get(&self, dimension: PersonalityTrait) -> Option<TraitScore> {
        self.scores.get(&dimension).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PersonalityTrait, TraitScore)> + '_ {
        self.scores.iter().map(|(dimension, score)| (*dimension, *score))
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Trait label to formatted average, for receipts and archive rows.
    pub fn formatted_map(&self) -> BTreeMap<&'static str, String> {
        self.scores
            .iter()
            .map(|(dimension, score)| (dimension.label(), score.formatted()))
            .collect()
    }
}

/// Validation errors raised while reducing an answer set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    #[error("question {question_id} has rating {value}, expected an integer in {MIN_RATING}..={MAX_RATING}")]
    InvalidRating { question_id: u16, value: i64 },
    #[error("submission contained no answers")]
    EmptyAnswerSet,
}

/// Reduce an answer set into per-trait averages.
///
/// Every rating is validated before any accumulation happens, so a single
/// out-of-range value rejects the whole submission without producing a
/// partial score set. Question ids missing from the catalog are skipped:
/// they belong to categories this pipeline does not score.
pub fn aggregate(answers: &AnswerSet) -> Result<TraitScoreSet, ScoringError> {
    if answers.is_empty() {
        return Err(ScoringError::EmptyAnswerSet);
    }

    for (&question_id, &value) in answers {
        if !(MIN_RATING..=MAX_RATING).contains(&value) {
            return Err(ScoringError::InvalidRating { question_id, value });
        }
    }

    let mut scores: BTreeMap<PersonalityTrait, TraitScore> = BTreeMap::new();
    for (&question_id, &value) in answers {
        if let Some(dimension) = trait_for_question(question_id) {
            scores
                .entry(dimension)
                .or_insert(TraitScore { sum: 0, count: 0 })
                .accumulate(value);
        }
    }

    Ok(TraitScoreSet { scores })
}
