use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// One of the five personality dimensions scored by the questionnaire.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PersonalityTrait {
    Extraversion,
    Conscientiousness,
    Agreeableness,
    Openness,
    EmotionalStability,
}

impl PersonalityTrait {
    pub const ALL: [PersonalityTrait; 5] = [
        PersonalityTrait::Extraversion,
        PersonalityTrait::Conscientiousness,
        PersonalityTrait::Agreeableness,
        PersonalityTrait::Openness,
        PersonalityTrait::EmotionalStability,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PersonalityTrait::Extraversion => "extraversion",
            PersonalityTrait::Conscientiousness => "conscientiousness",
            PersonalityTrait::Agreeableness => "agreeableness",
            PersonalityTrait::Openness => "openness",
            PersonalityTrait::EmotionalStability => "emotional_stability",
        }
    }
}

/// Catalog entry: the prompt shown to the candidate and the trait the
/// answer feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: u16,
    pub prompt: &'static str,
    pub dimension: PersonalityTrait,
}

/// Inclusive rating bounds accepted for every question.
pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

static QUESTION_CATALOG: OnceLock<BTreeMap<u16, Question>> = OnceLock::new();

/// The fixed question set, keyed by question id. Initialized once and never
/// mutated; answer sets referencing ids outside this table are scored
/// without them.
pub fn question_catalog() -> &'static BTreeMap<u16, Question> {
    QUESTION_CATALOG.get_or_init(|| {
        const QUESTIONS: &[(u16, &str, PersonalityTrait)] = &[
            (
                1,
                "I enjoy meeting new people and networking at events.",
                PersonalityTrait::Extraversion,
            ),
            (
                2,
                "I always plan my tasks and meet deadlines ahead of time.",
                PersonalityTrait::Conscientiousness,
            ),
            (
                3,
                "I prefer collaborating with a team rather than working alone.",
                PersonalityTrait::Agreeableness,
            ),
            (
                4,
                "I like exploring new ideas and learning emerging technologies.",
                PersonalityTrait::Openness,
            ),
            (
                5,
                "I stay calm and focused during stressful situations.",
                PersonalityTrait::EmotionalStability,
            ),
            (
                6,
                "I take initiative to solve problems without being asked.",
                PersonalityTrait::Conscientiousness,
            ),
            (
                7,
                "I value feedback from others to improve my performance.",
                PersonalityTrait::Agreeableness,
            ),
            (
                8,
                "I adapt quickly to changes in plans or environments.",
                PersonalityTrait::Openness,
            ),
            (
                9,
                "I feel energized after social interactions at work.",
                PersonalityTrait::Extraversion,
            ),
            (
                10,
                "I manage my emotions well when facing criticism.",
                PersonalityTrait::EmotionalStability,
            ),
        ];

        QUESTIONS
            .iter()
            .map(|&(id, prompt, dimension)| {
                (
                    id,
                    Question {
                        id,
                        prompt,
                        dimension,
                    },
                )
            })
            .collect()
    })
}

/// Trait assignment for a question id, if the id is part of the catalog.
pub fn trait_for_question(question_id: u16) -> Option<PersonalityTrait> {
    question_catalog()
        .get(&question_id)
        .map(|question| question.dimension)
}

/// Catalog in presentation order for the questionnaire endpoint.
pub fn questions() -> Vec<Question> {
    question_catalog().values().copied().collect()
}
