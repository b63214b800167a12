//! Personality questionnaire scoring pipeline.
//!
//! Raw answers flow through trait aggregation into the flat field payload
//! the destination record system expects. The whole pipeline is pure and
//! synchronous: lookup tables are process-wide constants, every failure is
//! a typed error for the caller, and nothing here logs or retries.

pub mod catalog;
pub mod payload;
pub mod scoring;

pub use catalog::{question_catalog, questions, trait_for_question, PersonalityTrait, Question};
pub use payload::{
    build_candidate_payload, interview_completion_fields, resume_fields, trait_field_name,
    ApplicantProfile, CandidateFieldPayload, FieldValue, PayloadError, RECOGNIZED_FIELDS,
};
pub use scoring::{aggregate, AnswerSet, ScoringError, TraitScore, TraitScoreSet};
