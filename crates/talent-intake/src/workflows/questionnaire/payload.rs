use std::collections::BTreeMap;
use std::sync::OnceLock;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::catalog::PersonalityTrait;
use super::scoring::TraitScoreSet;

/// Identity and contact details collected alongside the questionnaire.
/// Values arrive untrimmed; normalization happens during payload assembly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub position_title: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl ApplicantProfile {
    pub fn trimmed_email(&self) -> Option<&str> {
        non_empty(&self.email)
    }

    pub fn trimmed_name(&self) -> Option<&str> {
        non_empty(&self.name)
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Primitive value shapes the destination record system accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    Number(f64),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(value) => Some(*value),
            _ => None,
        }
    }
}

/// Destination field names for each trait average.
pub fn trait_field_name(dimension: PersonalityTrait) -> &'static str {
    static TRAIT_FIELDS: OnceLock<BTreeMap<PersonalityTrait, &'static str>> = OnceLock::new();
    TRAIT_FIELDS.get_or_init(|| {
        BTreeMap::from([
            (PersonalityTrait::Extraversion, "personality_extraversion"),
            (
                PersonalityTrait::Conscientiousness,
                "personality_conscientiousness",
            ),
            (PersonalityTrait::Agreeableness, "personality_agreeableness"),
            (PersonalityTrait::Openness, "personality_openness"),
            (
                PersonalityTrait::EmotionalStability,
                "personality_emotionalstability",
            ),
        ])
    })[&dimension]
}

/// Every field name the destination system recognizes. Payloads are built
/// exclusively from this table, so unknown keys can never be emitted.
pub const RECOGNIZED_FIELDS: &[&str] = &[
    "personality_extraversion",
    "personality_conscientiousness",
    "personality_agreeableness",
    "personality_openness",
    "personality_emotionalstability",
    "quiz_completed",
    "quiz_completed_at",
    "full_name",
    "email",
    "phone",
    "candidate_location",
    "position_applied",
    "notes",
    "resume_url",
    "interview_completed",
    "interview_completed_at",
];

/// Flat field map sent to the external record-keeping system.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CandidateFieldPayload {
    fields: BTreeMap<&'static str, FieldValue>,
}

impl CandidateFieldPayload {
    fn insert(&mut self, name: &'static str, value: FieldValue) {
        debug_assert!(RECOGNIZED_FIELDS.contains(&name));
        self.fields.insert(name, value);
    }

    fn insert_text(&mut self, name: &'static str, value: &str) {
        self.insert(name, FieldValue::Text(value.to_string()));
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> + '_ {
        self.fields.iter().map(|(name, value)| (*name, value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Overlay `other` on top of this payload, as the destination system
    /// does for partial record updates.
    pub fn merge(&mut self, other: CandidateFieldPayload) {
        self.fields.extend(other.fields);
    }
}

/// Errors raised during payload assembly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PayloadError {
    #[error("identity field '{field}' is required to address the candidate record")]
    MissingIdentityField { field: &'static str },
}

/// Assemble the destination record payload from aggregated scores and the
/// applicant profile.
///
/// Traits absent from the score set are omitted entirely so the
/// destination keeps its "field not set" semantics; identity values are
/// trimmed and dropped when empty. `quiz_completed_at` is the assembly
/// time, not the original submission time: callers needing event-time
/// fidelity must carry their own timestamp.
pub fn build_candidate_payload(
    scores: &TraitScoreSet,
    profile: &ApplicantProfile,
) -> Result<CandidateFieldPayload, PayloadError> {
    let email = profile
        .trimmed_email()
        .ok_or(PayloadError::MissingIdentityField { field: "email" })?;

    let mut payload = CandidateFieldPayload::default();
    payload.insert_text("email", email);

    if let Some(name) = profile.trimmed_name() {
        payload.insert_text("full_name", name);
    }
    if let Some(phone) = profile.phone.as_deref().and_then(non_empty) {
        payload.insert_text("phone", phone);
    }
    if let Some(location) = profile.location.as_deref().and_then(non_empty) {
        payload.insert_text("candidate_location", location);
    }
    if let Some(position) = profile.position_title.as_deref().and_then(non_empty) {
        payload.insert_text("position_applied", position);
    }
    if let Some(notes) = profile.notes.as_deref().and_then(non_empty) {
        payload.insert_text("notes", notes);
    }

    for (dimension, score) in scores.iter() {
        payload.insert(
            trait_field_name(dimension),
            FieldValue::Text(score.formatted()),
        );
    }

    payload.insert("quiz_completed", FieldValue::Flag(true));
    payload.insert(
        "quiz_completed_at",
        FieldValue::Text(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
    );

    Ok(payload)
}

/// Field overlay recording where a stored resume can be fetched.
pub fn resume_fields(download_url: &str) -> CandidateFieldPayload {
    let mut payload = CandidateFieldPayload::default();
    payload.insert_text("resume_url", download_url);
    payload
}

/// Field overlay applied when the interview platform signals completion.
pub fn interview_completion_fields() -> CandidateFieldPayload {
    let mut payload = CandidateFieldPayload::default();
    payload.insert("interview_completed", FieldValue::Flag(true));
    payload.insert(
        "interview_completed_at",
        FieldValue::Text(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
    );
    payload
}
