use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::workflows::questionnaire::{
    AnswerSet, ApplicantProfile, CandidateFieldPayload, FieldValue, PersonalityTrait,
    TraitScoreSet,
};

/// Identifier assigned by the external record-keeping system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CandidateId(pub u64);

/// One complete questionnaire submission as received at the API boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionnaireSubmission {
    #[serde(flatten)]
    pub profile: ApplicantProfile,
    pub answers: AnswerSet,
    /// Present when the candidate already exists in the directory and the
    /// scores should land on that record instead of a fresh one.
    #[serde(default)]
    pub candidate_id: Option<CandidateId>,
    /// Interview position to schedule after the record is written.
    #[serde(default)]
    pub position_id: Option<String>,
    /// Resume file to store and link on the candidate record.
    #[serde(default)]
    pub resume: Option<ResumeUpload>,
}

/// Resume file carried with a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeUpload {
    pub file_name: String,
    pub media_type: String,
    pub data: Vec<u8>,
}

/// Stored-resume handle returned by the resume store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredResume {
    pub file_name: String,
    pub download_url: String,
}

/// Create-or-update request handed to the candidate directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateUpsert {
    pub id: Option<CandidateId>,
    pub email: String,
    pub full_name: Option<String>,
    pub fields: CandidateFieldPayload,
}

/// Directory-backed view of a candidate after an upsert or fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateRecord {
    pub id: CandidateId,
    pub email: String,
    pub full_name: Option<String>,
    pub fields: CandidateFieldPayload,
}

impl CandidateRecord {
    fn flag(&self, name: &str) -> bool {
        self.fields
            .get(name)
            .and_then(FieldValue::as_flag)
            .unwrap_or(false)
    }

    pub fn quiz_completed(&self) -> bool {
        self.flag("quiz_completed")
    }

    pub fn interview_completed(&self) -> bool {
        self.flag("interview_completed")
    }

    pub fn status_view(&self) -> CandidateStatusView {
        let stage = if self.interview_completed() {
            "interview_completed"
        } else if self.quiz_completed() {
            "quiz_completed"
        } else {
            "applied"
        };

        CandidateStatusView {
            candidate_id: self.id,
            email: self.email.clone(),
            full_name: self.full_name.clone(),
            stage,
            fields: self.fields.clone(),
        }
    }
}

/// Sanitized status payload returned by the candidate endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateStatusView {
    pub candidate_id: CandidateId,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    pub stage: &'static str,
    pub fields: CandidateFieldPayload,
}

/// Invitation returned by the interview platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewInvite {
    pub interview_id: String,
    pub interview_url: String,
}

/// Outbound message handed to the notification boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub template: String,
    pub recipient: String,
    pub details: BTreeMap<String, String>,
}

impl Notification {
    pub fn quiz_confirmation(record: &CandidateRecord, invite: Option<&InterviewInvite>) -> Self {
        let mut details = BTreeMap::new();
        if let Some(name) = &record.full_name {
            details.insert("candidate_name".to_string(), name.clone());
        }
        if let Some(invite) = invite {
            details.insert("interview_url".to_string(), invite.interview_url.clone());
        }
        Self {
            template: "quiz_confirmation".to_string(),
            recipient: record.email.clone(),
            details,
        }
    }

    pub fn interview_complete(record: &CandidateRecord, interview_id: &str) -> Self {
        let mut details = BTreeMap::new();
        if let Some(name) = &record.full_name {
            details.insert("candidate_name".to_string(), name.clone());
        }
        details.insert("interview_id".to_string(), interview_id.to_string());
        Self {
            template: "interview_complete".to_string(),
            recipient: record.email.clone(),
            details,
        }
    }
}

/// One archived questionnaire response, shaped for spreadsheet-style
/// storage: fixed columns, blank cells for unscored traits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRow {
    pub received_at: String,
    pub candidate_id: u64,
    pub full_name: String,
    pub email: String,
    pub extraversion: Option<String>,
    pub conscientiousness: Option<String>,
    pub agreeableness: Option<String>,
    pub openness: Option<String>,
    pub emotional_stability: Option<String>,
}

impl SubmissionRow {
    pub fn new(record: &CandidateRecord, scores: &TraitScoreSet, received_at: String) -> Self {
        let rendered =
            |dimension: PersonalityTrait| scores.get(dimension).map(|score| score.formatted());

        Self {
            received_at,
            candidate_id: record.id.0,
            full_name: record.full_name.clone().unwrap_or_default(),
            email: record.email.clone(),
            extraversion: rendered(PersonalityTrait::Extraversion),
            conscientiousness: rendered(PersonalityTrait::Conscientiousness),
            agreeableness: rendered(PersonalityTrait::Agreeableness),
            openness: rendered(PersonalityTrait::Openness),
            emotional_stability: rendered(PersonalityTrait::EmotionalStability),
        }
    }
}

/// Outcome returned to the caller after a successful submission.
#[derive(Debug, Clone, Serialize)]
pub struct IntakeReceipt {
    pub candidate_id: CandidateId,
    pub trait_scores: BTreeMap<&'static str, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume: Option<StoredResume>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interview: Option<InterviewInvite>,
}
