//! Collaborator boundaries for everything downstream of the pipeline.
//!
//! The core only ever hands finished payloads across these seams; wire
//! protocols, authentication, and retry policy belong to the
//! implementations in the API service crate.

use super::domain::{
    CandidateId, CandidateRecord, CandidateUpsert, InterviewInvite, Notification, ResumeUpload,
    StoredResume, SubmissionRow,
};
use crate::workflows::questionnaire::CandidateFieldPayload;

/// The applicant-tracking system of record.
pub trait CandidateDirectory: Send + Sync {
    /// Create the candidate, or overlay fields on an existing record when
    /// an id is supplied.
    fn upsert(&self, request: CandidateUpsert) -> Result<CandidateRecord, DirectoryError>;
    fn fetch(&self, id: CandidateId) -> Result<Option<CandidateRecord>, DirectoryError>;
    /// Overlay a partial field update on an existing record.
    fn update_fields(
        &self,
        id: CandidateId,
        fields: CandidateFieldPayload,
    ) -> Result<CandidateRecord, DirectoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("candidate record already exists")]
    Conflict,
    #[error("candidate record not found")]
    NotFound,
    #[error("directory unavailable: {0}")]
    Unavailable(String),
}

/// Storage for uploaded resume files, addressable by download URL so the
/// link can be written back onto the candidate record.
pub trait ResumeStore: Send + Sync {
    fn store(
        &self,
        candidate: &CandidateRecord,
        resume: &ResumeUpload,
    ) -> Result<StoredResume, ResumeError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ResumeError {
    #[error("resume upload contained no data")]
    EmptyFile,
    #[error("resume storage failed: {0}")]
    Storage(String),
}

/// The video-interview platform.
pub trait InterviewScheduler: Send + Sync {
    fn invite(
        &self,
        position_id: &str,
        candidate: &CandidateRecord,
    ) -> Result<InterviewInvite, ScheduleError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("unknown interview position '{0}'")]
    UnknownPosition(String),
    #[error("interview platform unavailable: {0}")]
    Unavailable(String),
}

/// Outbound candidate email.
pub trait Notifier: Send + Sync {
    fn send(&self, notification: Notification) -> Result<(), NotifyError>;
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

/// Append-only log of scored submissions for operator review.
pub trait SubmissionArchive: Send + Sync {
    fn append(&self, row: SubmissionRow) -> Result<(), ArchiveError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("archive storage failed: {0}")]
    Storage(String),
}
