//! Candidate intake orchestration around the scoring pipeline.
//!
//! The service facade runs the pure pipeline, writes the mapped payload to
//! the candidate directory, and fans out to the dependent actions
//! (resume storage, submission archive, interview invite, confirmation
//! email) behind trait seams so the whole workflow is testable without
//! network access.

pub mod dispatch;
pub mod domain;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use dispatch::{
    ArchiveError, CandidateDirectory, DirectoryError, InterviewScheduler, Notifier, NotifyError,
    ResumeError, ResumeStore, ScheduleError, SubmissionArchive,
};
pub use domain::{
    CandidateId, CandidateRecord, CandidateStatusView, CandidateUpsert, IntakeReceipt,
    InterviewInvite, Notification, QuestionnaireSubmission, ResumeUpload, StoredResume,
    SubmissionRow,
};
pub use router::intake_router;
pub use service::{IntakeError, IntakeService};
