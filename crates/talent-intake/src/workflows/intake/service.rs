use std::sync::Arc;

use chrono::{SecondsFormat, Utc};

use super::dispatch::{
    ArchiveError, CandidateDirectory, DirectoryError, InterviewScheduler, Notifier, NotifyError,
    ResumeError, ResumeStore, ScheduleError, SubmissionArchive,
};
use super::domain::{
    CandidateId, CandidateRecord, CandidateUpsert, IntakeReceipt, Notification,
    QuestionnaireSubmission, SubmissionRow,
};
use crate::workflows::questionnaire::{
    aggregate, build_candidate_payload, interview_completion_fields, resume_fields, PayloadError,
    ScoringError,
};

/// Facade composing the scoring pipeline with the collaborator boundaries.
///
/// Validation happens strictly before dispatch: a submission that fails
/// scoring or payload assembly never reaches the directory, the scheduler,
/// or the notifier.
pub struct IntakeService<D, S, N, A, R> {
    directory: Arc<D>,
    scheduler: Arc<S>,
    notifier: Arc<N>,
    archive: Arc<A>,
    resumes: Arc<R>,
}

impl<D, S, N, A, R> IntakeService<D, S, N, A, R>
where
    D: CandidateDirectory + 'static,
    S: InterviewScheduler + 'static,
    N: Notifier + 'static,
    A: SubmissionArchive + 'static,
    R: ResumeStore + 'static,
{
    pub fn new(
        directory: Arc<D>,
        scheduler: Arc<S>,
        notifier: Arc<N>,
        archive: Arc<A>,
        resumes: Arc<R>,
    ) -> Self {
        Self {
            directory,
            scheduler,
            notifier,
            archive,
            resumes,
        }
    }

    /// Score a submission, write the mapped payload to the directory, and
    /// trigger the dependent actions (resume storage, archive row,
    /// interview invite, confirmation email).
    pub fn submit(
        &self,
        submission: QuestionnaireSubmission,
    ) -> Result<IntakeReceipt, IntakeError> {
        let scores = aggregate(&submission.answers)?;
        let payload = build_candidate_payload(&scores, &submission.profile)?;

        // build_candidate_payload already rejected a blank email.
        let email = submission
            .profile
            .trimmed_email()
            .ok_or(PayloadError::MissingIdentityField { field: "email" })?
            .to_string();
        let full_name = submission.profile.trimmed_name().map(str::to_string);

        let mut record = self.directory.upsert(CandidateUpsert {
            id: submission.candidate_id,
            email,
            full_name,
            fields: payload,
        })?;

        let resume = match &submission.resume {
            Some(upload) => {
                let stored = self.resumes.store(&record, upload)?;
                record = self
                    .directory
                    .update_fields(record.id, resume_fields(&stored.download_url))?;
                Some(stored)
            }
            None => None,
        };

        let received_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        self.archive
            .append(SubmissionRow::new(&record, &scores, received_at))?;

        let interview = match submission.position_id.as_deref() {
            Some(position_id) => Some(self.scheduler.invite(position_id, &record)?),
            None => None,
        };

        self.notifier
            .send(Notification::quiz_confirmation(&record, interview.as_ref()))?;

        Ok(IntakeReceipt {
            candidate_id: record.id,
            trait_scores: scores.formatted_map(),
            resume,
            interview,
        })
    }

    /// Fetch a candidate for the status endpoints.
    pub fn candidate(&self, id: CandidateId) -> Result<CandidateRecord, IntakeError> {
        let record = self
            .directory
            .fetch(id)?
            .ok_or(DirectoryError::NotFound)?;
        Ok(record)
    }

    /// Webhook-driven follow-up: mark the interview complete on the
    /// candidate record and send the completion message.
    pub fn complete_interview(
        &self,
        candidate_id: CandidateId,
        interview_id: &str,
    ) -> Result<CandidateRecord, IntakeError> {
        let record = self
            .directory
            .update_fields(candidate_id, interview_completion_fields())?;

        self.notifier
            .send(Notification::interview_complete(&record, interview_id))?;

        Ok(record)
    }
}

/// Error raised by the intake facade. Pipeline failures and collaborator
/// failures stay distinguishable so the HTTP layer can map them to
/// different status codes.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error(transparent)]
    Payload(#[from] PayloadError),
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error(transparent)]
    Resume(#[from] ResumeError),
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    #[error(transparent)]
    Notify(#[from] NotifyError),
    #[error(transparent)]
    Archive(#[from] ArchiveError),
}

impl IntakeError {
    /// True for failures the candidate can fix by correcting the
    /// submission, as opposed to collaborator outages.
    pub fn is_rejection(&self) -> bool {
        matches!(self, IntakeError::Scoring(_) | IntakeError::Payload(_))
    }
}
