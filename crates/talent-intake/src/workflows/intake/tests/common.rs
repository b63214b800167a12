use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::workflows::intake::dispatch::{
    ArchiveError, CandidateDirectory, DirectoryError, InterviewScheduler, Notifier, NotifyError,
    ResumeError, ResumeStore, ScheduleError, SubmissionArchive,
};
use crate::workflows::intake::domain::{
    CandidateId, CandidateRecord, CandidateUpsert, InterviewInvite, Notification,
    QuestionnaireSubmission, ResumeUpload, StoredResume, SubmissionRow,
};
use crate::workflows::intake::service::IntakeService;
use crate::workflows::questionnaire::{AnswerSet, ApplicantProfile, CandidateFieldPayload};

pub(super) fn profile() -> ApplicantProfile {
    ApplicantProfile {
        name: "Priya Raman".to_string(),
        email: "priya.raman@example.com".to_string(),
        phone: Some("+353 1 555 0184".to_string()),
        location: Some("Dublin, IE".to_string()),
        position_title: Some("Member Services Intern".to_string()),
        notes: None,
    }
}

pub(super) fn full_answers() -> AnswerSet {
    [
        (1, 4),
        (2, 5),
        (3, 4),
        (4, 5),
        (5, 3),
        (6, 4),
        (7, 5),
        (8, 4),
        (9, 2),
        (10, 4),
    ]
    .into_iter()
    .collect()
}

pub(super) fn submission() -> QuestionnaireSubmission {
    QuestionnaireSubmission {
        profile: profile(),
        answers: full_answers(),
        candidate_id: None,
        position_id: None,
        resume: None,
    }
}

pub(super) fn resume_upload() -> ResumeUpload {
    ResumeUpload {
        file_name: "priya-raman-cv.pdf".to_string(),
        media_type: "application/pdf".to_string(),
        data: b"%PDF-1.4 sample".to_vec(),
    }
}

pub(super) type MemoryService =
    IntakeService<MemoryDirectory, MemoryScheduler, MemoryNotifier, MemoryArchive, MemoryResumes>;

pub(super) struct Fixture {
    pub(super) directory: Arc<MemoryDirectory>,
    pub(super) scheduler: Arc<MemoryScheduler>,
    pub(super) notifier: Arc<MemoryNotifier>,
    pub(super) archive: Arc<MemoryArchive>,
    pub(super) resumes: Arc<MemoryResumes>,
    pub(super) service: Arc<MemoryService>,
}

pub(super) fn fixture() -> Fixture {
    let directory = Arc::new(MemoryDirectory::default());
    let scheduler = Arc::new(MemoryScheduler::default());
    let notifier = Arc::new(MemoryNotifier::default());
    let archive = Arc::new(MemoryArchive::default());
    let resumes = Arc::new(MemoryResumes::default());
    let service = Arc::new(IntakeService::new(
        directory.clone(),
        scheduler.clone(),
        notifier.clone(),
        archive.clone(),
        resumes.clone(),
    ));
    Fixture {
        directory,
        scheduler,
        notifier,
        archive,
        resumes,
        service,
    }
}

#[derive(Default)]
pub(super) struct MemoryDirectory {
    records: Mutex<HashMap<CandidateId, CandidateRecord>>,
    sequence: AtomicU64,
}

impl MemoryDirectory {
    pub(super) fn records(&self) -> Vec<CandidateRecord> {
        self.records.lock().expect("lock").values().cloned().collect()
    }
}

impl CandidateDirectory for MemoryDirectory {
    fn upsert(&self, request: CandidateUpsert) -> Result<CandidateRecord, DirectoryError> {
        let mut guard = self.records.lock().expect("lock");
        match request.id {
            Some(id) => {
                let existing = guard.get_mut(&id).ok_or(DirectoryError::NotFound)?;
                existing.email = request.email;
                existing.full_name = request.full_name;
                existing.fields.merge(request.fields);
                Ok(existing.clone())
            }
            None => {
                let id = CandidateId(9000 + self.sequence.fetch_add(1, Ordering::Relaxed));
                let record = CandidateRecord {
                    id,
                    email: request.email,
                    full_name: request.full_name,
                    fields: request.fields,
                };
                guard.insert(id, record.clone());
                Ok(record)
            }
        }
    }

    fn fetch(&self, id: CandidateId) -> Result<Option<CandidateRecord>, DirectoryError> {
        let guard = self.records.lock().expect("lock");
        Ok(guard.get(&id).cloned())
    }

    fn update_fields(
        &self,
        id: CandidateId,
        fields: CandidateFieldPayload,
    ) -> Result<CandidateRecord, DirectoryError> {
        let mut guard = self.records.lock().expect("lock");
        let record = guard.get_mut(&id).ok_or(DirectoryError::NotFound)?;
        record.fields.merge(fields);
        Ok(record.clone())
    }
}

#[derive(Default)]
pub(super) struct MemoryScheduler {
    invites: Mutex<Vec<(String, CandidateId)>>,
}

impl MemoryScheduler {
    pub(super) fn invites(&self) -> Vec<(String, CandidateId)> {
        self.invites.lock().expect("lock").clone()
    }
}

impl InterviewScheduler for MemoryScheduler {
    fn invite(
        &self,
        position_id: &str,
        candidate: &CandidateRecord,
    ) -> Result<InterviewInvite, ScheduleError> {
        let mut guard = self.invites.lock().expect("lock");
        guard.push((position_id.to_string(), candidate.id));
        Ok(InterviewInvite {
            interview_id: format!("int-{:06}", guard.len()),
            interview_url: format!("https://interviews.example.com/{position_id}/{}", candidate.id.0),
        })
    }
}

#[derive(Default)]
pub(super) struct MemoryNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl MemoryNotifier {
    pub(super) fn sent(&self) -> Vec<Notification> {
        self.sent.lock().expect("lock").clone()
    }
}

impl Notifier for MemoryNotifier {
    fn send(&self, notification: Notification) -> Result<(), NotifyError> {
        self.sent.lock().expect("lock").push(notification);
        Ok(())
    }
}

#[derive(Default)]
pub(super) struct MemoryArchive {
    rows: Mutex<Vec<SubmissionRow>>,
}

impl MemoryArchive {
    pub(super) fn rows(&self) -> Vec<SubmissionRow> {
        self.rows.lock().expect("lock").clone()
    }
}

impl SubmissionArchive for MemoryArchive {
    fn append(&self, row: SubmissionRow) -> Result<(), ArchiveError> {
        self.rows.lock().expect("lock").push(row);
        Ok(())
    }
}

#[derive(Default)]
pub(super) struct MemoryResumes {
    stored: Mutex<Vec<(CandidateId, String)>>,
}

impl MemoryResumes {
    pub(super) fn stored(&self) -> Vec<(CandidateId, String)> {
        self.stored.lock().expect("lock").clone()
    }
}

impl ResumeStore for MemoryResumes {
    fn store(
        &self,
        candidate: &CandidateRecord,
        resume: &ResumeUpload,
    ) -> Result<StoredResume, ResumeError> {
        if resume.data.is_empty() {
            return Err(ResumeError::EmptyFile);
        }
        let mut guard = self.stored.lock().expect("lock");
        guard.push((candidate.id, resume.file_name.clone()));
        Ok(StoredResume {
            file_name: resume.file_name.clone(),
            download_url: format!("/uploads/resumes/{}", resume.file_name),
        })
    }
}

pub(super) struct FailingResumes;

impl ResumeStore for FailingResumes {
    fn store(
        &self,
        _candidate: &CandidateRecord,
        _resume: &ResumeUpload,
    ) -> Result<StoredResume, ResumeError> {
        Err(ResumeError::Storage("disk full".to_string()))
    }
}

pub(super) struct UnavailableDirectory;

impl CandidateDirectory for UnavailableDirectory {
    fn upsert(&self, _request: CandidateUpsert) -> Result<CandidateRecord, DirectoryError> {
        Err(DirectoryError::Unavailable("ats offline".to_string()))
    }

    fn fetch(&self, _id: CandidateId) -> Result<Option<CandidateRecord>, DirectoryError> {
        Err(DirectoryError::Unavailable("ats offline".to_string()))
    }

    fn update_fields(
        &self,
        _id: CandidateId,
        _fields: CandidateFieldPayload,
    ) -> Result<CandidateRecord, DirectoryError> {
        Err(DirectoryError::Unavailable("ats offline".to_string()))
    }
}

pub(super) struct FailingScheduler;

impl InterviewScheduler for FailingScheduler {
    fn invite(
        &self,
        position_id: &str,
        _candidate: &CandidateRecord,
    ) -> Result<InterviewInvite, ScheduleError> {
        Err(ScheduleError::UnknownPosition(position_id.to_string()))
    }
}
