use std::collections::HashMap;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use metrics_exporter_prometheus::PrometheusHandle;
use talent_intake::workflows::intake::{
    ArchiveError, CandidateDirectory, CandidateId, CandidateRecord, CandidateUpsert,
    DirectoryError, InterviewInvite, InterviewScheduler, Notification, Notifier, NotifyError,
    ResumeError, ResumeStore, ResumeUpload, ScheduleError, StoredResume, SubmissionArchive,
    SubmissionRow,
};
use talent_intake::workflows::questionnaire::CandidateFieldPayload;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Directory used when no ATS credentials are configured: behaves like the
/// real system of record (create assigns an id, update overlays fields)
/// but keeps everything in process memory.
#[derive(Default)]
pub(crate) struct InMemoryCandidateDirectory {
    records: Mutex<HashMap<CandidateId, CandidateRecord>>,
    sequence: AtomicU64,
}

impl CandidateDirectory for InMemoryCandidateDirectory {
    fn upsert(&self, request: CandidateUpsert) -> Result<CandidateRecord, DirectoryError> {
        let mut guard = self.records.lock().expect("directory mutex poisoned");
        match request.id {
            Some(id) => {
                let record = guard.get_mut(&id).ok_or(DirectoryError::NotFound)?;
                record.email = request.email;
                record.full_name = request.full_name;
                record.fields.merge(request.fields);
                Ok(record.clone())
            }
            None => {
                let id = CandidateId(1000 + self.sequence.fetch_add(1, Ordering::Relaxed));
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
        let guard = self.records.lock().expect("directory mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn update_fields(
        &self,
        id: CandidateId,
        fields: CandidateFieldPayload,
    ) -> Result<CandidateRecord, DirectoryError> {
        let mut guard = self.records.lock().expect("directory mutex poisoned");
        let record = guard.get_mut(&id).ok_or(DirectoryError::NotFound)?;
        record.fields.merge(fields);
        Ok(record.clone())
    }
}

/// Scheduler used when no interview platform key is configured: mints
/// deterministic invite links under the configured base URL so the rest of
/// the flow can be exercised end to end.
pub(crate) struct StaticLinkScheduler {
    base_url: String,
    sequence: AtomicU64,
}

impl StaticLinkScheduler {
    pub(crate) fn new(base_url: String) -> Self {
        Self {
            base_url,
            sequence: AtomicU64::new(1),
        }
    }
}

impl InterviewScheduler for StaticLinkScheduler {
    fn invite(
        &self,
        position_id: &str,
        candidate: &CandidateRecord,
    ) -> Result<InterviewInvite, ScheduleError> {
        if position_id.trim().is_empty() {
            return Err(ScheduleError::UnknownPosition(position_id.to_string()));
        }
        let interview_id = format!("int-{:06}", self.sequence.fetch_add(1, Ordering::Relaxed));
        Ok(InterviewInvite {
            interview_url: format!(
                "{}/interviews/{position_id}/{}",
                self.base_url.trim_end_matches('/'),
                candidate.id.0
            ),
            interview_id,
        })
    }
}

/// Notifier used when no email provider key is configured: the message is
/// logged instead of delivered so local runs stay observable.
#[derive(Default)]
pub(crate) struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn send(&self, notification: Notification) -> Result<(), NotifyError> {
        info!(
            template = %notification.template,
            recipient = %notification.recipient,
            "notification dispatched to log sink"
        );
        Ok(())
    }
}

/// Resume files written under a local uploads directory, named
/// `{candidate}_{millis}.{ext}` so repeat uploads never collide, and
/// addressed by a `/uploads/resumes/` download path.
pub(crate) struct FileResumeStore {
    dir: PathBuf,
}

impl FileResumeStore {
    pub(crate) fn new(dir: PathBuf) -> Self {
        Self { dir }
    }
}

impl ResumeStore for FileResumeStore {
    fn store(
        &self,
        candidate: &CandidateRecord,
        resume: &ResumeUpload,
    ) -> Result<StoredResume, ResumeError> {
        if resume.data.is_empty() {
            return Err(ResumeError::EmptyFile);
        }

        let extension = resume
            .file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .unwrap_or("bin");
        let file_name = format!(
            "{}_{}.{extension}",
            candidate.id.0,
            Utc::now().timestamp_millis()
        );

        std::fs::create_dir_all(&self.dir)
            .map_err(|err| ResumeError::Storage(err.to_string()))?;
        std::fs::write(self.dir.join(&file_name), &resume.data)
            .map_err(|err| ResumeError::Storage(err.to_string()))?;

        Ok(StoredResume {
            download_url: format!("/uploads/resumes/{file_name}"),
            file_name,
        })
    }
}

/// In-memory fallback when no resume directory is configured.
#[derive(Default)]
pub(crate) struct InMemoryResumeStore {
    stored: Mutex<Vec<String>>,
}

impl ResumeStore for InMemoryResumeStore {
    fn store(
        &self,
        candidate: &CandidateRecord,
        resume: &ResumeUpload,
    ) -> Result<StoredResume, ResumeError> {
        if resume.data.is_empty() {
            return Err(ResumeError::EmptyFile);
        }
        let file_name = format!("{}_{}", candidate.id.0, resume.file_name);
        self.stored
            .lock()
            .expect("resume mutex poisoned")
            .push(file_name.clone());
        Ok(StoredResume {
            download_url: format!("/uploads/resumes/{file_name}"),
            file_name,
        })
    }
}

/// Runtime resume-store selection made once at startup from configuration.
pub(crate) enum ApiResumeStore {
    File(FileResumeStore),
    Memory(InMemoryResumeStore),
}

impl ApiResumeStore {
    pub(crate) fn from_dir(dir: Option<PathBuf>) -> Self {
        match dir {
            Some(dir) => Self::File(FileResumeStore::new(dir)),
            None => Self::Memory(InMemoryResumeStore::default()),
        }
    }
}

impl ResumeStore for ApiResumeStore {
    fn store(
        &self,
        candidate: &CandidateRecord,
        resume: &ResumeUpload,
    ) -> Result<StoredResume, ResumeError> {
        match self {
            Self::File(store) => store.store(candidate, resume),
            Self::Memory(store) => store.store(candidate, resume),
        }
    }
}

/// Append-only CSV archive of scored submissions, one row per submission
/// with blank cells for unscored traits.
pub(crate) struct CsvSubmissionArchive {
    path: PathBuf,
}

impl CsvSubmissionArchive {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SubmissionArchive for CsvSubmissionArchive {
    fn append(&self, row: SubmissionRow) -> Result<(), ArchiveError> {
        let write_headers = self
            .path
            .metadata()
            .map(|meta| meta.len() == 0)
            .unwrap_or(true);

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|err| ArchiveError::Storage(err.to_string()))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(write_headers)
            .from_writer(file);
        writer
            .serialize(row)
            .map_err(|err| ArchiveError::Storage(err.to_string()))?;
        writer
            .flush()
            .map_err(|err| ArchiveError::Storage(err.to_string()))
    }
}

/// In-memory fallback when no archive path is configured.
#[derive(Default)]
pub(crate) struct InMemorySubmissionArchive {
    rows: Mutex<Vec<SubmissionRow>>,
}

impl SubmissionArchive for InMemorySubmissionArchive {
    fn append(&self, row: SubmissionRow) -> Result<(), ArchiveError> {
        self.rows.lock().expect("archive mutex poisoned").push(row);
        Ok(())
    }
}

/// Runtime archive selection made once at startup from configuration.
pub(crate) enum ApiSubmissionArchive {
    Csv(CsvSubmissionArchive),
    Memory(InMemorySubmissionArchive),
}

impl ApiSubmissionArchive {
    pub(crate) fn from_path(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => Self::Csv(CsvSubmissionArchive::new(path)),
            None => Self::Memory(InMemorySubmissionArchive::default()),
        }
    }
}

impl SubmissionArchive for ApiSubmissionArchive {
    fn append(&self, row: SubmissionRow) -> Result<(), ArchiveError> {
        match self {
            Self::Csv(archive) => archive.append(row),
            Self::Memory(archive) => archive.append(row),
        }
    }
}
