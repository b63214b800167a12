use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::dispatch::{
    CandidateDirectory, DirectoryError, InterviewScheduler, Notifier, ResumeStore,
    SubmissionArchive,
};
use super::domain::{CandidateId, QuestionnaireSubmission};
use super::service::{IntakeError, IntakeService};
use crate::workflows::questionnaire::questions;

/// Router builder exposing the questionnaire and candidate endpoints.
pub fn intake_router<D, S, N, A, R>(service: Arc<IntakeService<D, S, N, A, R>>) -> Router
where
    D: CandidateDirectory + 'static,
    S: InterviewScheduler + 'static,
    N: Notifier + 'static,
    A: SubmissionArchive + 'static,
    R: ResumeStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/questionnaire/questions",
            get(questions_handler),
        )
        .route(
            "/api/v1/questionnaire/submissions",
            post(submit_handler::<D, S, N, A, R>),
        )
        .route(
            "/api/v1/candidates/:candidate_id",
            get(candidate_handler::<D, S, N, A, R>),
        )
        .route(
            "/api/v1/webhooks/interview-complete",
            post(interview_complete_handler::<D, S, N, A, R>),
        )
        .with_state(service)
}

pub(crate) async fn questions_handler() -> Response {
    let payload = json!({ "questions": questions() });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn submit_handler<D, S, N, A, R>(
    State(service): State<Arc<IntakeService<D, S, N, A, R>>>,
    axum::Json(submission): axum::Json<QuestionnaireSubmission>,
) -> Response
where
    D: CandidateDirectory + 'static,
    S: InterviewScheduler + 'static,
    N: Notifier + 'static,
    A: SubmissionArchive + 'static,
    R: ResumeStore + 'static,
{
    match service.submit(submission) {
        Ok(receipt) => (StatusCode::ACCEPTED, axum::Json(receipt)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn candidate_handler<D, S, N, A, R>(
    State(service): State<Arc<IntakeService<D, S, N, A, R>>>,
    Path(candidate_id): Path<u64>,
) -> Response
where
    D: CandidateDirectory + 'static,
    S: InterviewScheduler + 'static,
    N: Notifier + 'static,
    A: SubmissionArchive + 'static,
    R: ResumeStore + 'static,
{
    match service.candidate(CandidateId(candidate_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct InterviewCompleteSignal {
    pub(crate) candidate_id: u64,
    pub(crate) interview_id: String,
}

pub(crate) async fn interview_complete_handler<D, S, N, A, R>(
    State(service): State<Arc<IntakeService<D, S, N, A, R>>>,
    axum::Json(signal): axum::Json<InterviewCompleteSignal>,
) -> Response
where
    D: CandidateDirectory + 'static,
    S: InterviewScheduler + 'static,
    N: Notifier + 'static,
    A: SubmissionArchive + 'static,
    R: ResumeStore + 'static,
{
    match service.complete_interview(CandidateId(signal.candidate_id), &signal.interview_id) {
        Ok(record) => {
            let payload = json!({
                "candidate_id": record.id,
                "status": "processed",
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

fn error_response(error: IntakeError) -> Response {
    let body = axum::Json(json!({ "error": error.to_string() }));
    let status = if error.is_rejection() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        match &error {
            IntakeError::Directory(DirectoryError::NotFound) => StatusCode::NOT_FOUND,
            IntakeError::Directory(DirectoryError::Conflict) => StatusCode::CONFLICT,
            _ => StatusCode::BAD_GATEWAY,
        }
    };
    (status, body).into_response()
}
