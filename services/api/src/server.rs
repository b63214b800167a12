use crate::cli::ServeArgs;
use crate::infra::{
    ApiResumeStore, ApiSubmissionArchive, AppState, InMemoryCandidateDirectory,
    StaticLinkScheduler, TracingNotifier,
};
use crate::routes::with_intake_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use talent_intake::config::AppConfig;
use talent_intake::error::AppError;
use talent_intake::telemetry;
use talent_intake::workflows::intake::IntakeService;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let directory = Arc::new(InMemoryCandidateDirectory::default());
    let scheduler = Arc::new(StaticLinkScheduler::new(config.interview.base_url.clone()));
    let notifier = Arc::new(TracingNotifier);
    let archive = Arc::new(ApiSubmissionArchive::from_path(config.archive.path.clone()));
    let resumes = Arc::new(ApiResumeStore::from_dir(config.archive.resume_dir.clone()));
    let intake_service = Arc::new(IntakeService::new(
        directory, scheduler, notifier, archive, resumes,
    ));

    let app = with_intake_routes(intake_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "candidate intake orchestrator ready");

    axum::serve(listener, app).await?;
    Ok(())
}
