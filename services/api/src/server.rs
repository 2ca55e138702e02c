use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryCaseRepository};
use crate::routes::with_case_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Utc;
use ftis::cases::{seed_cases, CaseService};
use ftis::chat::KnowledgeBase;
use ftis::config::AppConfig;
use ftis::error::AppError;
use ftis::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
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

    let repository = Arc::new(InMemoryCaseRepository::default());
    let case_service = Arc::new(CaseService::new(repository));
    if config.demo.seed_cases > 0 {
        let seeded = seed_cases(
            &case_service,
            config.demo.seed_cases,
            config.demo.seed,
            Utc::now(),
        )?;
        info!(
            cases = seeded.len(),
            seed = config.demo.seed,
            "seeded sample cases"
        );
    }

    let knowledge = Arc::new(KnowledgeBase::standard());
    info!(topics = knowledge.len(), "chat knowledge base loaded");

    let app = with_case_routes(case_service, knowledge)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "fever triage service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
