use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use ftis::cases::{case_router, CaseRepository, CaseService};
use ftis::chat::KnowledgeBase;
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_case_routes<R>(
    service: Arc<CaseService<R>>,
    knowledge: Arc<KnowledgeBase>,
) -> axum::Router
where
    R: CaseRepository + 'static,
{
    case_router(service, knowledge)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck(Extension(state): Extension<AppState>) -> Json<serde_json::Value> {
    let store = if state.case_store_ready() {
        "connected"
    } else {
        "initializing"
    };
    Json(json!({ "status": "healthy", "case_store": store }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.case_store_ready();
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
