use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use super::domain::{CaseFilter, CaseId, CaseIntake, CaseQuery, CaseUpdate};
use super::repository::{CaseRepository, RepositoryError};
use super::service::{CaseService, CaseServiceError};
use crate::chat::{chat_respond, suggestions, KnowledgeBase};

/// Shared handler state: the case service and the assistant's knowledge base.
pub struct CaseApiState<R> {
    pub service: Arc<CaseService<R>>,
    pub knowledge: Arc<KnowledgeBase>,
}

impl<R> Clone for CaseApiState<R> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            knowledge: Arc::clone(&self.knowledge),
        }
    }
}

/// Intake, dashboard, and assistant endpoints.
pub fn case_router<R>(service: Arc<CaseService<R>>, knowledge: Arc<KnowledgeBase>) -> Router
where
    R: CaseRepository + 'static,
{
    Router::new()
        .route("/predict", post(predict_handler::<R>))
        .route("/cases", get(list_handler::<R>))
        .route(
            "/cases/:id",
            get(case_handler::<R>).put(update_handler::<R>),
        )
        .route("/stats", get(stats_handler::<R>))
        .route("/chat", post(chat_handler::<R>))
        .route("/chat/suggestions", get(suggestions_handler))
        .with_state(CaseApiState { service, knowledge })
}

pub(crate) async fn predict_handler<R>(
    State(state): State<CaseApiState<R>>,
    Json(intake): Json<CaseIntake>,
) -> Response
where
    R: CaseRepository + 'static,
{
    match state.service.submit(intake) {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn list_handler<R>(
    State(state): State<CaseApiState<R>>,
    Query(query): Query<CaseQuery>,
) -> Response
where
    R: CaseRepository + 'static,
{
    let filter = match CaseFilter::try_from(query) {
        Ok(filter) => filter,
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
        }
    };

    match state.service.list(&filter) {
        Ok(cases) => {
            let payload = json!({
                "total": cases.len(),
                "cases": cases,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn case_handler<R>(
    State(state): State<CaseApiState<R>>,
    Path(id): Path<u64>,
) -> Response
where
    R: CaseRepository + 'static,
{
    match state.service.get(CaseId(id)) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn update_handler<R>(
    State(state): State<CaseApiState<R>>,
    Path(id): Path<u64>,
    Json(update): Json<CaseUpdate>,
) -> Response
where
    R: CaseRepository + 'static,
{
    match state.service.update(CaseId(id), update) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn stats_handler<R>(State(state): State<CaseApiState<R>>) -> Response
where
    R: CaseRepository + 'static,
{
    match state.service.stats() {
        Ok(stats) => (StatusCode::OK, Json(stats)).into_response(),
        Err(error) => service_error_response(error),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatRequest {
    #[serde(default)]
    message: String,
}

pub(crate) async fn chat_handler<R>(
    State(state): State<CaseApiState<R>>,
    Json(request): Json<ChatRequest>,
) -> Response
where
    R: CaseRepository + 'static,
{
    if request.message.trim().is_empty() {
        let payload = json!({ "error": "No message provided" });
        return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
    }

    let response = chat_respond(&request.message, &state.knowledge);
    let payload = json!({
        "response": response,
        "timestamp": Utc::now().to_rfc3339(),
    });
    (StatusCode::OK, Json(payload)).into_response()
}

pub(crate) async fn suggestions_handler() -> Response {
    let payload = json!({ "suggestions": suggestions() });
    (StatusCode::OK, Json(payload)).into_response()
}

fn service_error_response(error: CaseServiceError) -> Response {
    let status = match &error {
        CaseServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        CaseServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        CaseServiceError::Repository(RepositoryError::Unavailable(reason)) => {
            warn!(%reason, "case repository unavailable");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": error.to_string() });
    (status, Json(payload)).into_response()
}
