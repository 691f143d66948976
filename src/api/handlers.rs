use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use std::sync::Arc;
use std::time::Instant;

use crate::assistant::BackendStatus;
use crate::classifier::QueryInfo;
use crate::composer::BackendSelection;
use crate::data_models::HistoryEntry;

use super::AppState;
use super::models::{AskRequest, AskResponse, ClassifyRequest, StatusParams};

fn resolve_backend(
    state: &AppState,
    requested: Option<&str>,
) -> Result<BackendSelection, (StatusCode, String)> {
    match requested {
        Some(name) => name
            .parse()
            .map_err(|e| (StatusCode::BAD_REQUEST, format!("{e}"))),
        None => Ok(state.default_backend.clone()),
    }
}

pub async fn ask_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>, (StatusCode, String)> {
    let start = Instant::now();

    if request.query.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Query cannot be empty".to_string()));
    }
    let backend = resolve_backend(&state, request.backend.as_deref())?;

    let outcome = state.assistant.ask(&request.query, &backend).await;
    state.history.push(outcome.to_history_entry()).await;

    let processing_time_ms = start.elapsed().as_millis();
    tracing::info!(
        category = %outcome.category,
        backend = %backend,
        processing_time_ms,
        "answered query"
    );

    Ok(Json(AskResponse {
        query: outcome.query,
        category: outcome.category,
        backend: backend.to_string(),
        results: outcome.results,
        answer: outcome.answer,
        processing_time_ms,
    }))
}

pub async fn classify_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ClassifyRequest>,
) -> Result<Json<QueryInfo>, (StatusCode, String)> {
    if request.query.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Query cannot be empty".to_string()));
    }
    Ok(Json(state.assistant.info(&request.query)))
}

pub async fn history_handler(State(state): State<Arc<AppState>>) -> Json<Vec<HistoryEntry>> {
    Json(state.history.entries().await)
}

pub async fn status_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StatusParams>,
) -> Result<Json<BackendStatus>, (StatusCode, String)> {
    let backend = resolve_backend(&state, params.backend.as_deref())?;
    Ok(Json(state.assistant.status(&backend).await))
}
