use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::assistant::{Assistant, History};
use crate::composer::BackendSelection;

pub mod handlers;
pub mod models;

/// Shared by every request. The assistant itself is stateless; only the
/// history log mutates.
pub struct AppState {
    pub assistant: Arc<Assistant>,
    pub history: Arc<History>,
    pub default_backend: BackendSelection,
}

impl AppState {
    pub fn new(assistant: Arc<Assistant>, default_backend: BackendSelection) -> Self {
        Self {
            assistant,
            history: Arc::new(History::new()),
            default_backend,
        }
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/ask", post(handlers::ask_handler))
        .route("/api/classify", post(handlers::classify_handler))
        .route("/api/history", get(handlers::history_handler))
        .route("/api/status", get(handlers::status_handler))
        .with_state(state)
        .layer(cors)
}
