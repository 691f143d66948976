use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use codexr::api::{AppState, create_router};
use codexr::assistant::Assistant;
use codexr::classifier::QueryClassifier;
use codexr::composer::{BackendSelection, ResponseComposer};
use codexr::search_agent::{RawHit, SafeSearch, SearchAgent, SearchBackend, SearchError};

mod test_helpers {
    use super::*;

    pub struct OfflineSearch;

    #[async_trait]
    impl SearchBackend for OfflineSearch {
        async fn text(
            &self,
            _query: &str,
            _max_results: usize,
            _safe_search: SafeSearch,
        ) -> Result<Vec<RawHit>, SearchError> {
            Err(SearchError::Parse("offline".to_string()))
        }
    }

    pub fn create_state() -> Arc<AppState> {
        let assistant = Assistant::new(
            QueryClassifier::new(),
            SearchAgent::new(Arc::new(OfflineSearch)),
            ResponseComposer::mock_only(),
        );
        Arc::new(AppState::new(Arc::new(assistant), BackendSelection::Mock))
    }

    pub fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    pub fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    pub async fn read_json(response: axum::response::Response) -> Result<Value> {
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

use test_helpers::*;

#[tokio::test]
async fn test_ask_returns_structured_answer() -> Result<()> {
    let state = create_state();
    let app = create_router(state.clone());

    let response = app
        .oneshot(post_json(
            "/api/ask",
            json!({"query": "How do I add teleport locomotion in Unity VR?"}),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await?;
    assert_eq!(body["category"], "Unity");
    assert_eq!(body["backend"], "mock");
    assert_eq!(body["answer"]["difficulty"], "Medium");
    assert_eq!(body["answer"]["estimated_time"], "45 minutes");
    // search is offline, so the Unity fallback documentation is attached
    assert_eq!(body["results"][0]["title"], "Unity XR Documentation");
    assert_eq!(body["results"][0]["source"], "Unity Official");

    let history = state.history.entries().await;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].query, "How do I add teleport locomotion in Unity VR?");
    Ok(())
}

#[tokio::test]
async fn test_ask_rejects_blank_query() -> Result<()> {
    let state = create_state();
    let response = create_router(state.clone())
        .oneshot(post_json("/api/ask", json!({"query": "  \t "})))
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(state.history.is_empty().await);
    Ok(())
}

#[tokio::test]
async fn test_ask_rejects_unknown_backend() -> Result<()> {
    let response = create_router(create_state())
        .oneshot(post_json(
            "/api/ask",
            json!({"query": "Create an occlusion shader for AR", "backend": "gpt"}),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn test_ask_with_unavailable_model_falls_back() -> Result<()> {
    let response = create_router(create_state())
        .oneshot(post_json(
            "/api/ask",
            json!({"query": "Create an occlusion shader for AR", "backend": "local:codellama:7b-code"}),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await?;
    assert_eq!(body["backend"], "local:codellama:7b-code");
    assert_eq!(body["category"], "Shader");
    assert_eq!(body["answer"]["difficulty"], "Hard");
    assert_eq!(body["answer"]["estimated_time"], "2-3 hours");
    Ok(())
}

#[tokio::test]
async fn test_classify() -> Result<()> {
    let response = create_router(create_state())
        .oneshot(post_json(
            "/api/classify",
            json!({"query": "How do I set up multiplayer in Unreal VR?"}),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await?;
    assert_eq!(body, json!({"category": "Unreal", "estimated_difficulty": "Hard"}));
    Ok(())
}

#[tokio::test]
async fn test_history_keeps_order() -> Result<()> {
    let state = create_state();
    for query in ["Set up multiplayer in Unreal Engine", "Best practices for VR development"] {
        let response = create_router(state.clone())
            .oneshot(post_json("/api/ask", json!({"query": query})))
            .await?;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = create_router(state).oneshot(get("/api/history")).await?;
    let body = read_json(response).await?;
    let entries = body.as_array().expect("history is a list");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["category"], "Unreal");
    assert_eq!(entries[1]["category"], "General");
    assert_eq!(entries[1]["answer"]["estimated_time"], "1-3 hours");
    assert_ne!(entries[0]["id"], entries[1]["id"]);
    Ok(())
}

#[tokio::test]
async fn test_status() -> Result<()> {
    let state = create_state();

    let response = create_router(state.clone()).oneshot(get("/api/status")).await?;
    let body = read_json(response).await?;
    assert_eq!(body["backend"], "mock");
    assert_eq!(body["ready"], true);

    // no Ollama client wired into this assistant
    let response = create_router(state)
        .oneshot(get("/api/status?backend=local:llama3"))
        .await?;
    let body = read_json(response).await?;
    assert_eq!(body["backend"], "local:llama3");
    assert_eq!(body["ready"], false);
    Ok(())
}
