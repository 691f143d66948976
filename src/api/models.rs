use serde::{Deserialize, Serialize};

use crate::data_models::{Category, SearchResult, StructuredAnswer};

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub query: String,
    /// `mock`, `local[:model]` or `remote[:model]`; the configured default when absent.
    #[serde(default)]
    pub backend: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub query: String,
    pub category: Category,
    pub backend: String,
    pub results: Vec<SearchResult>,
    pub answer: StructuredAnswer,
    pub processing_time_ms: u128,
}

#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct StatusParams {
    #[serde(default)]
    pub backend: Option<String>,
}
