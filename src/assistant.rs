use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::sync::Mutex;

use crate::classifier::{QueryClassifier, QueryInfo};
use crate::composer::{BackendSelection, ResponseComposer};
use crate::config::CONFIG;
use crate::data_models::{Category, HistoryEntry, SearchResult, StructuredAnswer};
use crate::duckduckgo::DuckDuckGoBackend;
use crate::generation::{HuggingFaceClient, OllamaClient};
use crate::search_agent::SearchAgent;

/// Everything produced for one query.
#[derive(Debug, Clone, Serialize)]
pub struct AskOutcome {
    pub query: String,
    pub category: Category,
    pub results: Vec<SearchResult>,
    pub answer: StructuredAnswer,
}

impl AskOutcome {
    pub fn to_history_entry(&self) -> HistoryEntry {
        HistoryEntry::new(self.query.clone(), self.category, self.answer.clone())
    }
}

/// Readiness of a generation backend.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BackendStatus {
    pub backend: String,
    pub ready: bool,
    pub detail: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub models: Vec<String>,
}

/// Classify, search and compose for one query at a time. Holds no per-query
/// state, so one instance can be shared across requests.
pub struct Assistant {
    classifier: QueryClassifier,
    search_agent: SearchAgent,
    composer: ResponseComposer,
    ollama: Option<Arc<OllamaClient>>,
    huggingface: Option<Arc<HuggingFaceClient>>,
}

impl Assistant {
    pub fn new(
        classifier: QueryClassifier,
        search_agent: SearchAgent,
        composer: ResponseComposer,
    ) -> Self {
        Self {
            classifier,
            search_agent,
            composer,
            ollama: None,
            huggingface: None,
        }
    }

    /// Wires DuckDuckGo, Ollama and Hugging Face clients from [`CONFIG`].
    pub fn from_config() -> Result<Self> {
        let search = DuckDuckGoBackend::new(CONFIG.search_timeout, &CONFIG.search_user_agent)
            .context("Failed to build search client")?;
        let ollama = Arc::new(
            OllamaClient::new(&CONFIG.ollama_base_url, CONFIG.generation_timeout)
                .context("Failed to build Ollama client")?,
        );
        let huggingface = Arc::new(
            HuggingFaceClient::new(
                &CONFIG.hf_api_url,
                CONFIG.hf_token.clone(),
                CONFIG.generation_timeout,
            )
            .context("Failed to build Hugging Face client")?,
        );

        let composer = ResponseComposer::new(ollama.clone(), huggingface.clone());
        let mut assistant = Self::new(
            QueryClassifier::new(),
            SearchAgent::new(Arc::new(search)),
            composer,
        );
        assistant.ollama = Some(ollama);
        assistant.huggingface = Some(huggingface);
        Ok(assistant)
    }

    pub fn classifier(&self) -> &QueryClassifier {
        &self.classifier
    }

    pub fn info(&self, query: &str) -> QueryInfo {
        QueryInfo::new(&self.classifier, query)
    }

    pub async fn ask(&self, query: &str, backend: &BackendSelection) -> AskOutcome {
        let category = self.classifier.classify(query);
        log::info!("classified {query:?} as {category}");

        let results = self.search_agent.search(query, category).await;
        log::info!("using {} context results", results.len());

        let answer = self
            .composer
            .compose(query, category, &results, backend)
            .await;

        AskOutcome {
            query: query.to_string(),
            category,
            results,
            answer,
        }
    }

    pub async fn status(&self, backend: &BackendSelection) -> BackendStatus {
        let label = backend.to_string();
        match backend {
            BackendSelection::Mock => BackendStatus {
                backend: label,
                ready: true,
                detail: "Mock mode, demo responses".to_string(),
                models: Vec::new(),
            },
            BackendSelection::LocalModel { model } => {
                let Some(ollama) = &self.ollama else {
                    return not_configured(label);
                };
                match ollama.list_models().await {
                    Ok(models) => {
                        let names: Vec<String> = models.into_iter().map(|m| m.name).collect();
                        let detail = if names.iter().any(|n| n == model) {
                            format!("Ollama connected at {}", ollama.base_url())
                        } else {
                            format!(
                                "Ollama connected at {}, model {model} not pulled. Run: ollama pull {model}",
                                ollama.base_url()
                            )
                        };
                        BackendStatus {
                            backend: label,
                            ready: true,
                            detail,
                            models: names,
                        }
                    }
                    Err(e) => BackendStatus {
                        backend: label,
                        ready: false,
                        detail: format!(
                            "Ollama not reachable at {} ({e}). Run: ollama serve",
                            ollama.base_url()
                        ),
                        models: Vec::new(),
                    },
                }
            }
            BackendSelection::RemoteModel { .. } => {
                let Some(huggingface) = &self.huggingface else {
                    return not_configured(label);
                };
                let detail = if huggingface.has_token() {
                    "Hugging Face ready".to_string()
                } else {
                    "Hugging Face ready, no token set (free tier rate limits apply)".to_string()
                };
                BackendStatus {
                    backend: label,
                    ready: true,
                    detail,
                    models: Vec::new(),
                }
            }
        }
    }
}

fn not_configured(backend: String) -> BackendStatus {
    BackendStatus {
        backend,
        ready: false,
        detail: "backend not configured".to_string(),
        models: Vec::new(),
    }
}

/// Append-only log of answered queries, kept in process memory.
#[derive(Debug, Default)]
pub struct History {
    entries: Mutex<Vec<HistoryEntry>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn push(&self, entry: HistoryEntry) {
        self.entries.lock().await.push(entry);
    }

    /// Oldest first.
    pub async fn entries(&self) -> Vec<HistoryEntry> {
        self.entries.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}
