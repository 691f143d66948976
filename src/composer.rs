use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::CONFIG;
use crate::data_models::{Category, Difficulty, SearchResult, StructuredAnswer};
use crate::generation::{GenerationError, TextGenerator};
use crate::mock_answers::mock_answer;

/// Results folded into the model prompt.
const CONTEXT_RESULTS: usize = 3;

/// Which generation strategy answers a query. Passed explicitly on every
/// compose call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BackendSelection {
    #[default]
    Mock,
    LocalModel { model: String },
    RemoteModel { model: String },
}

impl BackendSelection {
    pub fn local() -> Self {
        BackendSelection::LocalModel {
            model: CONFIG.ollama_model.clone(),
        }
    }

    pub fn remote() -> Self {
        BackendSelection::RemoteModel {
            model: CONFIG.hf_model.clone(),
        }
    }

    /// The configured default, mock when the setting is not understood.
    pub fn configured_default() -> Self {
        CONFIG.default_backend.parse().unwrap_or_else(|e| {
            log::warn!("{e}, defaulting to mock");
            BackendSelection::Mock
        })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            BackendSelection::Mock => "mock",
            BackendSelection::LocalModel { .. } => "local",
            BackendSelection::RemoteModel { .. } => "remote",
        }
    }
}

impl fmt::Display for BackendSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendSelection::Mock => f.write_str("mock"),
            BackendSelection::LocalModel { model } => write!(f, "local:{model}"),
            BackendSelection::RemoteModel { model } => write!(f, "remote:{model}"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown backend {0:?}, expected mock, local[:model] or remote[:model]")]
pub struct UnknownBackend(pub String);

/// Accepts `mock`, `local`, `remote`, optionally with a `:model` suffix
/// overriding the configured model.
impl FromStr for BackendSelection {
    type Err = UnknownBackend;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, model) = match s.trim().split_once(':') {
            Some((kind, model)) if !model.trim().is_empty() => (kind, Some(model.trim())),
            Some((kind, _)) => (kind, None),
            None => (s.trim(), None),
        };
        match kind.to_lowercase().as_str() {
            "mock" if model.is_none() => Ok(BackendSelection::Mock),
            "local" | "ollama" => Ok(match model {
                Some(model) => BackendSelection::LocalModel {
                    model: model.to_string(),
                },
                None => BackendSelection::local(),
            }),
            "remote" | "huggingface" | "hf" => Ok(match model {
                Some(model) => BackendSelection::RemoteModel {
                    model: model.to_string(),
                },
                None => BackendSelection::remote(),
            }),
            _ => Err(UnknownBackend(s.to_string())),
        }
    }
}

/// Why a model-backed answer could not be produced.
#[derive(Debug, Error)]
pub enum FailureReason {
    #[error("no {0} generator configured")]
    Unconfigured(&'static str),
    #[error(transparent)]
    Backend(#[from] GenerationError),
    #[error("no JSON object found in model output")]
    NoJsonObject,
    #[error("model output is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("model output is missing field `{0}`")]
    MissingField(&'static str),
    #[error("field `{0}` has the wrong type")]
    WrongType(&'static str),
    #[error("unknown difficulty {0:?}")]
    InvalidDifficulty(String),
}

/// Turns (query, category, context) into a [`StructuredAnswer`]. Model
/// failures of any kind fall back to the mock answer for the same input.
#[derive(Clone, Default)]
pub struct ResponseComposer {
    local: Option<Arc<dyn TextGenerator>>,
    remote: Option<Arc<dyn TextGenerator>>,
}

impl ResponseComposer {
    pub fn new(local: Arc<dyn TextGenerator>, remote: Arc<dyn TextGenerator>) -> Self {
        Self {
            local: Some(local),
            remote: Some(remote),
        }
    }

    /// Composer with no model generators; model selections degrade to mock.
    pub fn mock_only() -> Self {
        Self::default()
    }

    pub async fn compose(
        &self,
        query: &str,
        category: Category,
        results: &[SearchResult],
        backend: &BackendSelection,
    ) -> StructuredAnswer {
        let outcome = match backend {
            BackendSelection::Mock => return mock_answer(query, category),
            BackendSelection::LocalModel { model } => {
                self.try_generate(self.local.as_deref(), "local", model, query, category, results)
                    .await
            }
            BackendSelection::RemoteModel { model } => {
                self.try_generate(
                    self.remote.as_deref(),
                    "remote",
                    model,
                    query,
                    category,
                    results,
                )
                .await
            }
        };

        match outcome {
            Ok(answer) => answer,
            Err(reason) => {
                log::warn!("{backend} generation failed, using mock answer: {reason}");
                mock_answer(query, category)
            }
        }
    }

    async fn try_generate(
        &self,
        generator: Option<&dyn TextGenerator>,
        label: &'static str,
        model: &str,
        query: &str,
        category: Category,
        results: &[SearchResult],
    ) -> Result<StructuredAnswer, FailureReason> {
        let generator = generator.ok_or(FailureReason::Unconfigured(label))?;
        let context = build_context(results);
        let prompt = build_prompt(query, category, &context);
        let raw = generator.generate(model, &prompt).await?;
        log::debug!("{label} model {model} returned {} bytes", raw.len());
        parse_answer(extract_json(&raw)?)
    }
}

/// `- {title}: {snippet}` for the first few results, one per line.
pub fn build_context(results: &[SearchResult]) -> String {
    results
        .iter()
        .take(CONTEXT_RESULTS)
        .map(|r| format!("- {}: {}", r.title, r.snippet))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn build_prompt(query: &str, category: Category, context: &str) -> String {
    format!(
        r#"You are a helpful AR/VR coding assistant. Generate a JSON response for this query:

Query: {query}
Category: {category}
Context: {context}

Respond with valid JSON in this format:
{{
    "subtasks": ["Step 1: ...", "Step 2: ...", "Step 3: ..."],
    "code_snippet": "// Complete working code here",
    "best_practices": ["Tip 1", "Tip 2"],
    "difficulty": "Easy|Medium|Hard",
    "documentation_links": ["https://docs.unity3d.com/..."],
    "estimated_time": "30 minutes"
}}

Focus on {category} development. Provide complete, working code."#
    )
}

/// Parses the span from the first `{` to the last `}` of the model output.
pub fn extract_json(text: &str) -> Result<Value, FailureReason> {
    let start = text.find('{').ok_or(FailureReason::NoJsonObject)?;
    let end = text.rfind('}').ok_or(FailureReason::NoJsonObject)?;
    if end < start {
        return Err(FailureReason::NoJsonObject);
    }
    Ok(serde_json::from_str(&text[start..=end])?)
}

fn required<'a>(obj: &'a Map<String, Value>, field: &'static str) -> Result<&'a Value, FailureReason> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(FailureReason::MissingField(field)),
        Some(v) => Ok(v),
    }
}

fn as_text(value: &Value, field: &'static str) -> Result<String, FailureReason> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or(FailureReason::WrongType(field))
}

fn as_text_list(value: &Value, field: &'static str) -> Result<Vec<String>, FailureReason> {
    let items = value.as_array().ok_or(FailureReason::WrongType(field))?;
    Ok(items
        .iter()
        .map(|item| match item {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect())
}

/// Validates a parsed model object against the answer schema.
/// `documentation_links` is optional and defaults to empty.
pub fn parse_answer(value: Value) -> Result<StructuredAnswer, FailureReason> {
    let obj = value.as_object().ok_or(FailureReason::NoJsonObject)?;

    let subtasks = as_text_list(required(obj, "subtasks")?, "subtasks")?;
    let code_snippet = as_text(required(obj, "code_snippet")?, "code_snippet")?;
    let best_practices = as_text_list(required(obj, "best_practices")?, "best_practices")?;
    let difficulty_raw = as_text(required(obj, "difficulty")?, "difficulty")?;
    let difficulty = Difficulty::parse(&difficulty_raw)
        .ok_or(FailureReason::InvalidDifficulty(difficulty_raw))?;
    let estimated_time = as_text(required(obj, "estimated_time")?, "estimated_time")?;
    let documentation_links = match obj.get("documentation_links") {
        None | Some(Value::Null) => Vec::new(),
        Some(v) => as_text_list(v, "documentation_links")?,
    };

    Ok(StructuredAnswer {
        subtasks,
        code_snippet,
        best_practices,
        difficulty,
        documentation_links,
        estimated_time,
    })
}
