use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generation request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("generation backend answered with status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("generation backend returned no text")]
    EmptyResponse,
}

/// Text generation capability behind the model-backed composer paths.
/// Streaming is never requested; the full text comes back in one piece.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, GenerationError>;
}

async fn error_for_status(res: reqwest::Response) -> Result<reqwest::Response, GenerationError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body = res.text().await.unwrap_or_default();
    Err(GenerationError::Status { status, body })
}

// ---------------------------------------------------------------------------
// Ollama
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct OllamaGenerateResponse {
    response: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OllamaModel {
    pub name: String,
    #[serde(default)]
    pub size: u64,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<OllamaModel>,
}

/// Client for a local Ollama server.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
}

impl OllamaClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Models pulled on the server. Doubles as the reachability probe.
    pub async fn list_models(&self) -> Result<Vec<OllamaModel>, GenerationError> {
        let res = self
            .client
            .get(format!("{}/api/tags", self.base_url))
            .send()
            .await?;
        let tags: TagsResponse = error_for_status(res).await?.json().await?;
        Ok(tags.models)
    }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, GenerationError> {
        let request = OllamaGenerateRequest {
            model,
            prompt,
            stream: false,
        };
        let res = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .send()
            .await?;
        let body: OllamaGenerateResponse = error_for_status(res).await?.json().await?;
        if body.response.trim().is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        Ok(body.response)
    }
}

// ---------------------------------------------------------------------------
// Hugging Face Inference API
// ---------------------------------------------------------------------------

const HF_MAX_NEW_TOKENS: u32 = 1024;

#[derive(Debug, Serialize)]
struct HfParameters {
    max_new_tokens: u32,
    return_full_text: bool,
}

#[derive(Debug, Serialize)]
struct HfRequest<'a> {
    inputs: &'a str,
    parameters: HfParameters,
}

#[derive(Debug, Deserialize)]
struct HfGeneration {
    generated_text: String,
}

/// Client for the hosted Hugging Face text-generation endpoint. The token is
/// optional; without one the free tier rate limits apply.
#[derive(Debug, Clone)]
pub struct HuggingFaceClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HuggingFaceClient {
    pub fn new(
        base_url: &str,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }
}

#[async_trait]
impl TextGenerator for HuggingFaceClient {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, GenerationError> {
        let request = HfRequest {
            inputs: prompt,
            parameters: HfParameters {
                max_new_tokens: HF_MAX_NEW_TOKENS,
                return_full_text: false,
            },
        };
        let mut builder = self
            .client
            .post(format!("{}/models/{}", self.base_url, model))
            .json(&request);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        let res = builder.send().await?;
        let generations: Vec<HfGeneration> = error_for_status(res).await?.json().await?;
        generations
            .into_iter()
            .next()
            .map(|g| g.generated_text)
            .filter(|t| !t.trim().is_empty())
            .ok_or(GenerationError::EmptyResponse)
    }
}
