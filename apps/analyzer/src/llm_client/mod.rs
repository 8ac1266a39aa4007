/// LLM Client — the single point of entry for all Gemini API calls.
///
/// No other module talks to the Generative Language API directly; callers go
/// through the `CompletionBackend` trait so tests can substitute canned replies.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// The "request a completion" capability.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Checks that `model` can be used with `api_key`. Succeeds only for a usable model.
    async fn probe_model(&self, model: &str, api_key: &str) -> Result<(), LlmError>;

    /// Sends `prompt` to `model` and returns the reply text (possibly empty).
    async fn complete(&self, model: &str, prompt: &str, api_key: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: [GenerateContent<'a>; 1],
}

#[derive(Debug, Serialize)]
struct GenerateContent<'a> {
    role: &'a str,
    parts: [GeneratePart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct GeneratePart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    pub candidates: Option<Vec<Candidate>>,
    #[serde(rename = "usageMetadata")]
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    pub parts: Option<Vec<CandidatePart>>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    pub prompt_token_count: Option<u32>,
    pub candidates_token_count: Option<u32>,
}

impl GenerateResponse {
    /// Extracts the first non-empty text part across candidates.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter_map(|c| c.content.as_ref())
            .flat_map(|c| c.parts.as_deref().unwrap_or_default())
            .filter_map(|p| p.text.as_deref())
            .find(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct GoogleError {
    error: GoogleErrorBody,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    message: String,
}

/// Gemini REST backend. No retries and no request timeout: a failed call is
/// surfaced to the user, who re-triggers the analysis manually.
#[derive(Clone)]
pub struct GeminiBackend {
    client: Client,
    api_base: String,
}

impl GeminiBackend {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    fn model_url(&self, model: &str) -> String {
        format!("{}/models/{}", self.api_base, model)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, LlmError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<GoogleError>(&body)
            .map(|e| e.error.message)
            .unwrap_or(body);
        Err(LlmError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl CompletionBackend for GeminiBackend {
    async fn probe_model(&self, model: &str, api_key: &str) -> Result<(), LlmError> {
        let response = self
            .client
            .get(self.model_url(model))
            .header("x-goog-api-key", api_key)
            .send()
            .await?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn complete(&self, model: &str, prompt: &str, api_key: &str) -> Result<String, LlmError> {
        let body = GenerateRequest {
            contents: [GenerateContent {
                role: "user",
                parts: [GeneratePart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(format!("{}:generateContent", self.model_url(model)))
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;
        let response: GenerateResponse = Self::check_status(response).await?.json().await?;

        if let Some(usage) = &response.usage {
            debug!(
                "Gemini call succeeded: model={}, prompt_tokens={:?}, output_tokens={:?}",
                model, usage.prompt_token_count, usage.candidates_token_count
            );
        }

        Ok(response.text().unwrap_or_default().to_string())
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
///
/// Idempotent: unfenced text only loses surrounding whitespace.
pub fn strip_json_fences(text: &str) -> &str {
    let mut text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        text = stripped;
    }
    if let Some(stripped) = text.strip_prefix("```") {
        text = stripped;
    }
    if let Some(stripped) = text.strip_suffix("```") {
        text = stripped;
    }
    text.trim()
}
