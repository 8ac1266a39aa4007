//! Analysis Client — builds the prompt, picks a model, and parses the reply.
//! All model traffic goes through `llm_client`.

pub mod keywords;
pub mod prompts;
pub mod result;

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::analysis::prompts::build_analysis_prompt;
use crate::analysis::result::AnalysisResult;
use crate::llm_client::{strip_json_fences, CompletionBackend, LlmError};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Error: No available Gemini models. Please check your API key.")]
    NoAvailableModel { tried: Vec<String> },

    #[error("Error: No content in API response")]
    EmptyReply,

    #[error("Error: Invalid JSON response from API. Please try again. (JSON Error: {0})")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Error calling Gemini API: {0}")]
    Transport(#[from] LlmError),
}

impl AnalysisError {
    pub fn code(&self) -> &'static str {
        match self {
            AnalysisError::NoAvailableModel { .. } => "NO_AVAILABLE_MODEL",
            AnalysisError::EmptyReply => "EMPTY_REPLY",
            AnalysisError::InvalidJson(_) => "INVALID_JSON",
            AnalysisError::Transport(_) => "LLM_ERROR",
        }
    }
}

/// Everything one analysis call needs.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisInput<'a> {
    pub resume_text: &'a str,
    pub jd_text: &'a str,
    pub resume_keywords: &'a [String],
    pub jd_keywords: &'a [String],
}

#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub result: AnalysisResult,
    /// The candidate that served the request.
    pub model: String,
}

/// Runs one analysis against an ordered list of candidate models.
#[derive(Clone)]
pub struct AnalysisClient {
    backend: Arc<dyn CompletionBackend>,
    models: Vec<String>,
}

impl AnalysisClient {
    pub fn new(backend: Arc<dyn CompletionBackend>, models: Vec<String>) -> Self {
        Self { backend, models }
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// Returns the first candidate the backend accepts.
    pub async fn select_model(&self, api_key: &str) -> Result<String, AnalysisError> {
        for model in &self.models {
            match self.backend.probe_model(model, api_key).await {
                Ok(()) => {
                    info!("Selected model {model}");
                    return Ok(model.clone());
                }
                Err(e) => warn!("Model {model} unavailable: {e}"),
            }
        }
        Err(AnalysisError::NoAvailableModel {
            tried: self.models.clone(),
        })
    }

    /// Single attempt, no retries. Blocks until the backend replies or fails.
    pub async fn analyze(
        &self,
        input: AnalysisInput<'_>,
        api_key: &str,
    ) -> Result<AnalysisOutcome, AnalysisError> {
        let model = self.select_model(api_key).await?;

        let prompt = build_analysis_prompt(
            input.resume_text,
            input.jd_text,
            input.resume_keywords,
            input.jd_keywords,
        );
        debug!("Analysis prompt built: {} chars", prompt.len());

        let reply = self.backend.complete(&model, &prompt, api_key).await?;
        let result = parse_reply(&reply)?;

        Ok(AnalysisOutcome { result, model })
    }
}

/// Normalizes fencing and decodes the model reply.
pub fn parse_reply(reply: &str) -> Result<AnalysisResult, AnalysisError> {
    if reply.trim().is_empty() {
        return Err(AnalysisError::EmptyReply);
    }
    Ok(serde_json::from_str(strip_json_fences(reply))?)
}
