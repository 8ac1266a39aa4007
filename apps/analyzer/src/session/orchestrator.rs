//! One full analysis cycle: validate → keywords → model → store.

use serde::Deserialize;
use tracing::info;

use crate::analysis::keywords::{KeywordExtractor, DEFAULT_KEYWORD_COUNT};
use crate::analysis::{AnalysisClient, AnalysisInput};
use crate::documents::{DocumentSlot, DocumentText};
use crate::errors::AppError;
use crate::session::validation::validate_inputs;
use crate::session::{SessionSnapshot, SessionState};

#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeRequest {
    /// Pasted résumé text; wins over a held upload when non-empty.
    #[serde(default)]
    pub resume_text: Option<String>,
    /// Pasted job description; wins over a held upload when non-empty.
    #[serde(default)]
    pub job_description: Option<String>,
}

/// Pasted text takes priority over an uploaded document.
pub fn effective_text<'a>(
    pasted: Option<&'a str>,
    uploaded: Option<&'a DocumentText>,
) -> Option<&'a str> {
    pasted
        .filter(|t| !t.is_empty())
        .or_else(|| uploaded.map(|d| d.text.as_str()))
}

/// Runs one analysis and stores the outcome in `session`.
///
/// Validation happens before any extraction or model call. On any failure the
/// previously stored snapshot is left untouched.
pub async fn run_analysis<'s>(
    session: &'s mut SessionState,
    client: &AnalysisClient,
    extractor: &KeywordExtractor,
    api_key: Option<&str>,
    request: &AnalyzeRequest,
) -> Result<&'s SessionSnapshot, AppError> {
    let resume = effective_text(
        request.resume_text.as_deref(),
        session.upload(DocumentSlot::Resume),
    )
    .map(String::from);
    let job_description = effective_text(
        request.job_description.as_deref(),
        session.upload(DocumentSlot::JobDescription),
    )
    .map(String::from);

    let errors = validate_inputs(api_key, resume.as_deref(), job_description.as_deref());
    let (api_key, resume, job_description) = match (api_key, resume, job_description) {
        (Some(key), Some(resume), Some(jd)) if errors.is_empty() => (key, resume, jd),
        _ => return Err(AppError::Validation(errors)),
    };

    let resume_keywords = extractor.extract(&resume, DEFAULT_KEYWORD_COUNT);
    let jd_keywords = extractor.extract(&job_description, DEFAULT_KEYWORD_COUNT);
    info!(
        "Extracted {} resume keywords and {} job keywords",
        resume_keywords.len(),
        jd_keywords.len()
    );

    let outcome = client
        .analyze(
            AnalysisInput {
                resume_text: &resume,
                jd_text: &job_description,
                resume_keywords: &resume_keywords,
                jd_keywords: &jd_keywords,
            },
            api_key.trim(),
        )
        .await?;

    let snapshot = session.record(SessionSnapshot::new(
        outcome.result,
        resume_keywords,
        jd_keywords,
        outcome.model,
    ));
    info!("Stored analysis {}", snapshot.id);
    Ok(snapshot)
}
