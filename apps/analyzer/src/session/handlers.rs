//! Axum route handlers for the session and the analyze action.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::documents::DocumentSlot;
use crate::errors::AppError;
use crate::report::{render_report, ReportView};
use crate::session::credential::{self, CredentialSource};
use crate::session::orchestrator::{run_analysis, AnalyzeRequest};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SessionStatusResponse {
    pub credential_source: Option<CredentialSource>,
    pub used_model: Option<String>,
    pub resume_uploaded: bool,
    pub job_description_uploaded: bool,
    pub has_report: bool,
    pub model_candidates: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CredentialRequest {
    pub api_key: String,
}

#[derive(Debug, Serialize)]
pub struct CredentialResponse {
    pub credential_source: CredentialSource,
}

/// GET /api/v1/session
pub async fn handle_session_status(State(state): State<AppState>) -> Json<SessionStatusResponse> {
    let session = state.session.lock().await;
    let credential_source = credential::resolve(
        state.config.gemini_api_key.as_deref(),
        session.manual_api_key(),
    )
    .map(|c| c.source);

    Json(SessionStatusResponse {
        credential_source,
        used_model: session.used_model().map(String::from),
        resume_uploaded: session.upload(DocumentSlot::Resume).is_some(),
        job_description_uploaded: session.upload(DocumentSlot::JobDescription).is_some(),
        has_report: session.latest().is_some(),
        model_candidates: state.analysis.models().to_vec(),
    })
}

/// POST /api/v1/session/credential
///
/// Stores a manually entered key. A configured secret still takes priority.
pub async fn handle_set_credential(
    State(state): State<AppState>,
    Json(request): Json<CredentialRequest>,
) -> Result<Json<CredentialResponse>, AppError> {
    let key = request.api_key.trim();
    if key.is_empty() {
        return Err(AppError::BadRequest("api_key cannot be empty".to_string()));
    }

    let mut session = state.session.lock().await;
    session.set_manual_api_key(key.to_string());
    let credential = state.require_credential(&session)?;
    info!("Manual API key stored; active source is {:?}", credential.source);

    Ok(Json(CredentialResponse {
        credential_source: credential.source,
    }))
}

/// POST /api/v1/analyze
///
/// Full cycle: validate → keyword extraction → model call → store.
/// Returns the rendered report of the new analysis.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<ReportView>, AppError> {
    let mut session = state.session.lock().await;
    let credential = state.require_credential(&session)?;

    let snapshot = run_analysis(
        &mut session,
        &state.analysis,
        &state.keywords,
        Some(credential.key()),
        &request,
    )
    .await?;

    Ok(Json(render_report(snapshot)))
}
