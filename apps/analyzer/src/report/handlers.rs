//! Axum route handlers for the stored report.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Local;

use crate::errors::AppError;
use crate::report::export::{export_filename, export_text};
use crate::report::{render_report, ReportView};
use crate::state::AppState;

const NO_REPORT: &str = "No analysis has been run in this session yet";

/// GET /api/v1/report
pub async fn handle_get_report(State(state): State<AppState>) -> Result<Json<ReportView>, AppError> {
    let session = state.session.lock().await;
    state.require_credential(&session)?;

    let snapshot = session
        .latest()
        .ok_or_else(|| AppError::NotFound(NO_REPORT.to_string()))?;
    Ok(Json(render_report(snapshot)))
}

/// GET /api/v1/report/export
///
/// Downloads the stored analysis as `resume_analysis_<timestamp>.txt`.
pub async fn handle_export(State(state): State<AppState>) -> Result<Response, AppError> {
    let session = state.session.lock().await;
    state.require_credential(&session)?;

    let snapshot = session
        .latest()
        .ok_or_else(|| AppError::NotFound(NO_REPORT.to_string()))?;

    let now = Local::now().naive_local();
    let body = export_text(snapshot, now);
    let disposition = format!("attachment; filename=\"{}\"", export_filename(now));

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}
