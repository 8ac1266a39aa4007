//! Axum route handlers for document uploads.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::documents::{extract_text, DocumentKind, DocumentSlot, DocumentSource, ExtractError};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub slot: DocumentSlot,
    pub source: DocumentSource,
    pub chars: usize,
}

#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub slot: DocumentSlot,
    pub cleared: bool,
}

fn parse_slot(segment: &str) -> Result<DocumentSlot, AppError> {
    DocumentSlot::from_path(segment)
        .ok_or_else(|| AppError::NotFound(format!("Unknown document slot '{segment}'")))
}

/// POST /api/v1/documents/:slot
///
/// Accepts one multipart `file` part, extracts its text and holds it in the session.
/// A failed extraction forgets whatever the slot held before.
pub async fn handle_upload(
    State(state): State<AppState>,
    Path(slot): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let slot = parse_slot(&slot)?;
    let mut session = state.session.lock().await;
    state.require_credential(&session)?;

    let mut upload: Option<(String, Option<String>, Bytes)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("").to_string();
        let content_type = field.content_type().map(String::from);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;
        upload = Some((file_name, content_type, bytes));
        break;
    }

    let (file_name, content_type, bytes) =
        upload.ok_or_else(|| AppError::BadRequest("Missing multipart field 'file'".into()))?;

    let kind = DocumentKind::detect(&file_name, content_type.as_deref())
        .filter(|k| slot.accepts(*k))
        .ok_or_else(|| ExtractError::UnsupportedType {
            slot,
            file_name: file_name.clone(),
        })?;

    let extracted = tokio::task::spawn_blocking(move || extract_text(&bytes, kind))
        .await
        .unwrap_or_else(|e| Err(ExtractError::Pdf(format!("extractor aborted: {e}"))));

    let document = match extracted {
        Ok(doc) => doc,
        Err(e) => {
            session.clear_upload(slot);
            return Err(e.into());
        }
    };

    let response = UploadResponse {
        slot,
        source: document.source,
        chars: document.chars(),
    };
    info!("Loaded {} ({} characters) from {file_name}", slot, response.chars);
    session.store_upload(slot, document);

    Ok(Json(response))
}

/// DELETE /api/v1/documents/:slot
pub async fn handle_clear(
    State(state): State<AppState>,
    Path(slot): Path<String>,
) -> Result<Json<ClearResponse>, AppError> {
    let slot = parse_slot(&slot)?;
    let mut session = state.session.lock().await;
    let cleared = session.clear_upload(slot).is_some();
    Ok(Json(ClearResponse { slot, cleared }))
}
