use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::AnalysisError;
use crate::documents::ExtractError;
use crate::session::validation::ValidationError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation failed with {} error(s)", .0.len())]
    Validation(Vec<ValidationError>),

    #[error(transparent)]
    Extraction(#[from] ExtractError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut details = None;
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Configuration(msg) => (
                StatusCode::PRECONDITION_FAILED,
                "CONFIGURATION_ERROR",
                msg.clone(),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::Validation(errors) => {
                details = Some(
                    errors
                        .iter()
                        .map(|e| e.to_string())
                        .collect::<Vec<_>>(),
                );
                (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    self.to_string(),
                )
            }
            AppError::Extraction(e) => {
                tracing::warn!("Extraction error: {e}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "EXTRACTION_ERROR",
                    e.to_string(),
                )
            }
            AppError::Analysis(e) => {
                tracing::error!("Analysis error: {e}");
                let status = match e {
                    AnalysisError::NoAvailableModel { tried } => {
                        details = Some(tried.clone());
                        StatusCode::SERVICE_UNAVAILABLE
                    }
                    _ => StatusCode::BAD_GATEWAY,
                };
                (status, e.code(), e.to_string())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let Some(details) = details {
            error["details"] = json!(details);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_error_lists_every_violation() {
        let err = AppError::Validation(vec![
            ValidationError::MissingCredential,
            ValidationError::ResumeTooShort,
        ]);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["details"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_configuration_error_is_precondition_failed() {
        let response = AppError::Configuration("no key".into()).into_response();
        assert_eq!(response.status(), StatusCode::PRECONDITION_FAILED);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "CONFIGURATION_ERROR");
        assert!(body["error"].get("details").is_none());
    }

    #[tokio::test]
    async fn test_analysis_error_message_is_verbatim() {
        let response = AppError::Analysis(AnalysisError::EmptyReply).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "Error: No content in API response");
    }
}
