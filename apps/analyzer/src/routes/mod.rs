pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::documents::handlers as documents;
use crate::report::handlers as report;
use crate::session::handlers as session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::index_handler))
        .route("/health", get(health::health_handler))
        .route("/api/v1/session", get(session::handle_session_status))
        .route(
            "/api/v1/session/credential",
            post(session::handle_set_credential),
        )
        .route(
            "/api/v1/documents/:slot",
            post(documents::handle_upload)
                .delete(documents::handle_clear)
                // Uploads are bounded only by the host.
                .layer(DefaultBodyLimit::disable()),
        )
        .route("/api/v1/analyze", post(session::handle_analyze))
        .route("/api/v1/report", get(report::handle_get_report))
        .route("/api/v1/report/export", get(report::handle_export))
        .with_state(state)
}
