use axum::{response::Html, Json};
use serde_json::{json, Value};

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "resume-analyzer"
    }))
}

/// GET /
/// The single-page UI. All logic lives behind the JSON API.
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}
