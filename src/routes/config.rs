use axum::{extract::State, http::header, response::IntoResponse};

use crate::squeeze::Squeeze;

/// Dumps the active squeeze configuration as pretty-printed JSON.
pub async fn show_config(State(squeeze): State<Squeeze>) -> impl IntoResponse {
    let body = serde_json::to_string_pretty(squeeze.config()).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to serialize configuration");
        "{}".to_string()
    });

    ([(header::CONTENT_TYPE, "application/json")], body)
}
