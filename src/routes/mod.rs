pub mod config;
pub mod health;
pub mod static_files;

use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::squeeze::{squeeze_response, Squeeze};

/// Builds the demo application with the squeeze middleware installed.
pub fn router(squeeze: Squeeze) -> Router {
    Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/config", get(config::show_config))
        .fallback(static_files::serve_static)
        .layer(middleware::from_fn_with_state(
            squeeze.clone(),
            squeeze_response,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(squeeze)
}
