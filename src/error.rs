use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::policy::{Encoding, MinificationKind};

#[derive(Error, Debug)]
pub enum SqueezeError {
    #[error("{encoding} compression failed: {source}")]
    Compression {
        encoding: Encoding,
        #[source]
        source: std::io::Error,
    },

    #[error("{kind} minification failed: {message}")]
    Minification {
        kind: MinificationKind,
        message: String,
    },

    #[error("Failed to read response body: {0}")]
    Body(#[from] axum::Error),
}

impl SqueezeError {
    pub fn minification(kind: MinificationKind, message: impl Into<String>) -> Self {
        SqueezeError::Minification {
            kind,
            message: message.into(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            SqueezeError::Compression { .. } => "COMPRESSION_FAILED",
            SqueezeError::Minification { .. } => "MINIFICATION_FAILED",
            SqueezeError::Body(_) => "BODY_READ_FAILED",
        }
    }
}

impl IntoResponse for SqueezeError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "success": false,
            "error": {
                "message": self.to_string(),
                "code": self.code(),
            }
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
