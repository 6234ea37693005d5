// src/error.rs
//! Relay error taxonomy and its HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub const UNKNOWN_API_ERROR: &str = "Unknown API error";

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("invalid news source `{key}`")]
    UnknownSource {
        key: String,
        available: Vec<&'static str>,
    },

    #[error("no articles in upstream response")]
    NoArticles,

    #[error("upstream request timed out")]
    Timeout,

    #[error("upstream returned {status}: {details}")]
    Upstream { status: StatusCode, details: String },

    #[error("upstream transport error: {0}")]
    Transport(String),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::UnknownSource { .. } => StatusCode::BAD_REQUEST,
            RelayError::NoArticles => StatusCode::NOT_FOUND,
            RelayError::Timeout => StatusCode::REQUEST_TIMEOUT,
            RelayError::Upstream { status, .. } => *status,
            RelayError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::UnknownSource { .. } => "unknown_source",
            RelayError::NoArticles => "no_articles",
            RelayError::Timeout => "timeout",
            RelayError::Upstream { .. } => "upstream_error",
            RelayError::Transport(_) => "transport",
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            RelayError::UnknownSource { available, .. } => json!({
                "error": "Invalid news source",
                "availableSources": available,
            }),
            RelayError::NoArticles => json!({ "error": "No articles found" }),
            RelayError::Timeout => json!({ "error": "Request timeout" }),
            RelayError::Upstream { details, .. } => json!({
                "error": "News API error",
                "details": details,
            }),
            RelayError::Transport(_) => json!({ "error": "Failed to fetch news" }),
        };
        (status, Json(body)).into_response()
    }
}
