//! Error types for the web surface.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use roboscope_stream::StreamError;

/// Errors that can occur handling a web request.
#[derive(Debug, Error)]
pub enum WebError {
    /// Streaming core error.
    #[error(transparent)]
    Stream(#[from] StreamError),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = match &self {
            WebError::Stream(StreamError::TopicNotFound(_)) => StatusCode::NOT_FOUND,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
