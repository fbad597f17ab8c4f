//! Relay error types with HTTP status mapping.

use std::fmt;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::api::types::ChatFailure;
use crate::generate::GenerateError;

/// Errors a chat request can surface to the caller.
#[derive(Debug)]
pub enum ApiError {
    /// `message` missing or empty. Client-caused, reported synchronously.
    MissingMessage,
    /// The generation call failed. One attempt only, never retried; the
    /// diagnostic travels in the `details` field.
    Upstream(GenerateError),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::MissingMessage => write!(f, "message is missing or empty"),
            ApiError::Upstream(e) => write!(f, "upstream generation failed: {e}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::MissingMessage => (
                StatusCode::BAD_REQUEST,
                ChatFailure {
                    error: "Message is required".to_string(),
                    details: None,
                },
            ),
            ApiError::Upstream(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ChatFailure {
                    error: "An error occurred while processing your request.".to_string(),
                    details: Some(e.to_string()),
                },
            ),
        };
        (status, Json(body)).into_response()
    }
}
