use serde::{Deserialize, Serialize};

/// Body of `POST /api/chat`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub message: String,
}

/// Successful reply from the relay: the generated text, nothing else.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChatResponse {
    pub response: String,
}

/// Error payload returned by the relay.
///
/// `details` carries the diagnostic string on upstream failures (HTTP 500)
/// and is omitted entirely from validation errors (HTTP 400).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChatFailure {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Fixed liveness payload of `GET /api/test`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HealthResponse {
    pub status: String,
}

/// The status string the health endpoint always returns.
pub const HEALTH_STATUS: &str = "Server is running";
