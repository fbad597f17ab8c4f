//! Route handlers for the relay.

use axum::Json;
use axum::extract::State;
use log::{debug, error, info};
use serde::Deserialize;

use crate::api::types::{ChatResponse, HEALTH_STATUS, HealthResponse};

use super::{ApiError, AppState};

/// Lenient inbound payload: `message` is optional at the serde level so a
/// body like `{}` reaches our own validation (and its 400 contract) instead
/// of axum's generic deserialization rejection.
#[derive(Debug, Deserialize)]
pub(super) struct ChatPayload {
    #[serde(default)]
    message: Option<String>,
}

/// `GET /api/test` — fixed liveness payload for the client's startup check.
pub(super) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HEALTH_STATUS.to_string(),
    })
}

/// `POST /api/chat` — validate, forward to the generator, return the reply.
pub(super) async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatPayload>,
) -> Result<Json<ChatResponse>, ApiError> {
    info!(
        "received chat request ({} bytes)",
        payload.message.as_deref().map_or(0, str::len)
    );
    debug!("chat request body: {:?}", payload);

    let message = payload.message.unwrap_or_default();
    if message.trim().is_empty() {
        error!("no message provided in request");
        return Err(ApiError::MissingMessage);
    }

    // The message is forwarded verbatim; a single attempt, no retries.
    let response = state.generator.generate(&message).await.map_err(|e| {
        error!("{} generation failed: {e}", state.generator.name());
        ApiError::Upstream(e)
    })?;

    info!("generation succeeded ({} bytes)", response.len());
    debug!("generation response: {response}");
    Ok(Json(ChatResponse { response }))
}
