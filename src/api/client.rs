//! HTTP client for the relay server, used by the terminal chat client.
//!
//! Every failure mode — connection refused, non-2xx status, unreadable body —
//! collapses into a [`ClientError`]; the controller turns all of them into
//! the same fixed apology message and keeps the diagnostic for the log file.

use std::fmt;

use log::{debug, warn};

use super::types::{ChatFailure, ChatRequest, ChatResponse, HealthResponse};

/// Errors raised while talking to the relay. These never reach the server;
/// they are absorbed entirely inside the chat client.
#[derive(Debug)]
pub enum ClientError {
    /// Network-level failure (DNS, connection refused, timeout).
    Network(String),
    /// The relay answered with a non-2xx status.
    Server { status: u16, message: String },
    /// The relay answered 2xx but the body was not the expected shape.
    Parse(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Network(msg) => write!(f, "network error: {msg}"),
            ClientError::Server { status, message } => {
                write!(f, "server error (HTTP {status}): {message}")
            }
            ClientError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ClientError {}

/// Thin reqwest wrapper around the relay's two endpoints.
pub struct ProxyClient {
    base_url: String,
    client: reqwest::Client,
}

impl ProxyClient {
    /// Creates a client for the relay at `base_url` (trailing slash ignored).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base: String = base_url.into();
        Self {
            base_url: base.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Posts one user message and returns the generated reply text.
    pub async fn post_chat(&self, message: &str) -> Result<String, ClientError> {
        debug!("sending message ({} bytes)", message.len());
        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&ChatRequest {
                message: message.to_string(),
            })
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // The relay's error bodies are JSON; fold `error` and `details`
            // into one diagnostic string for the log.
            let message = match response.json::<ChatFailure>().await {
                Ok(ChatFailure {
                    error,
                    details: Some(details),
                }) => format!("{error} ({details})"),
                Ok(ChatFailure { error, .. }) => error,
                Err(e) => format!("unreadable error body: {e}"),
            };
            warn!("relay returned HTTP {status}: {message}");
            return Err(ClientError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))?;
        debug!("received reply ({} bytes)", body.response.len());
        Ok(body.response)
    }

    /// Best-effort liveness probe against `GET /api/test`.
    pub async fn health_check(&self) -> Result<String, ClientError> {
        let response = self
            .client
            .get(format!("{}/api/test", self.base_url))
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ClientError::Server {
                status: response.status().as_u16(),
                message: "health endpoint returned an error status".to_string(),
            });
        }

        let body: HealthResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))?;
        Ok(body.status)
    }
}
