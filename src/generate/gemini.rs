//! Gemini `generateContent` client.
//!
//! Speaks the non-streaming REST endpoint:
//! `POST {base}/v1beta/models/{model}:generateContent?key={api_key}` with a
//! single-part prompt, reading the first part of the first candidate.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::{GenerateError, TextGenerator};

/// The upstream call had no timeout originally; a hung upstream would hang
/// the relay request with it. Bound it without changing the success contract.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Serialize, Debug)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize, Debug)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize, Debug)]
struct Part<'a> {
    text: &'a str,
}

impl<'a> GenerateRequest<'a> {
    /// A single-turn, single-part prompt — all the relay ever sends.
    fn single_prompt(text: &'a str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part { text }],
            }],
        }
    }
}

#[derive(Deserialize, Debug)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize, Debug)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize, Debug)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

/// Pulls the first candidate's first part out of a response body.
fn first_candidate_text(response: GenerateResponse) -> Option<String> {
    response
        .candidates
        .into_iter()
        .next()?
        .content
        .parts
        .into_iter()
        .next()
        .map(|part| part.text)
}

// ============================================================================
// Generator Implementation
// ============================================================================

pub struct GeminiGenerator {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiGenerator {
    /// Creates a generator for the given credentials.
    ///
    /// `base_url` is the API host (trailing slash ignored); tests point it
    /// at a mock server.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let base: String = base_url.into();
        Self {
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: base.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let request = GenerateRequest::single_prompt(prompt);

        debug!(
            "Gemini request: model={}, prompt {} bytes",
            self.model,
            prompt.len()
        );

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| GenerateError::Network(e.to_string()))?;

        debug!("Gemini response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Gemini API error: {} - {}", status, message);
            return Err(GenerateError::Api { status, message });
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GenerateError::Parse(e.to_string()))?;

        first_candidate_text(body)
            .ok_or_else(|| GenerateError::Parse("response contained no candidate text".to_string()))
    }
}
