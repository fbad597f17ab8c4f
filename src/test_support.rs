//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::api::ProxyClient;
use crate::core::state::App;
use crate::generate::{GenerateError, TextGenerator};

/// A scripted generator: returns a canned reply or a canned failure, and
/// records how it was called so tests can assert call counts and prompts.
pub struct StubGenerator {
    reply: Result<String, String>,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl StubGenerator {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn failing(error: GenerateError) -> Self {
        Self {
            reply: Err(error.to_string()),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    fn name(&self) -> &str {
        "stub"
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(detail) => Err(GenerateError::Network(detail.clone())),
        }
    }
}

/// Creates a test App pointed at an address no test ever connects to.
pub fn test_app() -> App {
    let client = Arc::new(ProxyClient::new("http://localhost:9"));
    App::new(client, "http://localhost:9".to_string())
}
