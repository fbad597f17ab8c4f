//! External generation API boundary.
//!
//! The relay depends on [`TextGenerator`], never on a concrete HTTP client,
//! so tests can substitute a stub and the handler stays decoupled from the
//! upstream wire format.

mod gemini;

pub use gemini::GeminiGenerator;

use std::fmt;

use async_trait::async_trait;

/// Errors that can occur while calling the generation API.
/// All of them map to the relay's single 500 upstream-failure response;
/// none of them is ever retried.
#[derive(Debug)]
pub enum GenerateError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The API returned an error response.
    Api { status: u16, message: String },
    /// The API answered 2xx but the body held no usable completion.
    Parse(String),
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::Network(msg) => write!(f, "network error: {msg}"),
            GenerateError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            GenerateError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for GenerateError {}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Returns the name of the generator (for logging).
    fn name(&self) -> &str;

    /// Produces a single text completion for a single text prompt.
    /// One attempt per call — retry policy is the caller's concern, and the
    /// relay deliberately has none.
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError>;
}
