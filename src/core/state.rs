//! # Application State
//!
//! Core business state for the chat client. This module contains domain
//! state only - no TUI-specific types. Presentation state lives in the
//! `tui` module.
//!
//! ```text
//! App
//! ├── client: Arc<ProxyClient>   // HTTP client for the relay
//! ├── transcript: Transcript     // visible conversation + typing counter
//! ├── status_message: String     // status bar text
//! ├── server_url: String         // relay address shown in the title bar
//! └── last_error: Option<String> // most recent request diagnostic
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use std::sync::Arc;

use crate::api::ProxyClient;
use crate::core::transcript::Transcript;

pub struct App {
    pub client: Arc<ProxyClient>,
    pub transcript: Transcript,
    pub status_message: String,
    pub server_url: String,
    /// Diagnostic detail of the most recent failed request. Log-bound only;
    /// the transcript gets the fixed apology instead.
    pub last_error: Option<String>,
}

impl App {
    pub fn new(client: Arc<ProxyClient>, server_url: String) -> Self {
        Self {
            client,
            transcript: Transcript::new(),
            status_message: String::from("Welcome to Parley!"),
            server_url,
            last_error: None,
        }
    }
}
