//! # Chat Relay Service
//!
//! A single-purpose axum service bridging the chat client to the external
//! generation API:
//!
//! | Method | Path        | Purpose                                  |
//! |--------|-------------|------------------------------------------|
//! | POST   | `/api/chat` | Forward one message, return the reply    |
//! | GET    | `/api/test` | Fixed liveness payload for client checks |
//!
//! The generator is injected as `Arc<dyn TextGenerator>` through the router
//! state, so tests run the real router against a stub. Each request is
//! handled independently; there is no shared mutable state.

mod error;
mod handlers;

pub use error::ApiError;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use log::info;

use crate::core::config::ResolvedConfig;
use crate::generate::{GeminiGenerator, TextGenerator};

/// Shared state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<dyn TextGenerator>,
}

/// Builds the axum router with both routes and shared state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/test", get(handlers::health))
        .route("/api/chat", post(handlers::chat))
        .with_state(state)
}

/// Binds the configured port and serves until the process exits.
///
/// The caller has already verified the API key exists; missing credentials
/// are a fatal startup error, not a per-request one.
pub async fn run(api_key: String, config: &ResolvedConfig) -> std::io::Result<()> {
    let generator = Arc::new(GeminiGenerator::new(
        api_key,
        config.gemini_model.clone(),
        config.gemini_base_url.clone(),
    ));
    let state = AppState { generator };
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    let addr = listener.local_addr()?;

    info!("relay listening on http://{addr} (model: {})", config.gemini_model);
    println!("Server running at http://localhost:{}", addr.port());

    axum::serve(listener, app).await
}
