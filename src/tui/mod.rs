//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI, and
//! translates keyboard events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Animating** (typing indicator visible, debounce window pending):
//!   draws every ~80ms so the indicator dots move and the trailing-edge
//!   debounce fire is picked up promptly.
//! - **Idle**: sleeps up to 500ms, only redraws on events or resize.
//!
//! ## Request flow
//!
//! `submit` suspends at exactly one point: the POST to the relay, which runs
//! in a spawned task and reports back as an `Action` over an mpsc channel.
//! Each submission owns its own task and payload, so overlapping
//! submissions never share state. The UI keeps accepting input while
//! requests are in flight (further submissions are debounced, not blocked).

mod component;
mod components;
mod event;
pub mod markdown;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::api::ProxyClient;
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::debounce::Debouncer;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBar, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic).
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_bar: InputBar,
    pub debouncer: Debouncer,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            input_bar: InputBar::new(),
            debouncer: Debouncer::default(),
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,                        // Show cursor for input editing
            SetCursorStyle::SteadyBlock  // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide // Hide cursor on exit
        );
    }
}

pub fn run(config: &ResolvedConfig) -> std::io::Result<()> {
    let client = Arc::new(ProxyClient::new(config.server_url.clone()));
    let mut app = App::new(client.clone(), config.server_url.clone());
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background request tasks
    let (tx, rx) = mpsc::channel();

    // Best-effort connectivity check; logs only, never touches UI state.
    spawn_health_check(client);

    // Animation timer
    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let animating = app.transcript.is_waiting() || tui.debouncer.is_armed();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let elapsed = start_time.elapsed().as_secs_f32();
            let spinner_frame = (elapsed * 4.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Trailing edge of the debounce window: read the freshest input
        // text, clear the field, submit. Blank input stays untouched.
        if tui.debouncer.fire(Instant::now()) {
            let text = tui.input_bar.text().trim().to_string();
            if !text.is_empty() {
                tui.input_bar.clear();
                if let Effect::SpawnRequest(message) = update(&mut app, Action::Submit(text)) {
                    spawn_request(&app, message, tx.clone());
                }
            }
            needs_redraw = true;
        }

        // Dynamic poll timeout: short when animating, long when idle
        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match event {
                // Resize just needs a redraw (already flagged above)
                TuiEvent::Resize => {}
                TuiEvent::Quit | TuiEvent::ForceQuit => {
                    if update(&mut app, Action::Quit) == Effect::Quit {
                        should_quit = true;
                    }
                }
                TuiEvent::ScrollUp
                | TuiEvent::ScrollDown
                | TuiEvent::ScrollPageUp
                | TuiEvent::ScrollPageDown => {
                    tui.message_list.handle_event(&event);
                }
                other => {
                    if let Some(InputEvent::Submit) = tui.input_bar.handle_event(&other) {
                        // Enter arms (or re-arms) the debouncer; rapid
                        // presses collapse into one trailing-edge submit.
                        tui.debouncer.trigger(Instant::now());
                    }
                }
            }
        }

        if should_quit {
            break;
        }

        // Handle background task actions (request outcomes)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if let Effect::SpawnRequest(message) = update(&mut app, action) {
                spawn_request(&app, message, tx.clone());
            }
        }
    }

    ratatui::restore();
    Ok(())
}

/// Spawns the single async POST for one submission. The task owns its
/// payload and reports the terminal outcome as exactly one Action.
fn spawn_request(app: &App, message: String, tx: mpsc::Sender<Action>) {
    info!("Spawning chat request ({} bytes)", message.len());
    let client = app.client.clone();

    tokio::spawn(async move {
        let action = match client.post_chat(&message).await {
            Ok(reply) => Action::ReplyArrived(reply),
            Err(e) => {
                // Diagnostic detail is log-bound; the transcript only ever
                // shows the fixed apology.
                warn!("Chat request failed: {e}");
                Action::RequestFailed(e.to_string())
            }
        };
        if tx.send(action).is_err() {
            warn!("Failed to deliver request outcome: receiver dropped");
        }
    });
}

/// Startup connectivity self-check against the relay's health endpoint.
fn spawn_health_check(client: Arc<ProxyClient>) {
    tokio::spawn(async move {
        match client.health_check().await {
            Ok(status) => info!("Server connection test: {status}"),
            Err(e) => warn!("Server connection test failed: {e}"),
        }
    });
}
