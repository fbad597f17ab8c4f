//! # Actions
//!
//! Everything that can happen in the chat client becomes an `Action`.
//! User submits a message? That's `Action::Submit(text)`.
//! The relay answers? That's `Action::ReplyArrived(text)`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns the `Effect` the adapter must perform. No I/O
//! here — the TUI layer spawns the actual request.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Per submission the state walks: Idle → Sent (typing shown) →
//! {Resolved | Failed} → Idle. Each invocation owns its own transient
//! state, so overlapping submissions are safe — the typing counter tracks
//! how many are still in flight.

use crate::core::state::App;
use crate::core::transcript::APOLOGY;

#[derive(Debug)]
pub enum Action {
    /// User submitted input text (already debounced by the adapter).
    Submit(String),
    /// The relay answered with generated text.
    ReplyArrived(String),
    /// The request failed anywhere along the way; payload is the diagnostic.
    RequestFailed(String),
    Quit,
}

/// I/O the adapter must perform after a reducer step.
#[derive(Debug, PartialEq)]
pub enum Effect {
    None,
    /// Spawn one async POST of this message to the relay.
    SpawnRequest(String),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(text) => {
            let trimmed = text.trim();
            // Whitespace-only input is a complete no-op: no transcript
            // change, no network call.
            if trimmed.is_empty() {
                return Effect::None;
            }
            app.transcript.push_user(trimmed);
            app.transcript.raise_typing();
            app.status_message = String::from("Waiting for reply...");
            Effect::SpawnRequest(trimmed.to_string())
        }
        Action::ReplyArrived(text) => {
            // The indicator retires before the terminal message renders.
            app.transcript.retire_typing();
            app.transcript.push_bot(&text);
            if !app.transcript.is_waiting() {
                app.status_message = String::from("Ready");
            }
            Effect::None
        }
        Action::RequestFailed(detail) => {
            app.transcript.retire_typing();
            app.transcript.push_bot(APOLOGY);
            app.last_error = Some(detail);
            app.status_message = String::from("Request failed");
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transcript::Sender;
    use crate::test_support::test_app;

    #[test]
    fn test_submit_appends_user_message_and_spawns_request() {
        let mut app = test_app();

        let effect = update(&mut app, Action::Submit("hello".to_string()));

        assert_eq!(effect, Effect::SpawnRequest("hello".to_string()));
        assert_eq!(app.transcript.entries.len(), 1);
        assert_eq!(app.transcript.entries[0].sender, Sender::User);
        assert_eq!(app.transcript.entries[0].content, "hello");
        assert!(app.transcript.is_waiting());
    }

    #[test]
    fn test_submit_trims_before_sending() {
        let mut app = test_app();
        let effect = update(&mut app, Action::Submit("  hi there  ".to_string()));
        assert_eq!(effect, Effect::SpawnRequest("hi there".to_string()));
        assert_eq!(app.transcript.entries[0].content, "hi there");
    }

    #[test]
    fn test_whitespace_submit_is_a_no_op() {
        let mut app = test_app();

        for input in ["", "   ", "\t\n  "] {
            let effect = update(&mut app, Action::Submit(input.to_string()));
            assert_eq!(effect, Effect::None);
        }

        assert!(app.transcript.entries.is_empty());
        assert!(!app.transcript.is_waiting());
    }

    #[test]
    fn test_reply_retires_indicator_and_appends_bot_message() {
        let mut app = test_app();
        update(&mut app, Action::Submit("hello".to_string()));

        let effect = update(&mut app, Action::ReplyArrived("hi there".to_string()));

        assert_eq!(effect, Effect::None);
        assert!(!app.transcript.is_waiting());
        assert_eq!(app.transcript.entries.len(), 2);
        assert_eq!(app.transcript.entries[1].sender, Sender::Bot);
        assert_eq!(app.transcript.entries[1].content, "hi there");
    }

    #[test]
    fn test_failure_renders_fixed_apology_only() {
        let mut app = test_app();
        update(&mut app, Action::Submit("hello".to_string()));

        update(
            &mut app,
            Action::RequestFailed("connection refused".to_string()),
        );

        assert!(!app.transcript.is_waiting());
        let last = app.transcript.entries.last().unwrap();
        assert_eq!(last.sender, Sender::Bot);
        assert_eq!(last.content, APOLOGY);
        // The diagnostic stays out of the transcript.
        assert!(!last.content.contains("connection refused"));
        assert_eq!(app.last_error.as_deref(), Some("connection refused"));
    }

    /// Every submission yields exactly one terminal event, even when two
    /// requests overlap.
    #[test]
    fn test_overlapping_submissions_account_separately() {
        let mut app = test_app();
        update(&mut app, Action::Submit("first".to_string()));
        update(&mut app, Action::Submit("second".to_string()));
        assert!(app.transcript.is_waiting());

        update(&mut app, Action::ReplyArrived("reply one".to_string()));
        // One request still outstanding: indicator stays up.
        assert!(app.transcript.is_waiting());

        update(&mut app, Action::RequestFailed("timeout".to_string()));
        assert!(!app.transcript.is_waiting());

        // 2 user messages + 1 reply + 1 apology.
        assert_eq!(app.transcript.entries.len(), 4);
    }

    #[test]
    fn test_markup_in_submission_is_escaped_in_transcript() {
        let mut app = test_app();
        update(&mut app, Action::Submit("<script>alert(1)</script>".to_string()));

        assert_eq!(
            app.transcript.entries[0].content,
            "&lt;script&gt;alert(1)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_quit_produces_quit_effect() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
