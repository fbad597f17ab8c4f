//! # Transcript
//!
//! The visible conversation: an append-only list of [`ChatMessage`] values
//! plus a counter of requests still showing a typing indicator. Messages are
//! created once and never mutated; nothing is persisted — the transcript
//! dies with the process.

use chrono::{Local, NaiveTime};

/// Fixed user-facing apology appended whenever a request fails for any
/// reason. Diagnostic detail goes to the log file, never to the transcript.
pub const APOLOGY: &str = "I apologize, but I'm having trouble processing \
    your request right now. Please make sure the relay server is running and \
    check parley.log for details.";

/// Who a message is from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    /// Display name shown in the message header.
    pub fn label(self) -> &'static str {
        match self {
            Sender::User => "You",
            Sender::Bot => "Support Bot",
        }
    }
}

/// One rendered chat bubble. Content is markup-escaped at construction so
/// neither user input nor model output can smuggle markup into the
/// transcript's markdown pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub content: String,
    pub sender: Sender,
    /// Display-formatted clock time captured at creation, e.g. "3:07 PM".
    pub timestamp: String,
}

impl ChatMessage {
    pub fn new(sender: Sender, content: &str, timestamp: String) -> Self {
        Self {
            content: escape_markup(content),
            sender,
            timestamp,
        }
    }

    /// Creates a message stamped with the current local clock time.
    pub fn now(sender: Sender, content: &str) -> Self {
        Self::new(sender, content, format_clock(Local::now().time()))
    }
}

/// Replaces `<` and `>` so markup renders as literal text instead of being
/// parsed as an element by the markdown renderer.
pub fn escape_markup(text: &str) -> String {
    text.replace('<', "&lt;").replace('>', "&gt;")
}

/// 12-hour clock without a leading zero, e.g. "3:07 PM".
pub fn format_clock(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

/// The conversation state the message list renders.
#[derive(Debug, Default)]
pub struct Transcript {
    pub entries: Vec<ChatMessage>,
    /// Requests awaiting a reply. The list shows one typing indicator while
    /// this is non-zero; each terminal event retires exactly one.
    pending: usize,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, content: &str) {
        self.entries.push(ChatMessage::now(Sender::User, content));
    }

    pub fn push_bot(&mut self, content: &str) {
        self.entries.push(ChatMessage::now(Sender::Bot, content));
    }

    /// Registers an in-flight request (shows the typing indicator).
    pub fn raise_typing(&mut self) {
        self.pending += 1;
    }

    /// Retires one in-flight request. Must be called before the terminal
    /// message for that request is appended.
    pub fn retire_typing(&mut self) {
        self.pending = self.pending.saturating_sub(1);
    }

    pub fn is_waiting(&self) -> bool {
        self.pending > 0
    }
}
