//! # TUI Components
//!
//! Components follow two patterns:
//!
//! - **Stateless (props-based)**: `TitleBar`, `Message`, `TypingIndicator` —
//!   created fresh each frame with the data they render.
//! - **Stateful (event-driven)**: `InputBar` (text buffer + cursor),
//!   `MessageList` (scroll state + layout cache).
//!
//! Components receive external data as props, never by reaching into global
//! state; `MessageList` composes `Message` and `TypingIndicator` the way the
//! transcript orders them.

pub mod input_bar;
pub mod message;
pub mod message_list;
pub mod title_bar;
pub mod typing;

pub use input_bar::{InputBar, InputEvent};
pub use message_list::{MessageList, MessageListState};
pub use title_bar::TitleBar;
pub use typing::TypingIndicator;
