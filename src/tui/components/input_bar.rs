//! # InputBar Component
//!
//! Single-line text input at the bottom of the screen.
//!
//! The buffer is internal state; cursor position and horizontal scroll are
//! tracked so long input stays visible around the cursor. Enter emits
//! `InputEvent::Submit` without consuming the buffer — submission is
//! debounced upstream, and the event loop reads the freshest text at the
//! trailing edge (then clears it with [`InputBar::clear`]).

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Bordered single line.
const INPUT_HEIGHT: u16 = 3;

/// High-level events emitted by the InputBar.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Enter pressed with non-blank content.
    Submit,
    /// Text content changed.
    ContentChanged,
}

pub struct InputBar {
    /// Text buffer (internal state).
    buffer: String,
    /// Cursor byte position within the buffer.
    cursor: usize,
    /// Horizontal scroll offset in display columns.
    scroll: u16,
}

impl Default for InputBar {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBar {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            scroll: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
        self.scroll = 0;
    }

    pub fn calculate_height(&self, _width: u16) -> u16 {
        INPUT_HEIGHT
    }

    /// Display column of the cursor.
    fn cursor_col(&self) -> u16 {
        self.buffer[..self.cursor].width() as u16
    }

    /// Keeps the cursor inside the visible window of `inner_width` columns.
    fn update_scroll(&mut self, inner_width: u16) {
        if inner_width == 0 {
            return;
        }
        let col = self.cursor_col();
        if col < self.scroll {
            self.scroll = col;
        } else if col >= self.scroll + inner_width {
            self.scroll = col - inner_width + 1;
        }
    }

    fn prev_char_boundary(&self, index: usize) -> usize {
        let mut i = index - 1;
        while !self.buffer.is_char_boundary(i) {
            i -= 1;
        }
        i
    }

    fn next_char_boundary(&self, index: usize) -> usize {
        let mut i = index + 1;
        while i < self.buffer.len() && !self.buffer.is_char_boundary(i) {
            i += 1;
        }
        i
    }
}

impl Component for InputBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let inner_width = area.width.saturating_sub(2);
        self.update_scroll(inner_width);

        let block = Block::bordered()
            .border_type(ratatui::widgets::BorderType::Rounded)
            .title(" Message ");

        let input = Paragraph::new(self.buffer.as_str())
            .block(block)
            .scroll((0, self.scroll))
            .style(Style::default().fg(Color::Green));

        frame.render_widget(input, area);

        let cursor_x = area.x + 1 + self.cursor_col().saturating_sub(self.scroll);
        frame.set_cursor_position((cursor_x, area.y + 1));
    }
}

impl EventHandler for InputBar {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                // Single-line field: flatten pasted newlines to spaces.
                let flat = text.replace(['\r', '\n'], " ");
                self.buffer.insert_str(self.cursor, &flat);
                self.cursor += flat.len();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => {
                if self.cursor > 0 {
                    let prev = self.prev_char_boundary(self.cursor);
                    self.buffer.drain(prev..self.cursor);
                    self.cursor = prev;
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::Delete => {
                if self.cursor < self.buffer.len() {
                    let next = self.next_char_boundary(self.cursor);
                    self.buffer.drain(self.cursor..next);
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorLeft => {
                if self.cursor > 0 {
                    self.cursor = self.prev_char_boundary(self.cursor);
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorRight => {
                if self.cursor < self.buffer.len() {
                    self.cursor = self.next_char_boundary(self.cursor);
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorHome => {
                (self.cursor != 0).then(|| {
                    self.cursor = 0;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::CursorEnd => {
                (self.cursor != self.buffer.len()).then(|| {
                    self.cursor = self.buffer.len();
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::Submit => {
                if self.buffer.trim().is_empty() {
                    None
                } else {
                    Some(InputEvent::Submit)
                }
            }
            _ => None,
        }
    }
}
