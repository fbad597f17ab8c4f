//! # MessageList Component
//!
//! Scrollable view of the conversation transcript.
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent scroll + layout state) and the
//! `Transcript` (props). Messages are immutable once appended, so cached
//! heights stay valid until the viewport width changes; only new entries are
//! measured each frame. The typing indicator is a virtual row appended after
//! the last entry while requests are in flight.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::transcript::Transcript;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::Message;
use crate::tui::components::typing::{TYPING_HEIGHT, TypingIndicator};
use crate::tui::event::TuiEvent;

/// Layout and scroll state for the message list.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    pub layout: LayoutCache,
    /// When true, auto-scroll to bottom on new content.
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames).
    pub viewport_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            stick_to_bottom: true, // Start attached to bottom
            viewport_height: 0,
        }
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self, content_height: u16) {
        let max_y = content_height.saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Re-engage auto-scroll if the user has scrolled back to the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let total: u16 = self.layout.heights.iter().sum();
        let max_y = total.saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }
}

impl EventHandler for MessageListState {
    type Event = (); // Scrolling is handled internally, no events emitted.

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
                None
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
                None
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
                None
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
                None
            }
            _ => None,
        }
    }
}

/// Scrollable conversation view, created fresh each frame.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub transcript: &'a Transcript,
    pub spinner_frame: usize,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        transcript: &'a Transcript,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            transcript,
            spinner_frame,
        }
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar

        // 1. Measure: reuse cached heights, append measurements for new
        // entries only.
        let layout = &mut self.state.layout;
        let reusable = layout.reusable_count(self.transcript.entries.len(), content_width);
        layout.heights.truncate(reusable);
        for message in self.transcript.entries.iter().skip(layout.heights.len()) {
            layout
                .heights
                .push(Message::calculate_height(message, content_width));
        }
        layout.update_metadata(self.transcript.entries.len(), content_width);

        let messages_height: u16 = layout.heights.iter().sum();
        let typing_height = if self.transcript.is_waiting() {
            TYPING_HEIGHT
        } else {
            0
        };
        let canvas_height = messages_height + typing_height;

        // 2. Clamp scroll (skip while auto-scrolling; scroll_to_bottom
        // targets the full canvas).
        self.state.viewport_height = area.height;
        if !self.state.stick_to_bottom {
            self.state.clamp_scroll(canvas_height);
        }

        // 3. Render every row into the scroll view.
        let mut scroll_view = ScrollView::new(Size::new(content_width, canvas_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = 0;
        for (message, &height) in self
            .transcript
            .entries
            .iter()
            .zip(self.state.layout.heights.iter())
        {
            let row = Rect::new(0, y_offset, content_width, height);
            scroll_view.render_widget(Message::new(message), row);
            y_offset += height;
        }

        if self.transcript.is_waiting() {
            let row = Rect::new(0, y_offset, content_width, TYPING_HEIGHT);
            scroll_view.render_widget(TypingIndicator::new(self.spinner_frame), row);
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// Cached per-entry height measurements.
///
/// Entries are append-only and immutable, so heights only invalidate when
/// the content width changes.
pub struct LayoutCache {
    pub heights: Vec<u16>,
    entry_count: usize,
    content_width: u16,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            entry_count: 0,
            content_width: 0,
        }
    }

    /// How many cached heights are still valid for this frame.
    pub fn reusable_count(&self, entry_count: usize, content_width: u16) -> usize {
        if self.content_width != content_width {
            return 0;
        }
        // Fewer entries than cached can only mean a fresh transcript.
        if entry_count < self.entry_count {
            return 0;
        }
        self.heights.len()
    }

    pub fn update_metadata(&mut self, entry_count: usize, content_width: u16) {
        self.entry_count = entry_count;
        self.content_width = content_width;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_cache_reuses_until_width_changes() {
        let mut cache = LayoutCache::new();
        cache.heights = vec![3, 4, 3];
        cache.update_metadata(3, 80);

        // Same width: everything reusable.
        assert_eq!(cache.reusable_count(3, 80), 3);
        // New entry appended: existing heights still valid.
        assert_eq!(cache.reusable_count(4, 80), 3);
        // Width changed: full re-measure.
        assert_eq!(cache.reusable_count(3, 40), 0);
        // Transcript reset: full re-measure.
        assert_eq!(cache.reusable_count(1, 80), 0);
    }

    #[test]
    fn test_scroll_up_unpins_from_bottom() {
        let mut state = MessageListState::new();
        assert!(state.stick_to_bottom);

        state.handle_event(&TuiEvent::ScrollUp);
        assert!(!state.stick_to_bottom);
    }

    #[test]
    fn test_scroll_down_repins_at_bottom() {
        let mut state = MessageListState::new();
        state.layout.heights = vec![2, 2];
        state.viewport_height = 10;
        state.stick_to_bottom = false;

        // Content (4) fits inside the viewport (10), so any scroll-down
        // lands at the bottom and re-pins.
        state.handle_event(&TuiEvent::ScrollDown);
        assert!(state.stick_to_bottom);
    }

    #[test]
    fn test_clamp_scroll_limits_offset() {
        let mut state = MessageListState::new();
        state.viewport_height = 5;
        state
            .scroll_state
            .set_offset(Position { x: 0, y: 100 });

        state.clamp_scroll(20);
        assert_eq!(state.scroll_state.offset().y, 15);
    }
}
