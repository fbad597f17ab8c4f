use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Text;
use ratatui::widgets::{Block, Padding, Paragraph, Widget, Wrap};

use crate::core::transcript::{ChatMessage, Sender};
use crate::tui::component::Component;
use crate::tui::markdown;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// A stateless component that renders a single chat bubble.
///
/// User messages render as plain wrapped text; Bot messages go through the
/// markdown pass first. The bubble title carries the sender label and the
/// display timestamp, matching the original widget's message header.
///
/// [`calculate_height`](Self::calculate_height) predicts rendered height
/// with `textwrap` options that match ratatui's `Paragraph` wrapping, so the
/// parent `MessageList` can lay out scroll positions without rendering.
#[derive(Clone)]
pub struct Message<'a> {
    pub message: &'a ChatMessage,
}

impl<'a> Message<'a> {
    pub fn new(message: &'a ChatMessage) -> Self {
        Self { message }
    }

    fn accent(sender: Sender) -> Color {
        match sender {
            Sender::User => Color::Green,
            Sender::Bot => Color::Blue,
        }
    }

    /// Content as the lines that will be handed to `Paragraph`.
    fn content_text(message: &ChatMessage) -> Text<'static> {
        match message.sender {
            Sender::Bot => markdown::render(&message.content, Self::accent(Sender::Bot)),
            Sender::User => Text::from(message.content.clone()),
        }
    }

    /// Calculate the height required for this message at the given width.
    ///
    /// Wraps each rendered line independently, mirroring `Paragraph` with
    /// `Wrap { trim: true }`.
    pub fn calculate_height(message: &ChatMessage, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Terminal too narrow for borders + padding; still occupy a row.
            return 1;
        }

        let text = Self::content_text(message);
        let lines = markdown::plain_lines(&text);
        if lines.is_empty() {
            return VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let mut total: u16 = 0;
        for line in &lines {
            if line.trim().is_empty() {
                total += 1;
            } else {
                total += textwrap::wrap(line, &options).len().max(1) as u16;
            }
        }
        total.max(1) + VERTICAL_OVERHEAD
    }
}

impl<'a> Widget for Message<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let accent = Self::accent(self.message.sender);
        let title = format!(
            " {} · {} ",
            self.message.sender.label(),
            self.message.timestamp
        );

        let block = Block::bordered()
            .title(title)
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(Style::default().fg(accent).add_modifier(Modifier::DIM))
            .title_style(Style::default().fg(accent))
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        let paragraph = Paragraph::new(Self::content_text(self.message))
            .style(Style::default().fg(accent))
            .wrap(Wrap { trim: true });
        paragraph.render(inner_area, buf);
    }
}

impl<'a> Component for Message<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(self.clone(), area);
    }
}
