use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Padding, Paragraph, Widget};

use crate::core::transcript::Sender;

/// Fixed rendered height of the indicator row (bordered single line).
pub const TYPING_HEIGHT: u16 = 3;

/// Animated dots in the indicator, cycled by spinner frame.
const DOT_FRAMES: [&str; 4] = ["·", "··", "···", "··"];

/// The transient "Support Bot is typing" placeholder shown while at least
/// one request is in flight. Removed (by the pending counter reaching zero)
/// before the terminal message for a request renders.
pub struct TypingIndicator {
    pub spinner_frame: usize,
}

impl TypingIndicator {
    pub fn new(spinner_frame: usize) -> Self {
        Self { spinner_frame }
    }

    fn dots(&self) -> &'static str {
        DOT_FRAMES[self.spinner_frame % DOT_FRAMES.len()]
    }
}

impl Widget for TypingIndicator {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let block = Block::bordered()
            .title(format!(" {} ", Sender::Bot.label()))
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(Style::default().fg(Color::Blue).add_modifier(Modifier::DIM))
            .title_style(Style::default().fg(Color::Blue))
            .padding(Padding::horizontal(1));

        let inner = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.dots())
            .style(Style::default().fg(Color::DarkGray))
            .render(inner, buf);
    }
}
