use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

/// Top status line: app name, relay address, and the current status text.
pub struct TitleBar<'a> {
    pub server_url: &'a str,
    pub status: &'a str,
}

impl<'a> TitleBar<'a> {
    pub fn new(server_url: &'a str, status: &'a str) -> Self {
        Self { server_url, status }
    }
}

impl<'a> Component for TitleBar<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled(
                " Parley ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(self.server_url, Style::default().fg(Color::DarkGray)),
            Span::raw("  "),
            Span::styled(self.status, Style::default().fg(Color::Gray)),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}
