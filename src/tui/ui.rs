//! Frame layout: title bar on top, transcript in the middle, input bar at
//! the bottom.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{MessageList, TitleBar};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    let input_height = tui.input_bar.calculate_height(frame.area().width);
    let [title_area, list_area, input_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(input_height),
    ])
    .areas(frame.area());

    TitleBar::new(&app.server_url, &app.status_message).render(frame, title_area);
    MessageList::new(&mut tui.message_list, &app.transcript, spinner_frame)
        .render(frame, list_area);
    tui.input_bar.render(frame, input_area);
}
