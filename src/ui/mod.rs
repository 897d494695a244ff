//! UI rendering: a pure function of the application state.

pub mod components;
pub mod members;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, InputMode, RequestStatus};

pub fn render(f: &mut Frame, app: &mut AppState) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5), Constraint::Length(1)].as_ref())
        .split(f.area());

    let prompt = if app.input_mode == InputMode::Search {
        format!("  Search: {}▏", app.search_input)
    } else if !app.search_input.is_empty() {
        format!("  Search: {}", app.search_input)
    } else {
        String::new()
    };
    let header = Paragraph::new(format!(
        "member-admin{prompt}  members:{}  — /: search; Space: check; a: check page; e: edit; d: delete; D: delete checked; q: quit",
        app.members.len()
    ))
    .block(
        Block::default()
            .title("member-admin")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    )
    .style(
        Style::default()
            .fg(app.theme.header_fg)
            .bg(app.theme.header_bg),
    );
    f.render_widget(header, root[0]);

    match app.request_status {
        RequestStatus::Loading => components::render_loading(f, root[1], app),
        RequestStatus::Failed => components::render_failure(f, root[1], app),
        RequestStatus::Success => {
            let body = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(4), Constraint::Length(1)].as_ref())
                .split(root[1]);
            members::render_members_table(f, body[0], app);
            members::render_pagination_bar(f, body[1], app);
        }
    }

    components::render_status_bar(f, root[2], app);
}
