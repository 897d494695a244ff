//! Shared UI components: status bar, loading and failure views.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::{AppState, InputMode, RequestStatus};
use crate::search;

/// Render the bottom status bar with mode and counts.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let mode = match app.input_mode {
        InputMode::Normal => "NORMAL",
        InputMode::Search => "SEARCH",
        InputMode::Edit => "EDIT",
    };
    let status = match app.request_status {
        RequestStatus::Loading => "loading",
        RequestStatus::Success => "ready",
        RequestStatus::Failed => "failed",
    };
    let results_len = app.results().len();
    let msg = format!(
        "mode: {mode}  status: {status}  page:{}/{}  members:{}",
        app.page + 1,
        search::page_count(results_len),
        app.members.len(),
    );
    let p = Paragraph::new(msg).style(
        Style::default()
            .fg(app.theme.status_fg)
            .bg(app.theme.status_bg),
    );
    f.render_widget(p, area);
}

/// Compute a rectangle centered within `area` with a maximum size.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// The view shown while the initial fetch is in flight.
pub fn render_loading(f: &mut Frame, area: Rect, app: &AppState) {
    let rect = centered_rect(40, 5, area);
    let elapsed = app.started_at.elapsed().as_secs();
    let body = format!("Loading members… ({elapsed}s)");
    let p = Paragraph::new(body).wrap(Wrap { trim: false }).block(
        Block::default()
            .title("Please wait")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

/// The view shown when the fetch came back non-success or not at all.
pub fn render_failure(f: &mut Frame, area: Rect, app: &AppState) {
    let rect = centered_rect(48, 6, area);
    let body = "Failed to load the member list.\nSee the log file for details; press q to quit.";
    let p = Paragraph::new(body)
        .wrap(Wrap { trim: false })
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .title("Load failed")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
