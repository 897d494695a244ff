//! The application event loop: draw, poll input, fold in the fetch result.

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::sync::mpsc;
use std::time::Duration;

use crate::app::keymap::{KeyAction, Keymap};
use crate::app::{AppState, InputMode, RequestStatus, Theme};
use crate::fetch;
use crate::ui;

pub fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    endpoint: String,
    theme: Theme,
    keymap: Keymap,
) -> Result<()> {
    let mut app = AppState::new(theme, keymap);
    let mut fetch_rx = Some(fetch::spawn_fetch(endpoint));

    loop {
        terminal.draw(|f| {
            ui::render(f, &mut app);
        })?;

        if let Some(rx) = &fetch_rx {
            match rx.try_recv() {
                Ok(outcome) => {
                    app.apply_fetch(outcome);
                    fetch_rx = None;
                }
                Err(mpsc::TryRecvError::Empty) => {}
                Err(mpsc::TryRecvError::Disconnected) => {
                    // Fetch thread died without reporting; treat as a failure.
                    app.request_status = RequestStatus::Failed;
                    fetch_rx = None;
                }
            }
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let keep_running = handle_key(&mut app, &key);
                    if !keep_running {
                        break;
                    }
                }
            }
        }
    }

    Ok(())
}

/// Dispatch one key press. Returns false when the app should exit.
pub fn handle_key(app: &mut AppState, key: &KeyEvent) -> bool {
    match app.input_mode {
        InputMode::Normal => handle_normal_key(app, key),
        InputMode::Search => {
            handle_search_key(app, key.code);
            true
        }
        InputMode::Edit => {
            handle_edit_key(app, key.code);
            true
        }
    }
}

fn handle_normal_key(app: &mut AppState, key: &KeyEvent) -> bool {
    match app.keymap.resolve(key) {
        Some(KeyAction::Quit) => return false,
        Some(KeyAction::StartSearch) => {
            if app.request_status == RequestStatus::Success {
                app.input_mode = InputMode::Search;
            }
        }
        Some(KeyAction::ToggleRow) => {
            if let Some(member) = app.cursor_member() {
                app.toggle_member(&member.id);
            }
        }
        Some(KeyAction::ToggleSelectAll) => {
            if app.request_status == RequestStatus::Success {
                app.toggle_select_all();
            }
        }
        Some(KeyAction::EditRow) => app.begin_edit(),
        Some(KeyAction::DeleteRow) => {
            if let Some(member) = app.cursor_member() {
                app.delete_member(&member.id);
            }
        }
        Some(KeyAction::DeleteSelected) => {
            if app.request_status == RequestStatus::Success {
                app.delete_selected();
            }
        }
        Some(KeyAction::MoveUp) => app.move_cursor_up(),
        Some(KeyAction::MoveDown) => app.move_cursor_down(),
        Some(KeyAction::PrevPage) => app.prev_page(),
        Some(KeyAction::NextPage) => app.next_page(),
        Some(KeyAction::Ignore) | None => {}
    }
    true
}

/// Search mode filters live: every keystroke narrows the view and resets the
/// page. Enter keeps the query and leaves search mode; Esc abandons it.
fn handle_search_key(app: &mut AppState, code: KeyCode) {
    match code {
        KeyCode::Enter => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Esc => {
            app.clear_search();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => app.pop_search_char(),
        KeyCode::Char(c) => app.push_search_char(c),
        _ => {}
    }
}

/// Edit mode owns the keyboard: Tab cycles fields, Enter saves the full
/// replacement record, Esc discards the buffer.
fn handle_edit_key(app: &mut AppState, code: KeyCode) {
    match code {
        KeyCode::Enter => app.save_edit(),
        KeyCode::Esc => app.cancel_edit(),
        KeyCode::Tab => {
            if let Some(buf) = app.edit.as_mut() {
                buf.field = buf.field.next();
            }
        }
        KeyCode::Backspace => {
            if let Some(buf) = app.edit.as_mut() {
                buf.focused_value_mut().pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(buf) = app.edit.as_mut() {
                buf.focused_value_mut().push(c);
            }
        }
        _ => {}
    }
}
