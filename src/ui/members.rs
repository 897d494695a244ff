//! Members table: checkbox column, display and inline-edit rows, and the
//! pagination bar underneath.

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use crate::app::{AppState, EditBuffer, EditField, Theme};
use crate::search;

pub fn render_members_table(f: &mut Frame, area: Rect, app: &mut AppState) {
    let results = app.results();
    let page_members = search::page_slice(&results, app.page);

    let block = Block::default()
        .title("Members")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border));

    if page_members.is_empty() {
        let p = Paragraph::new("Sorry, no members found")
            .style(Style::default().fg(app.theme.text))
            .block(block);
        f.render_widget(p, area);
        return;
    }

    let editing_id = app.edit.as_ref().map(|b| b.id.clone());
    let rows = page_members.iter().enumerate().map(|(i, m)| {
        let row_style = if i == app.cursor {
            Style::default()
                .fg(app.theme.highlight_fg)
                .bg(app.theme.highlight_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text)
        };
        if editing_id.as_deref() == Some(m.id.as_str()) {
            if let Some(buf) = &app.edit {
                return edit_row(buf, &app.theme).style(row_style);
            }
        }
        let checkbox = if m.is_checked { "[x]" } else { "[ ]" };
        let checkbox_style = if m.is_checked {
            Style::default().fg(app.theme.checked)
        } else {
            row_style
        };
        Row::new(vec![
            Cell::from(checkbox).style(checkbox_style),
            Cell::from(m.name.clone()),
            Cell::from(m.email.clone()),
            Cell::from(m.role.clone()),
        ])
        .style(row_style)
    });

    let select_all_marker = if app.select_all { "[x]" } else { "[ ]" };
    let header = Row::new(vec![
        Cell::from(select_all_marker),
        Cell::from("NAME"),
        Cell::from("EMAIL"),
        Cell::from("ROLE"),
    ])
    .style(
        Style::default()
            .fg(app.theme.title)
            .add_modifier(Modifier::BOLD),
    );

    let widths = [
        Constraint::Length(4),
        Constraint::Percentage(30),
        Constraint::Percentage(45),
        Constraint::Percentage(25),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(1);

    f.render_widget(table, area);
}

/// The row under edit: the focused field carries a marker and a cursor bar.
fn edit_row<'a>(buf: &EditBuffer, theme: &Theme) -> Row<'a> {
    let field_cell = |field: EditField, value: &str| {
        if buf.field == field {
            Cell::from(format!("{value}▏")).style(
                Style::default()
                    .fg(theme.highlight_fg)
                    .add_modifier(Modifier::UNDERLINED),
            )
        } else {
            Cell::from(value.to_string())
        }
    };
    Row::new(vec![
        Cell::from(" ✎ "),
        field_cell(EditField::Name, &buf.name),
        field_cell(EditField::Email, &buf.email),
        field_cell(EditField::Role, &buf.role),
    ])
}

/// Pagination bar: consumes the filtered total and current page, the
/// page-change and bulk-delete requests arrive as key actions.
pub fn render_pagination_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let results_len = app.results().len();
    let checked = app.members.iter().filter(|m| m.is_checked).count();
    let msg = format!(
        "page {}/{}  matches:{}  total:{}  checked:{}",
        app.page + 1,
        search::page_count(results_len),
        results_len,
        app.members.len(),
        checked
    );
    let p = Paragraph::new(msg).style(Style::default().fg(app.theme.text));
    f.render_widget(p, area);
}
