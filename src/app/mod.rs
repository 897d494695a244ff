//! Application state types and entry glue.
//!
//! `AppState` is the single source of truth: the full member list, the search
//! query, selection state, the current page and the load status. Everything
//! the renderer shows is derived from it on each frame, and every user action
//! is a method on it.

pub mod keymap;
pub mod update;

use ratatui::style::Color;
use std::time::Instant;

use crate::fetch::Member;
use crate::search;

/// Outcome of the one initial fetch, driving which view renders.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RequestStatus {
    Loading,
    Success,
    Failed,
}

/// Current input mode for key handling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Edit,
}

/// Which field of the inline editor has focus.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EditField {
    Name,
    Email,
    Role,
}

impl EditField {
    pub fn next(self) -> Self {
        match self {
            EditField::Name => EditField::Email,
            EditField::Email => EditField::Role,
            EditField::Role => EditField::Name,
        }
    }
}

/// Transient buffer for the row being edited. Seeded from the record when
/// edit mode is entered; purely local until saved, lost on cancel.
#[derive(Clone, Debug)]
pub struct EditBuffer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub field: EditField,
}

impl EditBuffer {
    pub fn seeded_from(member: &Member) -> Self {
        Self {
            id: member.id.clone(),
            name: member.name.clone(),
            email: member.email.clone(),
            role: member.role.clone(),
            field: EditField::Name,
        }
    }

    /// The text of whichever field currently has focus.
    pub fn focused_value_mut(&mut self) -> &mut String {
        match self.field {
            EditField::Name => &mut self.name,
            EditField::Email => &mut self.email,
            EditField::Role => &mut self.role,
        }
    }

    /// The full replacement record the editor emits on save. The editor does
    /// not carry selection state, so a saved row comes back unchecked.
    pub fn into_member(self) -> Member {
        Member {
            id: self.id,
            name: self.name,
            email: self.email,
            role: self.role,
            is_checked: false,
        }
    }
}

/// Color palette for theming the TUI.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub text: Color,
    pub title: Color,
    pub border: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub checked: Color,
}

impl Theme {
    /// Dark default theme built from named terminal colors.
    pub fn dark() -> Self {
        Self {
            text: Color::Gray,
            title: Color::Cyan,
            border: Color::Gray,
            header_bg: Color::Black,
            header_fg: Color::Cyan,
            status_bg: Color::DarkGray,
            status_fg: Color::Black,
            highlight_fg: Color::Yellow,
            highlight_bg: Color::Reset,
            checked: Color::Green,
        }
    }

    /// Catppuccin Mocha variant.
    pub fn mocha() -> Self {
        Self {
            text: Color::Rgb(0xcd, 0xd6, 0xf4),
            title: Color::Rgb(0xcb, 0xa6, 0xf7),
            border: Color::Rgb(0x58, 0x5b, 0x70),
            header_bg: Color::Rgb(0x31, 0x32, 0x44),
            header_fg: Color::Rgb(0xb4, 0xbe, 0xfe),
            status_bg: Color::Rgb(0x45, 0x47, 0x5a),
            status_fg: Color::Rgb(0xcd, 0xd6, 0xf4),
            highlight_fg: Color::Rgb(0xf9, 0xe2, 0xaf),
            highlight_bg: Color::Rgb(0x45, 0x47, 0x5a),
            checked: Color::Rgb(0xa6, 0xe3, 0xa1),
        }
    }

    /// Load theme from a simple key=value file. Unknown or missing keys keep
    /// the `dark` defaults.
    pub fn from_file(path: &str) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        let mut theme = Self::dark();

        for raw_line in contents.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.splitn(2, '=');
            let key = parts.next().map(|s| s.trim()).unwrap_or("");
            let val = parts.next().map(|s| s.trim()).unwrap_or("");
            if key.is_empty() || val.is_empty() {
                continue;
            }
            if let Some(color) = Self::parse_color(val) {
                match key {
                    "text" => theme.text = color,
                    "title" => theme.title = color,
                    "border" => theme.border = color,
                    "header_bg" => theme.header_bg = color,
                    "header_fg" => theme.header_fg = color,
                    "status_bg" => theme.status_bg = color,
                    "status_fg" => theme.status_fg = color,
                    "highlight_fg" => theme.highlight_fg = color,
                    "highlight_bg" => theme.highlight_bg = color,
                    "checked" => theme.checked = color,
                    _ => {}
                }
            }
        }

        Some(theme)
    }

    /// Parse a color from hex ("#RRGGBB" or "RRGGBB") or the special name
    /// "reset".
    fn parse_color(s: &str) -> Option<Color> {
        let lower = s.trim().to_ascii_lowercase();
        if lower == "reset" {
            return Some(Color::Reset);
        }
        let hex = lower.strip_prefix('#').unwrap_or(lower.as_str());
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Some(Color::Rgb(r, g, b));
            }
        }
        None
    }

    /// Persist the theme to a config file in key=value format.
    pub fn write_file(&self, path: &str) -> std::io::Result<()> {
        use std::fmt::Write as _;

        fn color_to_str(c: Color) -> String {
            match c {
                Color::Rgb(r, g, b) => format!("#{:02X}{:02X}{:02X}", r, g, b),
                Color::Reset => "reset".to_string(),
                Color::Black => "#000000".to_string(),
                Color::Green => "#00FF00".to_string(),
                Color::Yellow => "#FFFF00".to_string(),
                Color::Cyan => "#00FFFF".to_string(),
                Color::Gray => "#B3B3B3".to_string(),
                Color::DarkGray => "#4D4D4D".to_string(),
                Color::White => "#FFFFFF".to_string(),
                _ => "reset".to_string(),
            }
        }

        let mut buf = String::new();
        buf.push_str("# member-admin theme configuration\n");
        buf.push_str("# Colors: hex as #RRGGBB or RRGGBB, or 'reset'\n\n");
        let mut kv = |k: &str, v: Color| {
            let _ = writeln!(&mut buf, "{} = {}", k, color_to_str(v));
        };
        kv("text", self.text);
        kv("title", self.title);
        kv("border", self.border);
        kv("header_bg", self.header_bg);
        kv("header_fg", self.header_fg);
        kv("status_bg", self.status_bg);
        kv("status_fg", self.status_fg);
        kv("highlight_fg", self.highlight_fg);
        kv("highlight_bg", self.highlight_bg);
        kv("checked", self.checked);

        std::fs::write(path, buf)
    }

    /// Load from `path` if it exists, otherwise write the defaults there and
    /// return them.
    pub fn load_or_init(path: &str) -> Self {
        if std::path::Path::new(path).exists() {
            return Self::from_file(path).unwrap_or_else(Self::dark);
        }
        let t = Self::dark();
        let _ = t.write_file(path);
        t
    }
}

pub struct AppState {
    pub started_at: Instant,
    /// Full member collection, server response order. No duplicate ids.
    pub members: Vec<Member>,
    pub search_input: String,
    /// Header checkbox affordance. Not derived from per-row state.
    pub select_all: bool,
    /// Zero-based page index into the filtered results.
    pub page: usize,
    pub request_status: RequestStatus,
    /// Cursor row within the current page.
    pub cursor: usize,
    pub input_mode: InputMode,
    pub edit: Option<EditBuffer>,
    pub theme: Theme,
    pub keymap: keymap::Keymap,
}

impl AppState {
    /// Fresh state at mount: loading, nothing fetched yet.
    pub fn new(theme: Theme, keymap: keymap::Keymap) -> Self {
        Self {
            started_at: Instant::now(),
            members: Vec::new(),
            search_input: String::new(),
            select_all: false,
            page: 0,
            request_status: RequestStatus::Loading,
            cursor: 0,
            input_mode: InputMode::Normal,
            edit: None,
            theme,
            keymap,
        }
    }

    /// Filtered view of the collection for the current query.
    pub fn results(&self) -> Vec<Member> {
        search::search_results(&self.members, &self.search_input)
    }

    /// Records visible on the current page (post filter, post slice).
    pub fn current_page(&self) -> Vec<Member> {
        let results = self.results();
        search::page_slice(&results, self.page).to_vec()
    }

    pub fn cursor_member(&self) -> Option<Member> {
        self.current_page().get(self.cursor).cloned()
    }

    /// Fold the fetch outcome into state. Success replaces the collection
    /// (records arrive unchecked); any error is the single failed state.
    pub fn apply_fetch(&mut self, outcome: crate::error::Result<Vec<Member>>) {
        match outcome {
            Ok(members) => {
                self.members = members;
                self.request_status = RequestStatus::Success;
            }
            Err(_) => {
                self.request_status = RequestStatus::Failed;
            }
        }
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search_input.push(c);
        self.page = 0;
        self.clamp_cursor();
    }

    pub fn pop_search_char(&mut self) {
        self.search_input.pop();
        self.page = 0;
        self.clamp_cursor();
    }

    pub fn clear_search(&mut self) {
        self.search_input.clear();
        self.page = 0;
        self.clamp_cursor();
    }

    /// Flip the checkbox of exactly the record with this id.
    pub fn toggle_member(&mut self, id: &str) {
        if let Some(m) = self.members.iter_mut().find(|m| m.id == id) {
            m.is_checked = !m.is_checked;
            tracing::debug!(id, checked = m.is_checked, "toggled member checkbox");
        }
    }

    /// Flip the header checkbox and apply it to the visible page only.
    /// Off-page records are untouched in both directions.
    pub fn toggle_select_all(&mut self) {
        self.select_all = !self.select_all;
        let page_ids: Vec<String> = self.current_page().into_iter().map(|m| m.id).collect();
        let checked = self.select_all;
        for m in self.members.iter_mut() {
            if page_ids.iter().any(|id| *id == m.id) {
                m.is_checked = checked;
            }
        }
        tracing::debug!(checked, rows = page_ids.len(), "toggled page selection");
    }

    /// Remove the record with this id, if present. No confirmation.
    pub fn delete_member(&mut self, id: &str) {
        let before = self.members.len();
        self.members.retain(|m| m.id != id);
        if self.members.len() != before {
            tracing::info!(id, "deleted member");
        }
        self.clamp_page();
    }

    /// Remove every checked record, regardless of page, then drop the header
    /// checkbox back to unchecked.
    pub fn delete_selected(&mut self) {
        let before = self.members.len();
        self.members.retain(|m| !m.is_checked);
        self.select_all = false;
        let removed = before - self.members.len();
        if removed > 0 {
            tracing::info!(removed, "deleted selected members");
        }
        self.clamp_page();
    }

    /// Whole-record replacement keyed by the payload's id.
    pub fn update_member(&mut self, payload: Member) {
        if let Some(slot) = self.members.iter_mut().find(|m| m.id == payload.id) {
            tracing::info!(id = %payload.id, "updated member");
            *slot = payload;
        }
    }

    pub fn next_page(&mut self) {
        let len = self.results().len();
        if self.page < search::last_page(len) {
            self.page += 1;
            self.cursor = 0;
        }
    }

    pub fn prev_page(&mut self) {
        if self.page > 0 {
            self.page -= 1;
            self.cursor = 0;
        }
    }

    pub fn move_cursor_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn move_cursor_down(&mut self) {
        let page_len = self.current_page().len();
        if self.cursor + 1 < page_len {
            self.cursor += 1;
        }
    }

    /// Seed the edit buffer from the record under the cursor and switch to
    /// edit mode. No-op when the page is empty.
    pub fn begin_edit(&mut self) {
        if let Some(member) = self.cursor_member() {
            self.edit = Some(EditBuffer::seeded_from(&member));
            self.input_mode = InputMode::Edit;
        }
    }

    /// Emit the edit buffer as a full replacement record and return to the
    /// display mode. Empty fields are accepted as-is.
    pub fn save_edit(&mut self) {
        if let Some(buf) = self.edit.take() {
            self.update_member(buf.into_member());
        }
        self.input_mode = InputMode::Normal;
    }

    pub fn cancel_edit(&mut self) {
        self.edit = None;
        self.input_mode = InputMode::Normal;
    }

    /// Pull the page back into range after the result set shrank.
    fn clamp_page(&mut self) {
        let len = self.results().len();
        let last = search::last_page(len);
        if self.page > last {
            self.page = last;
        }
        self.clamp_cursor();
    }

    fn clamp_cursor(&mut self) {
        let page_len = self.current_page().len();
        if page_len == 0 {
            self.cursor = 0;
        } else if self.cursor >= page_len {
            self.cursor = page_len - 1;
        }
    }
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;
