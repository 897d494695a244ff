//! Keybinding configuration: parse `keybinds.conf`, provide defaults, and
//! map keys to actions.
//!
//! Bindings only apply in normal mode; search and edit modes consume raw
//! characters. Multiple keys can map to the same action (arrows and hjkl
//! both navigate).

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Semantic keyboard actions available in normal mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    /// Enter search mode.
    StartSearch,
    /// Toggle the checkbox of the row under the cursor.
    ToggleRow,
    /// Toggle the header select-all checkbox (current page scope).
    ToggleSelectAll,
    /// Open the inline editor on the row under the cursor.
    EditRow,
    /// Delete the row under the cursor.
    DeleteRow,
    /// Delete every checked row, across all pages.
    DeleteSelected,
    /// Move the cursor up within the page.
    MoveUp,
    /// Move the cursor down within the page.
    MoveDown,
    /// Go to the previous page.
    PrevPage,
    /// Go to the next page.
    NextPage,
    /// Swallow the key without doing anything.
    Ignore,
}

/// Maps `(modifiers, code)` pairs to [`KeyAction`]s, with load/save support
/// for a plain key=value config file.
#[derive(Clone, Debug)]
pub struct Keymap {
    bindings: std::collections::HashMap<(KeyModifiers, KeyCode), KeyAction>,
}

impl Keymap {
    /// Default bindings: arrows plus vim keys for navigation, `/` search,
    /// Space checkbox, `a` select-all, `e`/Enter edit, `d`/Delete delete,
    /// `D` bulk delete, `q` quit.
    pub fn new_defaults() -> Self {
        use KeyCode::*;
        use KeyModifiers as M;
        let mut bindings = std::collections::HashMap::new();
        bindings.insert((M::NONE, Char('q')), KeyAction::Quit);
        bindings.insert((M::NONE, Esc), KeyAction::Ignore);
        bindings.insert((M::NONE, Char('/')), KeyAction::StartSearch);
        bindings.insert((M::NONE, Char(' ')), KeyAction::ToggleRow);
        bindings.insert((M::NONE, Char('a')), KeyAction::ToggleSelectAll);
        bindings.insert((M::NONE, Char('e')), KeyAction::EditRow);
        bindings.insert((M::NONE, Enter), KeyAction::EditRow);
        bindings.insert((M::NONE, Char('d')), KeyAction::DeleteRow);
        bindings.insert((M::NONE, Delete), KeyAction::DeleteRow);
        // Terminals differ on whether shifted letters carry the modifier.
        bindings.insert((M::NONE, Char('D')), KeyAction::DeleteSelected);
        bindings.insert((M::SHIFT, Char('D')), KeyAction::DeleteSelected);
        bindings.insert((M::NONE, Up), KeyAction::MoveUp);
        bindings.insert((M::NONE, Down), KeyAction::MoveDown);
        bindings.insert((M::NONE, Left), KeyAction::PrevPage);
        bindings.insert((M::NONE, Right), KeyAction::NextPage);
        bindings.insert((M::NONE, Char('k')), KeyAction::MoveUp);
        bindings.insert((M::NONE, Char('j')), KeyAction::MoveDown);
        bindings.insert((M::NONE, Char('h')), KeyAction::PrevPage);
        bindings.insert((M::NONE, Char('l')), KeyAction::NextPage);
        bindings.insert((M::NONE, PageUp), KeyAction::PrevPage);
        bindings.insert((M::NONE, PageDown), KeyAction::NextPage);
        Self { bindings }
    }

    /// Load a keymap from `path`, or write the defaults there if missing.
    pub fn load_or_init(path: &str) -> Self {
        if std::path::Path::new(path).exists() {
            return Self::from_file(path).unwrap_or_default();
        }
        let km = Self::default();
        let _ = km.write_file(path);
        km
    }

    /// Load from a config file in `<Action> = <KeySpec>` format. Starts from
    /// the defaults and overrides with user-specified bindings.
    pub fn from_file(path: &str) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        let mut map = Self::default();
        for raw in contents.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.splitn(2, '=');
            let lhs = parts.next().map(|s| s.trim()).unwrap_or("");
            let rhs = parts.next().map(|s| s.trim()).unwrap_or("");
            if lhs.is_empty() || rhs.is_empty() {
                continue;
            }
            if let (Some(action), Some(key)) = (parse_action(lhs), parse_key(rhs)) {
                map.bindings.insert(key, action);
            }
        }
        Some(map)
    }

    /// Write the current bindings to a config file for customization.
    pub fn write_file(&self, path: &str) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# member-admin keybindings\n");
        buf.push_str("# Format: <Action> = <KeySpec>\n");
        buf.push_str(
            "# KeySpecs: single characters, Space, Enter, Esc, Delete, arrows, PageUp, PageDown\n",
        );
        buf.push_str(
            "# Actions: Quit, StartSearch, ToggleRow, ToggleSelectAll, EditRow, DeleteRow, DeleteSelected, MoveUp, MoveDown, PrevPage, NextPage, Ignore\n\n",
        );

        // Emit a stable, readable subset of current bindings.
        let dump = [
            ("q", KeyAction::Quit),
            ("/", KeyAction::StartSearch),
            ("Space", KeyAction::ToggleRow),
            ("a", KeyAction::ToggleSelectAll),
            ("e", KeyAction::EditRow),
            ("Enter", KeyAction::EditRow),
            ("d", KeyAction::DeleteRow),
            ("Delete", KeyAction::DeleteRow),
            ("D", KeyAction::DeleteSelected),
            ("Up", KeyAction::MoveUp),
            ("Down", KeyAction::MoveDown),
            ("Left", KeyAction::PrevPage),
            ("Right", KeyAction::NextPage),
            ("k", KeyAction::MoveUp),
            ("j", KeyAction::MoveDown),
            ("h", KeyAction::PrevPage),
            ("l", KeyAction::NextPage),
            ("PageUp", KeyAction::PrevPage),
            ("PageDown", KeyAction::NextPage),
        ];
        for (k, a) in dump {
            let _ = writeln!(&mut buf, "{} = {}", format_action(a), k);
        }

        std::fs::write(path, buf)
    }

    /// Resolve a key event to its bound action, if any.
    pub fn resolve(&self, key: &KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&(key.modifiers, key.code)).copied()
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new_defaults()
    }
}

fn parse_key(spec: &str) -> Option<(KeyModifiers, KeyCode)> {
    use KeyCode::*;
    let s = spec.trim();
    let mut rest = s;
    let mut mods = KeyModifiers::NONE;
    if let Some(after) = s.strip_prefix("Ctrl+") {
        mods |= KeyModifiers::CONTROL;
        rest = after;
    }
    if let Some(after) = rest.strip_prefix("Shift+") {
        mods |= KeyModifiers::SHIFT;
        rest = after;
    }
    let code = match rest {
        "Enter" => Enter,
        "Delete" => Delete,
        "Space" => Char(' '),
        "/" => Char('/'),
        "Esc" | "Escape" => Esc,
        "Up" => Up,
        "Down" => Down,
        "Left" => Left,
        "Right" => Right,
        "PageUp" => PageUp,
        "PageDown" => PageDown,
        _ => {
            let chars: Vec<char> = rest.chars().collect();
            if chars.len() == 1 {
                KeyCode::Char(chars[0])
            } else {
                return None;
            }
        }
    };
    Some((mods, code))
}

fn parse_action(s: &str) -> Option<KeyAction> {
    match s.trim() {
        "Quit" => Some(KeyAction::Quit),
        "StartSearch" => Some(KeyAction::StartSearch),
        "ToggleRow" => Some(KeyAction::ToggleRow),
        "ToggleSelectAll" => Some(KeyAction::ToggleSelectAll),
        "EditRow" => Some(KeyAction::EditRow),
        "DeleteRow" => Some(KeyAction::DeleteRow),
        "DeleteSelected" => Some(KeyAction::DeleteSelected),
        "MoveUp" => Some(KeyAction::MoveUp),
        "MoveDown" => Some(KeyAction::MoveDown),
        "PrevPage" => Some(KeyAction::PrevPage),
        "NextPage" => Some(KeyAction::NextPage),
        "Ignore" => Some(KeyAction::Ignore),
        _ => None,
    }
}

pub fn format_action(a: KeyAction) -> &'static str {
    match a {
        KeyAction::Quit => "Quit",
        KeyAction::StartSearch => "StartSearch",
        KeyAction::ToggleRow => "ToggleRow",
        KeyAction::ToggleSelectAll => "ToggleSelectAll",
        KeyAction::EditRow => "EditRow",
        KeyAction::DeleteRow => "DeleteRow",
        KeyAction::DeleteSelected => "DeleteSelected",
        KeyAction::MoveUp => "MoveUp",
        KeyAction::MoveDown => "MoveDown",
        KeyAction::PrevPage => "PrevPage",
        KeyAction::NextPage => "NextPage",
        KeyAction::Ignore => "Ignore",
    }
}
