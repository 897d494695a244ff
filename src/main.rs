//! member-admin binary entry point.
//!
//! Parses the CLI, points logging at a file (the terminal is in raw mode),
//! initializes the terminal, runs the TUI event loop, and restores the
//! terminal state on exit.

use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::app::{Theme, keymap::Keymap};
use crate::error::Result;

mod app;
mod error;
mod fetch;
mod search;
mod ui;

#[derive(Parser)]
#[command(name = "member-admin", about = "Browse and manage a member directory in the terminal")]
struct Args {
    /// JSON endpoint serving the member list
    #[arg(long, env = "MEMBER_ADMIN_ENDPOINT", default_value = fetch::DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Log file path; stdout belongs to the TUI
    #[arg(long, default_value = "member-admin.log")]
    log_file: String,

    /// Theme configuration file, created with defaults when missing
    #[arg(long, default_value = "theme.conf")]
    theme: String,

    /// Keybindings configuration file, created with defaults when missing
    #[arg(long, default_value = "keybinds.conf")]
    keybinds: String,
}

/// Route `tracing` output to the log file, filtered by `RUST_LOG`.
fn init_logging(path: &str) {
    let Ok(file) = std::fs::File::create(path) else {
        return;
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init();
}

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Program entry point: run the TUI and report any top-level error to stderr.
fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_file);
    tracing::info!(endpoint = %args.endpoint, "starting member-admin");

    let theme = Theme::load_or_init(&args.theme);
    let keymap = Keymap::load_or_init(&args.keybinds);

    let mut terminal = init_terminal().map_err(|e| format!("init terminal: {}", e))?;

    let res = app::run(&mut terminal, args.endpoint, theme, keymap);

    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    if let Err(err) = res {
        eprintln!("application error: {err}");
    }
    Ok(())
}
