//! Library crate for member-admin.
//!
//! This crate exposes the building blocks of the TUI:
//! - Application state and update loop (`app`)
//! - Error and result types (`error`)
//! - The one-shot member directory fetch (`fetch`)
//! - In-memory search and pagination helpers (`search`)
//! - UI rendering and widgets (`ui`)
//!
//! It is used by the `member-admin` binary and by tests.
#![deny(rustdoc::broken_intra_doc_links)]

pub mod app;
pub mod error;
pub mod fetch;
pub mod search;
pub mod ui;

// Re-export commonly used items at the crate root for convenience
/// Convenient error and result types shared across the crate.
pub use error::{DynError, Result};
