//! Doc Browser - select documents in a folder tree with tri-state checkboxes
//!
//! This crate provides functionality for:
//! - A selection tree where folders reflect the state of their documents
//! - An interactive TUI for browsing and picking documents
//! - Scripted selection with tree and JSON output
//! - Following background tasks through their status API

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod selection;
pub mod tasks;
pub mod tui;

// Re-export commonly used types
pub use config::Config;
pub use error::{BrowserError, Result};
pub use selection::{CheckState, NodeDescriptor, NodeId, SelectionTree};
