//! CLI module
//!
//! Command-line interface for windowing lines of text.
//!
//! # Commands
//!
//! - `apply` - Print the lines inside a skip/limit window
//! - `page` - Print one page of lines
//! - `describe` - Show how a window is interpreted

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::{render_page, render_window, resolve_config, window_lines, Runner};
