//! Promptcraft - structured AI prompt editor
//!
//! Promptcraft builds prompts from named parts (role, context, ordered
//! instructions, verification steps, constraints and an output format) and
//! exports them as a tagged text document ready to paste into an AI tool.
//!
//! The record store and renderer live in the `promptstore` crate; this crate
//! is the shell around them.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface
//! - [`config`] - Configuration types and loading
//! - [`export`] - Render/clipboard helpers shared by the CLI and the editor
//! - [`tui`] - Interactive terminal editor

pub mod cli;
pub mod config;
pub mod export;
pub mod tui;

// Re-export commonly used types
pub use config::{Config, TuiConfig};
pub use export::{Exporter, copy_to_clipboard};
