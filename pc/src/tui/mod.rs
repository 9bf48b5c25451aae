//! Terminal editor for Promptcraft
//!
//! Provides a form-driven editor for the prompt being written:
//! - Editor view with the seven prompt fields and a live preview
//! - Library of prompts saved this session
//! - Full-screen preview of the export text
//!
//! Saved prompts live for the session only.

mod app;
mod events;
mod runner;
pub mod state;
mod views;

pub use app::App;
pub use events::{Event, EventHandler};
pub use runner::TuiRunner;
pub use state::{AppState, InteractionMode, View};

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use eyre::Result;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::config::Config;
use crate::export::Exporter;

/// Terminal type alias
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for editor mode
pub fn init() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
pub fn restore() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Run the editor until the user quits
pub fn run(config: &Config, exporter: Exporter) -> Result<()> {
    let terminal = init()?;

    // Use a guard to ensure terminal is restored even on early return/error
    struct TerminalGuard;
    impl Drop for TerminalGuard {
        fn drop(&mut self) {
            let _ = restore();
        }
    }
    let _guard = TerminalGuard;

    let app = App::new(&config.tui, exporter);
    let mut runner = TuiRunner::new(terminal, app, Duration::from_millis(config.tui.tick_rate_ms));
    runner.run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_exports() {
        // Verify that all public types are accessible
        let _: fn() -> App = App::default;
        let _: fn() -> AppState = AppState::default;
        assert_eq!(View::default(), View::Editor);
        assert!(matches!(InteractionMode::default(), InteractionMode::Normal));
    }
}
