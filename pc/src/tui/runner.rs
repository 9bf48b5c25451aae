//! Editor runner - main loop that owns the terminal
//!
//! The TuiRunner is responsible for:
//! - Drawing the UI every iteration
//! - Dispatching events to App for handling
//! - Carrying out side effects the App queues (clipboard copies)

use std::time::Duration;

use eyre::Result;
use tracing::{debug, info, warn};

use super::Tui;
use super::app::App;
use super::events::{Event, EventHandler};
use super::state::AppState;
use super::views;
use crate::export::copy_to_clipboard;

/// Editor runner that manages the terminal and event loop
pub struct TuiRunner {
    /// Application state
    app: App,
    /// Terminal handle
    terminal: Tui,
    /// Event source
    event_handler: EventHandler,
}

impl TuiRunner {
    /// Create a runner around an initialized terminal
    pub fn new(terminal: Tui, app: App, tick_rate: Duration) -> Self {
        debug!(?tick_rate, "TuiRunner::new: called");
        Self {
            app,
            terminal,
            event_handler: EventHandler::new(tick_rate),
        }
    }

    /// Run the editor main loop
    pub fn run(&mut self) -> Result<()> {
        debug!("TuiRunner::run: entering main loop");
        loop {
            self.terminal.draw(|frame| views::render(&self.app, frame))?;

            match self.event_handler.next()? {
                Event::Tick => {}
                Event::Key(key_event) => {
                    if self.app.handle_key(key_event) {
                        debug!("TuiRunner::run: force quit");
                        break;
                    }
                }
                Event::Resize(width, height) => {
                    debug!(width, height, "TuiRunner::run: terminal resized");
                }
            }

            apply_pending_copy(self.app.state_mut(), copy_to_clipboard);

            if self.app.state().should_quit {
                debug!("TuiRunner::run: should_quit is true, breaking");
                break;
            }
        }

        info!("Editor closed with {} saved prompt(s) discarded", self.app.state().store.len());
        Ok(())
    }
}

/// Hand queued text to the clipboard and report the outcome in the status line
fn apply_pending_copy<F>(state: &mut AppState, copy: F)
where
    F: FnOnce(&str) -> Result<()>,
{
    let Some(text) = state.pending_copy.take() else {
        return;
    };
    debug!(len = text.len(), "apply_pending_copy: called");
    match copy(&text) {
        Ok(()) => state.set_info("Prompt copied to clipboard!"),
        Err(e) => {
            warn!("Clipboard copy failed: {}", e);
            state.set_error(format!("Failed to copy: {}", e));
        }
    }
}
