//! Editor application - event handling and state management
//!
//! The App struct owns the AppState and maps keyboard events onto prompt
//! store operations. It does not do any rendering - that's delegated to the
//! views module.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use promptstore::Prompt;
use tracing::{debug, trace, warn};

use super::state::{
    AppState, ConfirmAction, ConfirmDialog, EditTarget, FORM_FIELDS, FormField, InteractionMode, View,
};
use crate::config::TuiConfig;
use crate::export::Exporter;

/// Lines moved by PgUp/PgDn in the preview
const PAGE_SCROLL: u16 = 10;

/// Editor application
pub struct App {
    /// Application state
    state: AppState,
    /// Renders prompts for preview and copy
    exporter: Exporter,
}

impl Default for App {
    fn default() -> Self {
        Self::new(&TuiConfig::default(), Exporter::default())
    }
}

impl App {
    /// Create a new application instance
    pub fn new(config: &TuiConfig, exporter: Exporter) -> Self {
        debug!(?config, "App::new: called");
        Self {
            state: AppState::new(config),
            exporter,
        }
    }

    /// Get reference to state
    pub fn state(&self) -> &AppState {
        trace!("App::state: called");
        &self.state
    }

    /// Get mutable reference to state
    pub fn state_mut(&mut self) -> &mut AppState {
        trace!("App::state_mut: called");
        &mut self.state
    }

    /// Rendered text of a prompt, with template errors inlined
    pub fn preview_of(&self, prompt: &Prompt) -> String {
        self.exporter.preview(prompt)
    }

    /// Rendered text for the preview view
    pub fn preview_text(&self) -> String {
        let prompt = self
            .state
            .preview_target
            .and_then(|i| self.state.store.get(i))
            .unwrap_or_else(|| self.state.store.current());
        self.preview_of(prompt)
    }

    /// Handle a key event
    ///
    /// Returns true if the application should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        debug!(?key, "App::handle_key: called");
        // Status messages last until the next key press
        self.state.clear_status();

        match &self.state.interaction_mode {
            InteractionMode::Normal => {
                debug!("App::handle_key: Normal mode");
                self.handle_normal_key(key)
            }
            InteractionMode::Editing { .. } => {
                debug!("App::handle_key: Editing mode");
                self.handle_editing_key(key)
            }
            InteractionMode::Confirm(_) => {
                debug!("App::handle_key: Confirm mode");
                self.handle_confirm_key(key)
            }
            InteractionMode::Help => {
                debug!("App::handle_key: Help mode");
                self.handle_help_key(key)
            }
        }
    }

    /// Handle key in normal mode
    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        debug!(?key, "App::handle_normal_key: called");
        match (key.code, key.modifiers) {
            // === Quit ===
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                debug!("App::handle_normal_key: Ctrl+C force quit");
                return true;
            }
            (KeyCode::Char('q'), _) => {
                debug!("App::handle_normal_key: quit requested");
                if self.state.has_unsaved_work() {
                    debug!("App::handle_normal_key: showing quit confirm dialog");
                    self.state.interaction_mode = InteractionMode::Confirm(ConfirmDialog::quit());
                } else {
                    self.state.should_quit = true;
                }
            }

            // === Help ===
            (KeyCode::Char('?'), _) | (KeyCode::F(1), _) => {
                debug!("App::handle_normal_key: showing help");
                self.state.interaction_mode = InteractionMode::Help;
            }

            // === View switching ===
            (KeyCode::Tab, _) | (KeyCode::Right, _) => {
                let next = self.state.current_view.next();
                debug!(?next, "App::handle_normal_key: next view");
                self.state.switch_view(next);
            }
            (KeyCode::BackTab, _) | (KeyCode::Left, _) => {
                let prev = self.state.current_view.prev();
                debug!(?prev, "App::handle_normal_key: previous view");
                self.state.switch_view(prev);
            }

            _ => match self.state.current_view {
                View::Editor => self.handle_editor_key(key),
                View::Library => self.handle_library_key(key),
                View::Preview => self.handle_preview_key(key),
            },
        }

        false
    }

    /// Handle key in the editor view
    fn handle_editor_key(&mut self, key: KeyEvent) {
        debug!(?key, "App::handle_editor_key: called");
        match (key.code, key.modifiers) {
            (KeyCode::Char('s'), _) => self.save_current(),
            (KeyCode::Up, _) | (KeyCode::Char('k'), _) => {
                self.state.form_selection.select_prev();
                self.state.item_selection.select_first();
            }
            (KeyCode::Down, _) | (KeyCode::Char('j'), _) => {
                self.state.form_selection.select_next(FORM_FIELDS.len());
                self.state.item_selection.select_first();
            }
            (KeyCode::Enter, _) => {
                let target = match self.state.selected_form_field() {
                    FormField::Text(field) => EditTarget::Text(field),
                    FormField::List(field) => EditTarget::NewItem(field),
                };
                self.start_editing(target);
            }
            (KeyCode::Char('['), _) => self.state.item_selection.select_prev(),
            (KeyCode::Char(']'), _) => {
                if let Some(field) = self.state.selected_list_field() {
                    let len = self.state.store.current().items(field).len();
                    self.state.item_selection.select_next(len);
                }
            }
            (KeyCode::Char('e'), _) => match self.state.selected_item() {
                Some((field, index)) => self.start_editing(EditTarget::Item(field, index)),
                None => debug!("App::handle_editor_key: no item selected to edit"),
            },
            (KeyCode::Char('x'), _) | (KeyCode::Delete, _) => self.remove_selected_item(),
            (KeyCode::Char('p'), _) => {
                self.state.show_preview = !self.state.show_preview;
                debug!(show_preview = self.state.show_preview, "App::handle_editor_key: toggled preview");
            }
            (KeyCode::Char('y'), _) => {
                let prompt = self.state.store.current().clone();
                self.queue_copy(&prompt);
            }
            (KeyCode::Char('n'), _) => {
                if self.state.store.current() == &Prompt::default() {
                    debug!("App::handle_editor_key: form already empty");
                } else {
                    self.state.interaction_mode = InteractionMode::Confirm(ConfirmDialog::clear_form());
                }
            }
            _ => {
                debug!("App::handle_editor_key: unhandled key");
            }
        }
    }

    /// Handle key in the library view
    fn handle_library_key(&mut self, key: KeyEvent) {
        debug!(?key, "App::handle_library_key: called");
        let len = self.state.store.len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.state.library_selection.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.state.library_selection.select_next(len),
            KeyCode::Home | KeyCode::Char('g') => self.state.library_selection.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.state.library_selection.select_last(len),
            KeyCode::Enter => {
                if let Some((index, _)) = self.state.selected_prompt() {
                    debug!(index, "App::handle_library_key: opening preview");
                    self.state.switch_view(View::Preview);
                    self.state.preview_target = Some(index);
                }
            }
            KeyCode::Char('l') => self.load_selected(),
            KeyCode::Char('D') => {
                if let Some((index, prompt)) = self.state.selected_prompt() {
                    let dialog = ConfirmDialog::delete_prompt(index, &prompt.name);
                    self.state.interaction_mode = InteractionMode::Confirm(dialog);
                }
            }
            KeyCode::Char('y') => {
                if let Some((_, prompt)) = self.state.selected_prompt() {
                    let prompt = prompt.clone();
                    self.queue_copy(&prompt);
                }
            }
            _ => {
                debug!("App::handle_library_key: unhandled key");
            }
        }
    }

    /// Handle key in the preview view
    fn handle_preview_key(&mut self, key: KeyEvent) {
        debug!(?key, "App::handle_preview_key: called");
        let scroll = self.state.preview_scroll;
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.state.preview_scroll = scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.state.preview_scroll = scroll.saturating_add(1),
            KeyCode::PageUp => self.state.preview_scroll = scroll.saturating_sub(PAGE_SCROLL),
            KeyCode::PageDown => self.state.preview_scroll = scroll.saturating_add(PAGE_SCROLL),
            KeyCode::Home | KeyCode::Char('g') => self.state.preview_scroll = 0,
            KeyCode::Esc if self.state.preview_target.is_some() => self.state.switch_view(View::Library),
            KeyCode::Char('y') => {
                let prompt = self
                    .state
                    .preview_target
                    .and_then(|i| self.state.store.get(i))
                    .unwrap_or_else(|| self.state.store.current())
                    .clone();
                self.queue_copy(&prompt);
            }
            _ => {
                debug!("App::handle_preview_key: unhandled key");
            }
        }
    }

    /// Handle key while typing into a field
    fn handle_editing_key(&mut self, key: KeyEvent) -> bool {
        debug!(?key, "App::handle_editing_key: called");
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => {
                debug!("App::handle_editing_key: edit cancelled");
                self.state.interaction_mode = InteractionMode::Normal;
            }
            (KeyCode::Enter, KeyModifiers::ALT) => {
                if let Some(buffer) = self.state.interaction_mode.input_buffer_mut() {
                    buffer.push('\n');
                }
            }
            (KeyCode::Enter, _) => self.commit_edit(),
            (KeyCode::Backspace, _) => {
                if let Some(buffer) = self.state.interaction_mode.input_buffer_mut() {
                    buffer.pop();
                }
            }
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                if let Some(buffer) = self.state.interaction_mode.input_buffer_mut() {
                    buffer.clear();
                }
            }
            (KeyCode::Char(c), modifiers) if !modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(buffer) = self.state.interaction_mode.input_buffer_mut() {
                    buffer.push(c);
                }
            }
            _ => {
                debug!("App::handle_editing_key: unhandled key");
            }
        }

        false
    }

    /// Handle key in confirm dialog
    fn handle_confirm_key(&mut self, key: KeyEvent) -> bool {
        debug!(?key, "App::handle_confirm_key: called");
        match key.code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                debug!("App::handle_confirm_key: cancel confirm");
                self.state.interaction_mode = InteractionMode::Normal;
            }
            KeyCode::Enter => {
                let mode = std::mem::take(&mut self.state.interaction_mode);
                if let InteractionMode::Confirm(dialog) = mode
                    && dialog.selected_button
                {
                    debug!(action = ?dialog.action, "App::handle_confirm_key: user confirmed");
                    self.perform(dialog.action);
                } else {
                    debug!("App::handle_confirm_key: user did not confirm");
                }
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::Char('y') | KeyCode::Char('Y') => {
                if let InteractionMode::Confirm(dialog) = &mut self.state.interaction_mode {
                    if matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')) {
                        dialog.selected_button = true;
                    } else {
                        dialog.selected_button = !dialog.selected_button;
                    }
                }
            }
            _ => {
                debug!("App::handle_confirm_key: unhandled key");
            }
        }

        false
    }

    /// Handle key in help mode
    fn handle_help_key(&mut self, key: KeyEvent) -> bool {
        debug!(?key, "App::handle_help_key: called");
        match key.code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                debug!("App::handle_help_key: closing help");
                self.state.interaction_mode = InteractionMode::Normal;
            }
            _ => {
                debug!("App::handle_help_key: unhandled key");
            }
        }

        false
    }

    /// Enter editing mode, pre-filled with the target's current value
    fn start_editing(&mut self, target: EditTarget) {
        debug!(?target, "App::start_editing: called");
        let current = self.state.store.current();
        let buffer = match target {
            EditTarget::Text(field) => current.text(field).to_string(),
            EditTarget::NewItem(_) => String::new(),
            EditTarget::Item(field, index) => current.items(field).get(index).cloned().unwrap_or_default(),
        };
        self.state.interaction_mode = InteractionMode::Editing { target, buffer };
    }

    /// Write the edit buffer back to the current prompt
    fn commit_edit(&mut self) {
        let InteractionMode::Editing { target, buffer } = std::mem::take(&mut self.state.interaction_mode) else {
            return;
        };
        debug!(?target, len = buffer.len(), "App::commit_edit: called");

        match target {
            EditTarget::Text(field) => {
                self.state.store.current_mut().set_text(field, buffer);
            }
            EditTarget::NewItem(field) => {
                if self.state.store.add_list_item(field, buffer) {
                    let len = self.state.store.current().items(field).len();
                    self.state.item_selection.select_last(len);
                } else {
                    self.state.set_error(format!("Cannot add an empty {}", field.item_label()));
                }
            }
            EditTarget::Item(field, index) => {
                if !self.state.store.update_list_item(field, index, buffer) {
                    self.state.set_error(format!("{} {} was not changed", field.label(), index + 1));
                }
            }
        }
    }

    /// Remove the selected item of the selected list field
    fn remove_selected_item(&mut self) {
        let Some((field, index)) = self.state.selected_item() else {
            debug!("App::remove_selected_item: nothing selected");
            return;
        };
        if let Some(removed) = self.state.store.remove_list_item(field, index) {
            debug!(%field, index, %removed, "App::remove_selected_item: removed");
            let len = self.state.store.current().items(field).len();
            self.state.item_selection.clamp(len);
        }
    }

    /// Save the current prompt into the library
    fn save_current(&mut self) {
        debug!("App::save_current: called");
        match self.state.store.save() {
            Ok(()) => {
                self.state.item_selection.select_first();
                self.state.set_info("Prompt saved successfully!");
            }
            Err(e) => {
                warn!("Save rejected: {}", e);
                self.state.set_error(e.to_string());
            }
        }
    }

    /// Copy the library selection into the editor
    fn load_selected(&mut self) {
        let index = self.state.library_selection.selected_index;
        debug!(index, "App::load_selected: called");
        match self.state.store.edit(index) {
            Ok(()) => {
                let name = self.state.store.current().name.clone();
                self.state.switch_view(View::Editor);
                self.state.form_selection.select_first();
                self.state.item_selection.select_first();
                self.state.set_info(format!("Loaded '{}' for editing", name));
            }
            Err(e) => {
                warn!("Load failed: {}", e);
                self.state.set_error(e.to_string());
            }
        }
    }

    /// Render a prompt and hand it to the runner for copying
    fn queue_copy(&mut self, prompt: &Prompt) {
        debug!(name = %prompt.name, "App::queue_copy: called");
        match self.exporter.render(prompt) {
            Ok(text) => self.state.pending_copy = Some(text),
            Err(e) => self.state.set_error(e.to_string()),
        }
    }

    /// Execute a confirmed action
    fn perform(&mut self, action: ConfirmAction) {
        match action {
            ConfirmAction::Quit => {
                debug!("App::perform: quit confirmed");
                self.state.should_quit = true;
            }
            ConfirmAction::DeletePrompt(index) => match self.state.store.delete(index) {
                Ok(prompt) => {
                    debug!(name = %prompt.name, "App::perform: prompt deleted");
                    self.state.library_selection.clamp(self.state.store.len());
                    self.state.set_info(format!("Deleted '{}'", prompt.name));
                }
                Err(e) => {
                    warn!("Delete failed: {}", e);
                    self.state.set_error(e.to_string());
                }
            },
            ConfirmAction::ClearForm => {
                debug!("App::perform: clearing form");
                self.state.store.reset_current();
                self.state.form_selection.select_first();
                self.state.item_selection.select_first();
            }
        }
    }
}
