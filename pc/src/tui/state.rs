//! Editor state
//!
//! Pure data structures for the terminal editor. No rendering logic here.
//! The session's `PromptStore` lives in [`AppState`] and is dropped with it.

use promptstore::{ListField, Prompt, PromptStore, TextField};

use crate::config::TuiConfig;

/// Which view is currently displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Form for the current prompt (default view)
    #[default]
    Editor,
    /// Saved prompts
    Library,
    /// Full-screen export text of the current prompt
    Preview,
}

/// Top-level views for Tab / arrow navigation (in order)
pub const TOP_LEVEL_VIEWS: [View; 3] = [View::Editor, View::Library, View::Preview];

impl View {
    /// Get the display name for the header
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Editor => "Editor",
            Self::Library => "Library",
            Self::Preview => "Preview",
        }
    }

    /// Position in [`TOP_LEVEL_VIEWS`]
    pub fn index(&self) -> usize {
        match self {
            Self::Editor => 0,
            Self::Library => 1,
            Self::Preview => 2,
        }
    }

    pub fn next(&self) -> Self {
        TOP_LEVEL_VIEWS[(self.index() + 1) % TOP_LEVEL_VIEWS.len()]
    }

    pub fn prev(&self) -> Self {
        TOP_LEVEL_VIEWS[(self.index() + TOP_LEVEL_VIEWS.len() - 1) % TOP_LEVEL_VIEWS.len()]
    }
}

/// A row of the editor form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Text(TextField),
    List(ListField),
}

/// Form rows in display order
///
/// Verification sits between instructions and constraints, matching the
/// export layout rather than storage order.
pub const FORM_FIELDS: [FormField; 7] = [
    FormField::Text(TextField::Name),
    FormField::Text(TextField::Role),
    FormField::Text(TextField::Context),
    FormField::List(ListField::Instructions),
    FormField::List(ListField::Verification),
    FormField::List(ListField::Constraints),
    FormField::Text(TextField::OutputFormat),
];

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Text(f) => f.label(),
            Self::List(f) => f.label(),
        }
    }

    /// Placeholder shown for an empty field
    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Text(TextField::Name) => "Give your prompt a descriptive name",
            Self::Text(TextField::Role) => {
                "Example: You are an Expert Data Analyst who excels at interpreting complex datasets..."
            }
            Self::Text(TextField::Context) => {
                "Example: The user will provide sales data that needs to be analyzed for trends and insights..."
            }
            Self::Text(TextField::OutputFormat) => "Example: 1. Summary of Findings 2. Detailed Analysis 3. Recommendations",
            Self::List(ListField::Instructions) => "Example: Analyze the data to identify top 3 trends...",
            Self::List(ListField::Verification) => {
                "Example: If uncertain about a fact, explicitly state the limitation..."
            }
            Self::List(ListField::Constraints) => "Example: Limit response to 3-5 paragraphs...",
        }
    }
}

/// What an in-progress edit will write to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    /// Replace a free-text field
    Text(TextField),
    /// Append a new list item
    NewItem(ListField),
    /// Replace an existing list item
    Item(ListField, usize),
}

impl EditTarget {
    /// Input prompt shown in the footer
    pub fn prompt_label(&self) -> String {
        match self {
            Self::Text(f) => f.label().to_string(),
            Self::NewItem(f) => format!("Add a new {}", f.item_label()),
            Self::Item(f, i) => format!("Edit {} {}", f.item_label(), i + 1),
        }
    }
}

/// Interaction mode (modal)
#[derive(Debug, Clone, Default)]
pub enum InteractionMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Typing into a field
    Editing { target: EditTarget, buffer: String },
    /// Confirmation dialog
    Confirm(ConfirmDialog),
    /// Help overlay
    Help,
}

impl InteractionMode {
    /// Check if in an editing mode
    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing { .. })
    }

    /// Get mutable input buffer
    pub fn input_buffer_mut(&mut self) -> Option<&mut String> {
        match self {
            Self::Editing { buffer, .. } => Some(buffer),
            _ => None,
        }
    }
}

/// Confirmation dialog for destructive actions
#[derive(Debug, Clone)]
pub struct ConfirmDialog {
    pub message: String,
    pub action: ConfirmAction,
    pub selected_button: bool, // false = No, true = Yes
}

impl ConfirmDialog {
    pub fn new(action: ConfirmAction, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            action,
            selected_button: false,
        }
    }

    pub fn quit() -> Self {
        Self::new(
            ConfirmAction::Quit,
            "Prompts are kept in memory only and will be lost. Quit anyway?",
        )
    }

    pub fn delete_prompt(index: usize, name: &str) -> Self {
        Self::new(ConfirmAction::DeletePrompt(index), format!("Delete '{}'?", name))
    }

    pub fn clear_form() -> Self {
        Self::new(ConfirmAction::ClearForm, "Discard the prompt you are editing?")
    }
}

/// Action to perform on confirm
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    Quit,
    DeletePrompt(usize),
    ClearForm,
}

/// Severity of a status-line message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// Transient status-line message
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

/// Selection state for list views
#[derive(Debug, Default, Clone)]
pub struct SelectionState {
    pub selected_index: usize,
}

impl SelectionState {
    pub fn select_next(&mut self, max_items: usize) {
        if max_items > 0 && self.selected_index < max_items - 1 {
            self.selected_index += 1;
        }
    }

    pub fn select_prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    pub fn select_last(&mut self, max_items: usize) {
        if max_items > 0 {
            self.selected_index = max_items - 1;
        }
    }

    /// Ensure selection is within bounds
    pub fn clamp(&mut self, max_items: usize) {
        if max_items == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= max_items {
            self.selected_index = max_items - 1;
        }
    }
}

/// Main editor state
#[derive(Debug)]
pub struct AppState {
    /// Saved prompts and the prompt being edited
    pub store: PromptStore,
    /// Current view
    pub current_view: View,
    /// Current interaction mode
    pub interaction_mode: InteractionMode,
    /// Should the app quit
    pub should_quit: bool,
    /// Last status message
    pub status: Option<StatusMessage>,

    // === Selection state per view ===
    /// Row of the editor form
    pub form_selection: SelectionState,
    /// Item within the selected list field
    pub item_selection: SelectionState,
    /// Row of the library table
    pub library_selection: SelectionState,

    // === Display ===
    /// Show the live preview beside the form
    pub show_preview: bool,
    /// Saved prompt shown in the preview view (None = current prompt)
    pub preview_target: Option<usize>,
    /// Scroll offset of the preview view
    pub preview_scroll: u16,
    /// Characters of role shown in the library table
    pub role_preview_width: usize,

    // === Pending actions ===
    /// Text waiting to be copied to the clipboard by the runner
    pub pending_copy: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&TuiConfig::default())
    }
}

impl AppState {
    /// Create new AppState with an empty store
    pub fn new(config: &TuiConfig) -> Self {
        Self {
            store: PromptStore::new(),
            current_view: View::default(),
            interaction_mode: InteractionMode::default(),
            should_quit: false,
            status: None,
            form_selection: SelectionState::default(),
            item_selection: SelectionState::default(),
            library_selection: SelectionState::default(),
            show_preview: config.show_preview,
            preview_target: None,
            preview_scroll: 0,
            role_preview_width: config.role_preview_width,
            pending_copy: None,
        }
    }

    /// Switch to a top-level view
    pub fn switch_view(&mut self, view: View) {
        self.current_view = view;
        self.preview_target = None;
        self.preview_scroll = 0;
        self.library_selection.clamp(self.store.len());
    }

    /// Form row under the cursor
    pub fn selected_form_field(&self) -> FormField {
        FORM_FIELDS[self.form_selection.selected_index.min(FORM_FIELDS.len() - 1)]
    }

    /// List field under the cursor, if the cursor is on one
    pub fn selected_list_field(&self) -> Option<ListField> {
        match self.selected_form_field() {
            FormField::List(field) => Some(field),
            FormField::Text(_) => None,
        }
    }

    /// Index of the selected item in the selected list field, if any
    pub fn selected_item(&self) -> Option<(ListField, usize)> {
        let field = self.selected_list_field()?;
        let index = self.item_selection.selected_index;
        (index < self.store.current().items(field).len()).then_some((field, index))
    }

    /// Saved prompt under the library cursor
    pub fn selected_prompt(&self) -> Option<(usize, &Prompt)> {
        let index = self.library_selection.selected_index;
        self.store.get(index).map(|p| (index, p))
    }

    /// Is there anything that would be lost on exit?
    pub fn has_unsaved_work(&self) -> bool {
        !self.store.is_empty() || self.store.current() != &Prompt::default()
    }

    /// Set an informational status message
    pub fn set_info(&mut self, msg: impl Into<String>) {
        self.status = Some(StatusMessage {
            kind: StatusKind::Info,
            text: msg.into(),
        });
    }

    /// Set an error status message
    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.status = Some(StatusMessage {
            kind: StatusKind::Error,
            text: msg.into(),
        });
    }

    /// Clear status message
    pub fn clear_status(&mut self) {
        self.status = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_cycle() {
        assert_eq!(View::Editor.next(), View::Library);
        assert_eq!(View::Preview.next(), View::Editor);
        assert_eq!(View::Editor.prev(), View::Preview);
        assert_eq!(View::Library.prev(), View::Editor);
    }

    #[test]
    fn test_form_fields_follow_export_order() {
        let lists: Vec<ListField> = FORM_FIELDS
            .iter()
            .filter_map(|f| match f {
                FormField::List(l) => Some(*l),
                FormField::Text(_) => None,
            })
            .collect();
        assert_eq!(
            lists,
            vec![ListField::Instructions, ListField::Verification, ListField::Constraints]
        );
        assert_eq!(FORM_FIELDS[0], FormField::Text(TextField::Name));
    }

    #[test]
    fn test_selection_state_navigation() {
        let mut selection = SelectionState::default();

        // Move down
        selection.select_next(10);
        assert_eq!(selection.selected_index, 1);

        // Move up
        selection.select_prev();
        assert_eq!(selection.selected_index, 0);

        // Can't go below 0
        selection.select_prev();
        assert_eq!(selection.selected_index, 0);

        // Jump to last
        selection.select_last(10);
        assert_eq!(selection.selected_index, 9);

        // Can't go past end
        selection.select_next(10);
        assert_eq!(selection.selected_index, 9);

        // Shrinking list pulls selection back
        selection.clamp(3);
        assert_eq!(selection.selected_index, 2);
        selection.clamp(0);
        assert_eq!(selection.selected_index, 0);
    }

    #[test]
    fn test_selected_item_requires_existing_item() {
        let mut state = AppState::default();
        state.form_selection.selected_index = 3; // Instructions
        assert_eq!(state.selected_list_field(), Some(ListField::Instructions));
        assert_eq!(state.selected_item(), None);

        state.store.add_list_item(ListField::Instructions, "step");
        assert_eq!(state.selected_item(), Some((ListField::Instructions, 0)));
    }

    #[test]
    fn test_has_unsaved_work() {
        let mut state = AppState::default();
        assert!(!state.has_unsaved_work());

        state.store.current_mut().role = "draft".to_string();
        assert!(state.has_unsaved_work());
    }

    #[test]
    fn test_edit_target_labels() {
        assert_eq!(EditTarget::Text(TextField::Role).prompt_label(), "AI System Role");
        assert_eq!(
            EditTarget::NewItem(ListField::Constraints).prompt_label(),
            "Add a new constraint"
        );
        assert_eq!(
            EditTarget::Item(ListField::Instructions, 1).prompt_label(),
            "Edit instruction 2"
        );
    }
}
