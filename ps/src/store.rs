//! In-memory prompt store
//!
//! Holds the saved prompts plus exactly one "current" prompt that the UI
//! edits field by field. Everything lives in process memory; the hosting
//! shell owns the store for the length of a session.

use chrono::Local;
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::prompt::{ListField, Prompt, PromptSummary};

/// Saved prompts plus the in-progress one
#[derive(Debug, Clone, Default)]
pub struct PromptStore {
    /// Saved prompts, insertion order
    prompts: Vec<Prompt>,
    /// The in-progress prompt
    current: Prompt,
}

impl PromptStore {
    /// Create an empty store with a blank current prompt
    pub fn new() -> Self {
        debug!("PromptStore::new: called");
        Self::default()
    }

    /// The in-progress prompt
    pub fn current(&self) -> &Prompt {
        &self.current
    }

    /// Mutable access to the in-progress prompt's fields
    pub fn current_mut(&mut self) -> &mut Prompt {
        &mut self.current
    }

    /// Replace the in-progress prompt wholesale
    pub fn replace_current(&mut self, prompt: Prompt) {
        debug!(name = %prompt.name, "PromptStore::replace_current: called");
        self.current = prompt;
    }

    /// Discard the in-progress prompt
    pub fn reset_current(&mut self) {
        debug!("PromptStore::reset_current: called");
        self.current = Prompt::default();
    }

    /// Append an item to one of the current prompt's lists
    ///
    /// Empty text is ignored. Returns whether the item was added.
    pub fn add_list_item(&mut self, field: ListField, text: impl Into<String>) -> bool {
        let text = text.into();
        debug!(%field, len = text.len(), "PromptStore::add_list_item: called");
        if text.is_empty() {
            debug!(%field, "PromptStore::add_list_item: empty text, ignoring");
            return false;
        }
        self.current.items_mut(field).push(text);
        true
    }

    /// Replace an item in one of the current prompt's lists
    ///
    /// Empty text and out-of-range indices are ignored. Returns whether the
    /// item was replaced.
    pub fn update_list_item(&mut self, field: ListField, index: usize, text: impl Into<String>) -> bool {
        let text = text.into();
        debug!(%field, index, len = text.len(), "PromptStore::update_list_item: called");
        if text.is_empty() {
            debug!(%field, "PromptStore::update_list_item: empty text, ignoring");
            return false;
        }
        match self.current.items_mut(field).get_mut(index) {
            Some(item) => {
                *item = text;
                true
            }
            None => {
                debug!(%field, index, "PromptStore::update_list_item: index out of range, ignoring");
                false
            }
        }
    }

    /// Remove an item from one of the current prompt's lists
    ///
    /// Returns the removed item, or `None` if the index was out of range.
    pub fn remove_list_item(&mut self, field: ListField, index: usize) -> Option<String> {
        debug!(%field, index, "PromptStore::remove_list_item: called");
        let items = self.current.items_mut(field);
        if index < items.len() {
            Some(items.remove(index))
        } else {
            debug!(%field, index, "PromptStore::remove_list_item: index out of range, ignoring");
            None
        }
    }

    /// Commit the current prompt, stamped with the local wall-clock time
    pub fn save(&mut self) -> Result<(), StoreError> {
        let now = Local::now().format(crate::TIMESTAMP_FORMAT).to_string();
        self.save_at(now)
    }

    /// Commit the current prompt with an explicit `created_at` stamp
    ///
    /// Fails without touching anything if the current prompt has no name.
    /// On success the saved copy is appended and current is reset.
    pub fn save_at(&mut self, created_at: impl Into<String>) -> Result<(), StoreError> {
        debug!(name = %self.current.name, "PromptStore::save_at: called");
        if self.current.name.is_empty() {
            warn!("Refusing to save prompt without a name");
            return Err(StoreError::MissingName);
        }

        let mut prompt = std::mem::take(&mut self.current);
        prompt.created_at = created_at.into();
        info!(
            "Saved prompt '{}' at {} (index {})",
            prompt.name,
            prompt.created_at,
            self.prompts.len()
        );
        self.prompts.push(prompt);
        Ok(())
    }

    /// Saved prompts in insertion order
    pub fn list(&self) -> &[Prompt] {
        &self.prompts
    }

    /// Borrow a saved prompt
    pub fn get(&self, index: usize) -> Option<&Prompt> {
        self.prompts.get(index)
    }

    /// Copy out a saved prompt
    ///
    /// The caller typically hands the copy to [`Self::replace_current`].
    pub fn load(&self, index: usize) -> Result<Prompt, StoreError> {
        debug!(index, len = self.prompts.len(), "PromptStore::load: called");
        self.prompts.get(index).cloned().ok_or(StoreError::IndexOutOfRange {
            index,
            len: self.prompts.len(),
        })
    }

    /// Load a saved prompt into current for editing
    ///
    /// Saving afterwards appends a new entry; the original stays as it was.
    pub fn edit(&mut self, index: usize) -> Result<(), StoreError> {
        debug!(index, "PromptStore::edit: called");
        let prompt = self.load(index)?;
        info!("Loaded prompt '{}' for editing", prompt.name);
        self.current = prompt;
        Ok(())
    }

    /// Remove a saved prompt, shifting later indices down by one
    pub fn delete(&mut self, index: usize) -> Result<Prompt, StoreError> {
        debug!(index, len = self.prompts.len(), "PromptStore::delete: called");
        if index >= self.prompts.len() {
            warn!(index, len = self.prompts.len(), "Delete with stale index");
            return Err(StoreError::IndexOutOfRange {
                index,
                len: self.prompts.len(),
            });
        }
        let removed = self.prompts.remove(index);
        info!("Deleted prompt '{}' (index {})", removed.name, index);
        Ok(removed)
    }

    /// Number of saved prompts
    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    /// Are there no saved prompts?
    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    /// Summary rows for every saved prompt
    pub fn summaries(&self, role_width: usize) -> Vec<PromptSummary> {
        self.prompts.iter().map(|p| p.summary(role_width)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::TextField;
    use crate::render::render;
    use chrono::NaiveDateTime;

    fn store_with(names: &[&str]) -> PromptStore {
        let mut store = PromptStore::new();
        for name in names {
            store.current_mut().set_text(TextField::Name, *name);
            store.save().unwrap();
        }
        store
    }

    fn names(store: &PromptStore) -> Vec<&str> {
        store.list().iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = PromptStore::new();
        assert!(store.is_empty());
        assert_eq!(store.current(), &Prompt::default());
    }

    #[test]
    fn test_save_without_name_fails() {
        let mut store = PromptStore::new();
        store.current_mut().role = "kept".to_string();
        store.add_list_item(ListField::Instructions, "kept too");

        let err = store.save().unwrap_err();
        assert!(err.is_validation());
        assert_eq!(store.len(), 0);
        assert_eq!(store.current().role, "kept");
        assert_eq!(store.current().instructions, vec!["kept too".to_string()]);
    }

    #[test]
    fn test_save_appends_and_resets_current() {
        let mut store = PromptStore::new();
        store.current_mut().set_text(TextField::Name, "X");
        store.current_mut().set_text(TextField::Role, "analyst");

        store.save().unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.current(), &Prompt::default());
        assert_eq!(store.list()[0].name, "X");
        assert_eq!(store.list()[0].role, "analyst");
    }

    #[test]
    fn test_save_stamps_well_formed_timestamp() {
        let store = store_with(&["X"]);
        let stamp = &store.list()[0].created_at;
        assert!(!stamp.is_empty());
        assert!(NaiveDateTime::parse_from_str(stamp, crate::TIMESTAMP_FORMAT).is_ok());
    }

    #[test]
    fn test_save_at_uses_given_stamp() {
        let mut store = PromptStore::new();
        store.current_mut().name = "fixed".to_string();
        store.save_at("2025-03-04 05:06:07").unwrap();
        assert_eq!(store.list()[0].created_at, "2025-03-04 05:06:07");
    }

    #[test]
    fn test_duplicate_names_allowed() {
        let store = store_with(&["same", "same"]);
        assert_eq!(names(&store), vec!["same", "same"]);
    }

    #[test]
    fn test_add_list_item_ignores_empty() {
        let mut store = PromptStore::new();
        assert!(store.add_list_item(ListField::Constraints, "Limit to 3 paragraphs"));
        assert!(!store.add_list_item(ListField::Constraints, ""));
        assert_eq!(store.current().constraints, vec!["Limit to 3 paragraphs".to_string()]);
    }

    #[test]
    fn test_update_list_item() {
        let mut store = PromptStore::new();
        store.add_list_item(ListField::Verification, "old");

        assert!(!store.update_list_item(ListField::Verification, 0, ""));
        assert_eq!(store.current().verification[0], "old");

        assert!(store.update_list_item(ListField::Verification, 0, "new"));
        assert_eq!(store.current().verification[0], "new");

        assert!(!store.update_list_item(ListField::Verification, 5, "nowhere"));
        assert_eq!(store.current().verification.len(), 1);
    }

    #[test]
    fn test_remove_list_item() {
        let mut store = PromptStore::new();
        for item in ["a", "b", "c"] {
            store.add_list_item(ListField::Instructions, item);
        }

        assert_eq!(store.remove_list_item(ListField::Instructions, 1), Some("b".to_string()));
        assert_eq!(store.current().instructions, vec!["a".to_string(), "c".to_string()]);
        assert_eq!(store.remove_list_item(ListField::Instructions, 2), None);
    }

    #[test]
    fn test_load_returns_independent_copy() {
        let mut store = PromptStore::new();
        store.current_mut().name = "orig".to_string();
        store.add_list_item(ListField::Instructions, "step");
        store.save().unwrap();

        let loaded = store.load(0).unwrap();
        let before = render(&store.list()[0]);
        store.replace_current(loaded);
        assert_eq!(render(store.current()), before);

        store.add_list_item(ListField::Instructions, "another");
        store.current_mut().role = "changed".to_string();
        assert_eq!(render(&store.list()[0]), before);
        assert_eq!(store.list()[0].instructions.len(), 1);
    }

    #[test]
    fn test_load_out_of_range() {
        let store = store_with(&["only"]);
        assert_eq!(store.load(1), Err(StoreError::IndexOutOfRange { index: 1, len: 1 }));
    }

    #[test]
    fn test_edit_then_save_appends() {
        let mut store = store_with(&["draft"]);
        store.edit(0).unwrap();
        assert_eq!(store.current().name, "draft");

        store.current_mut().role = "revised".to_string();
        store.save().unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.list()[0].role, "");
        assert_eq!(store.list()[1].role, "revised");
    }

    #[test]
    fn test_edit_out_of_range_keeps_current() {
        let mut store = PromptStore::new();
        store.current_mut().name = "wip".to_string();
        assert!(store.edit(0).unwrap_err().is_index());
        assert_eq!(store.current().name, "wip");
    }

    #[test]
    fn test_delete_shifts_indices() {
        let mut store = store_with(&["a", "b", "c", "d"]);
        let removed = store.delete(1).unwrap();
        assert_eq!(removed.name, "b");
        assert_eq!(names(&store), vec!["a", "c", "d"]);
    }

    #[test]
    fn test_delete_out_of_range_leaves_store() {
        let mut store = store_with(&["a", "b"]);
        let err = store.delete(2).unwrap_err();
        assert!(err.is_index());
        assert_eq!(names(&store), vec!["a", "b"]);
    }

    #[test]
    fn test_summaries() {
        let mut store = PromptStore::new();
        store.current_mut().name = "report".to_string();
        store.current_mut().role = "You are an Expert Essay Writer specialized in academic content".to_string();
        store.add_list_item(ListField::Instructions, "one");
        store.save_at("2025-01-02 03:04:05").unwrap();

        let summaries = store.summaries(crate::DEFAULT_ROLE_PREVIEW_WIDTH);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].role, "You are an Expert Essay Writer...");
        assert_eq!(summaries[0].created_at, "2025-01-02 03:04:05");
        assert_eq!(summaries[0].instruction_count, 1);
    }

    #[test]
    fn test_reset_current() {
        let mut store = PromptStore::new();
        store.current_mut().name = "scratch".to_string();
        store.reset_current();
        assert!(store.current().name.is_empty());
    }
}
