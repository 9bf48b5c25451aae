//! PromptStore - in-memory prompt records and a fixed-layout renderer
//!
//! A prompt is a named set of fields (role, context, instructions,
//! constraints, verification steps, output format) that gets assembled into
//! a tagged text document a human pastes into an AI system.
//!
//! # Architecture
//!
//! ```text
//! PromptStore
//! ├── current      # the in-progress record being edited
//! └── prompts[]    # saved records, insertion order
//!
//! render(&Prompt) -> String   # pure, total
//! ```
//!
//! # Example
//!
//! ```
//! use promptstore::{ListField, PromptStore, TextField, render};
//!
//! let mut store = PromptStore::new();
//! store.current_mut().set_text(TextField::Name, "Demo");
//! store.add_list_item(ListField::Instructions, "Do A");
//! store.add_list_item(ListField::Instructions, "Do B");
//!
//! let preview = render(store.current());
//! assert!(preview.contains("<Instructions>\n1. Do A\n2. Do B\n</Instructions>"));
//!
//! store.save().unwrap();
//! assert_eq!(store.len(), 1);
//! assert!(store.current().name.is_empty());
//! ```

mod error;
mod prompt;
mod render;
mod store;
mod template;

pub use error::{StoreError, TemplateError};
pub use prompt::{ListField, Prompt, PromptSummary, TextField};
pub use render::{format_numbered, parse_numbered, render};
pub use store::PromptStore;
pub use template::{TemplateContext, TemplateRenderer};

/// Format of the `created_at` stamp applied on save
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Default width of the role column in prompt summaries
pub const DEFAULT_ROLE_PREVIEW_WIDTH: usize = 30;
