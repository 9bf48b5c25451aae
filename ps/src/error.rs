//! Store and template error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by [`crate::PromptStore`] operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Please give your prompt a name before saving")]
    MissingName,

    #[error("No saved prompt at index {index} (store holds {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

impl StoreError {
    /// Check if this is an input validation failure
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::MissingName)
    }

    /// Check if this is a stale or invalid index
    pub fn is_index(&self) -> bool {
        matches!(self, StoreError::IndexOutOfRange { .. })
    }
}

/// Errors raised while loading or rendering an export template
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Failed to read template {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid template: {0}")]
    Compile(#[from] handlebars::TemplateError),

    #[error("Failed to render template: {0}")]
    Render(#[from] handlebars::RenderError),
}
