//! Prompt domain type
//!
//! A single editable prompt record with four free-text fields and three
//! ordered list fields.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A prompt record
///
/// Values are plain data: cloning a `Prompt` yields an independent copy, which
/// is what keeps the store's current record and its saved records apart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    /// Display name, required before saving
    #[serde(default)]
    pub name: String,

    /// Who the AI should act as
    #[serde(default)]
    pub role: String,

    /// Background information
    #[serde(default)]
    pub context: String,

    /// Step-by-step guidance, in render order
    #[serde(default)]
    pub instructions: Vec<String>,

    /// Boundaries to keep the AI on track
    #[serde(default)]
    pub constraints: Vec<String>,

    /// Ways to ensure accuracy and handle uncertainty
    #[serde(default)]
    pub verification: Vec<String>,

    /// How the response should be structured
    #[serde(default)]
    pub output_format: String,

    /// Save time (`YYYY-MM-DD HH:MM:SS`), empty until saved
    #[serde(default)]
    pub created_at: String,
}

impl Prompt {
    /// Create an empty prompt with the given name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Get a free-text field
    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::Name => &self.name,
            TextField::Role => &self.role,
            TextField::Context => &self.context,
            TextField::OutputFormat => &self.output_format,
        }
    }

    /// Replace a free-text field
    pub fn set_text(&mut self, field: TextField, value: impl Into<String>) {
        let value = value.into();
        debug!(%field, len = value.len(), "Prompt::set_text: called");
        match field {
            TextField::Name => self.name = value,
            TextField::Role => self.role = value,
            TextField::Context => self.context = value,
            TextField::OutputFormat => self.output_format = value,
        }
    }

    /// Get the items of a list field
    pub fn items(&self, field: ListField) -> &[String] {
        match field {
            ListField::Instructions => &self.instructions,
            ListField::Constraints => &self.constraints,
            ListField::Verification => &self.verification,
        }
    }

    pub(crate) fn items_mut(&mut self, field: ListField) -> &mut Vec<String> {
        match field {
            ListField::Instructions => &mut self.instructions,
            ListField::Constraints => &mut self.constraints,
            ListField::Verification => &mut self.verification,
        }
    }

    /// Build a one-row summary for list displays
    pub fn summary(&self, role_width: usize) -> PromptSummary {
        PromptSummary {
            name: self.name.clone(),
            role: truncate_with_ellipsis(&self.role, role_width),
            created_at: self.created_at.clone(),
            instruction_count: self.instructions.len(),
            constraint_count: self.constraints.len(),
            verification_count: self.verification.len(),
        }
    }
}

/// Truncate to `width` characters, appending "..." when anything was cut
fn truncate_with_ellipsis(s: &str, width: usize) -> String {
    match s.char_indices().nth(width) {
        Some((byte_idx, _)) => format!("{}...", &s[..byte_idx]),
        None => s.to_string(),
    }
}

/// Summary row for a saved prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptSummary {
    pub name: String,
    pub role: String,
    pub created_at: String,
    pub instruction_count: usize,
    pub constraint_count: usize,
    pub verification_count: usize,
}

/// Free-text fields of a prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    Name,
    Role,
    Context,
    OutputFormat,
}

impl TextField {
    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Prompt Name",
            Self::Role => "AI System Role",
            Self::Context => "Context",
            Self::OutputFormat => "Output Format",
        }
    }
}

impl std::fmt::Display for TextField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::Role => write!(f, "role"),
            Self::Context => write!(f, "context"),
            Self::OutputFormat => write!(f, "output-format"),
        }
    }
}


/// Ordered list fields of a prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListField {
    Instructions,
    Constraints,
    Verification,
}

impl ListField {
    /// All list fields in storage order
    pub const ALL: [ListField; 3] = [Self::Instructions, Self::Constraints, Self::Verification];

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Instructions => "Instructions",
            Self::Constraints => "Constraints",
            Self::Verification => "Verification Mechanisms",
        }
    }

    /// Label for a single item of this list
    pub fn item_label(&self) -> &'static str {
        match self {
            Self::Instructions => "instruction",
            Self::Constraints => "constraint",
            Self::Verification => "verification mechanism",
        }
    }
}

impl std::fmt::Display for ListField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Instructions => write!(f, "instructions"),
            Self::Constraints => write!(f, "constraints"),
            Self::Verification => write!(f, "verification"),
        }
    }
}
