//! Export helpers
//!
//! Turns prompts into their export text (built-in layout or a user template)
//! and hands text to the system clipboard.

use std::path::Path;

use eyre::{Context, Result, eyre};
use promptstore::{Prompt, TemplateRenderer};
use tracing::{debug, warn};

use crate::config::Config;

/// Renders prompts for preview and export
pub struct Exporter {
    renderer: TemplateRenderer,
}

impl Default for Exporter {
    fn default() -> Self {
        Self {
            renderer: TemplateRenderer::builtin(),
        }
    }
}

impl Exporter {
    /// Build from config; an explicit template path wins over the config's
    pub fn new(config: &Config, template_override: Option<&Path>) -> Result<Self> {
        let path = template_override.map(Path::to_path_buf).or_else(|| config.template_path());
        debug!(?path, "Exporter::new: called");
        let renderer =
            TemplateRenderer::from_optional_file(path.as_deref()).context("Failed to load export template")?;
        Ok(Self { renderer })
    }

    /// Is a user template in effect?
    pub fn uses_template(&self) -> bool {
        self.renderer.has_override()
    }

    /// Render a prompt for export
    pub fn render(&self, prompt: &Prompt) -> Result<String> {
        self.renderer
            .render(prompt)
            .map_err(|e| eyre!("Failed to render prompt '{}': {}", prompt.name, e))
    }

    /// Render for on-screen preview; template failures show up in the text
    pub fn preview(&self, prompt: &Prompt) -> String {
        match self.render(prompt) {
            Ok(text) => text,
            Err(e) => {
                warn!("Preview render failed: {}", e);
                format!("Template error: {}", e)
            }
        }
    }
}

/// Copy text to the system clipboard
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    debug!(len = text.len(), "copy_to_clipboard: called");
    let mut clipboard = arboard::Clipboard::new().map_err(|e| eyre!("Clipboard unavailable: {}", e))?;
    clipboard
        .set_text(text.to_string())
        .map_err(|e| eyre!("Failed to copy to clipboard: {}", e))?;
    Ok(())
}
