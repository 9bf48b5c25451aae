//! Export template override
//!
//! Users can swap the fixed export layout for their own Handlebars template.
//! Without one, rendering falls through to [`crate::render`].

use std::path::Path;

use handlebars::Handlebars;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::TemplateError;
use crate::prompt::Prompt;
use crate::render::{format_numbered, render};

const TEMPLATE_NAME: &str = "prompt";

/// Values exposed to an export template
#[derive(Debug, Clone, Serialize)]
pub struct TemplateContext<'a> {
    pub name: &'a str,
    pub role: &'a str,
    pub context: &'a str,
    pub output_format: &'a str,
    pub created_at: &'a str,
    /// Numbered blocks, as they appear in the default layout
    pub instructions: String,
    pub constraints: String,
    pub verification: String,
    /// Raw items for templates that want their own list formatting
    pub instruction_items: &'a [String],
    pub constraint_items: &'a [String],
    pub verification_items: &'a [String],
}

impl<'a> TemplateContext<'a> {
    pub fn new(prompt: &'a Prompt) -> Self {
        Self {
            name: &prompt.name,
            role: &prompt.role,
            context: &prompt.context,
            output_format: &prompt.output_format,
            created_at: &prompt.created_at,
            instructions: format_numbered(&prompt.instructions),
            constraints: format_numbered(&prompt.constraints),
            verification: format_numbered(&prompt.verification),
            instruction_items: &prompt.instructions,
            constraint_items: &prompt.constraints,
            verification_items: &prompt.verification,
        }
    }
}

/// Renders prompts with an optional user template
pub struct TemplateRenderer {
    /// Handlebars template engine
    hbs: Handlebars<'static>,
    /// Whether a user template is registered
    has_override: bool,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TemplateRenderer {
    /// Renderer that always uses the fixed layout
    pub fn builtin() -> Self {
        debug!("TemplateRenderer::builtin: called");
        Self {
            hbs: new_registry(),
            has_override: false,
        }
    }

    /// Renderer using the given template source
    pub fn from_source(source: &str) -> Result<Self, TemplateError> {
        debug!(len = source.len(), "TemplateRenderer::from_source: called");
        let mut hbs = new_registry();
        hbs.register_template_string(TEMPLATE_NAME, source)?;
        Ok(Self {
            hbs,
            has_override: true,
        })
    }

    /// Renderer using a template file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TemplateError> {
        let path = path.as_ref();
        debug!(?path, "TemplateRenderer::from_file: called");
        let source = std::fs::read_to_string(path).map_err(|source| TemplateError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Using export template {}", path.display());
        Self::from_source(&source)
    }

    /// Renderer from an optional template file path
    pub fn from_optional_file(path: Option<&Path>) -> Result<Self, TemplateError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::builtin()),
        }
    }

    /// Is a user template in effect?
    pub fn has_override(&self) -> bool {
        self.has_override
    }

    /// Render a prompt
    pub fn render(&self, prompt: &Prompt) -> Result<String, TemplateError> {
        debug!(name = %prompt.name, has_override = self.has_override, "TemplateRenderer::render: called");
        if !self.has_override {
            return Ok(render(prompt));
        }
        Ok(self.hbs.render(TEMPLATE_NAME, &TemplateContext::new(prompt))?)
    }
}

/// Handlebars registry with HTML escaping off; field text goes in verbatim
fn new_registry() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();
    hbs.register_escape_fn(handlebars::no_escape);
    hbs
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    /// Handlebars spelling of the fixed layout
    const LAYOUT: &str = "<s>\n{{role}}\n</s>\n\n<Context>\n{{context}}\n</Context>\n\n<Instructions>\n{{instructions}}\n</Instructions>\n\n<Verification>\n{{verification}}\n</Verification>\n\n<Constraints>\n{{constraints}}\n</Constraints>\n\n<Output Format>\n{{output_format}}\n</Output Format>\n";

    fn sample() -> Prompt {
        Prompt {
            name: "sample".to_string(),
            role: "You are a <careful> reviewer & editor".to_string(),
            context: "Quarterly sales data".to_string(),
            instructions: vec!["Find trends".to_string(), "Rank them".to_string()],
            constraints: vec!["Max 3 paragraphs".to_string()],
            verification: vec!["State uncertainty".to_string()],
            output_format: "Summary, then details".to_string(),
            created_at: "2025-06-01 12:00:00".to_string(),
        }
    }

    #[test]
    fn test_builtin_matches_render() {
        let renderer = TemplateRenderer::builtin();
        assert!(!renderer.has_override());
        assert_eq!(renderer.render(&sample()).unwrap(), render(&sample()));
    }

    #[test]
    fn test_layout_template_matches_render() {
        let renderer = TemplateRenderer::from_source(LAYOUT).unwrap();
        assert!(renderer.has_override());
        assert_eq!(renderer.render(&sample()).unwrap(), render(&sample()));
        assert_eq!(
            renderer.render(&Prompt::named("Demo")).unwrap(),
            render(&Prompt::named("Demo"))
        );
    }

    #[test]
    fn test_custom_template_items() {
        let renderer = TemplateRenderer::from_source(
            "# {{name}} ({{created_at}})\n{{#each instruction_items}}- {{this}}\n{{/each}}",
        )
        .unwrap();

        let out = renderer.render(&sample()).unwrap();
        assert_eq!(out, "# sample (2025-06-01 12:00:00)\n- Find trends\n- Rank them\n");
    }

    #[test]
    fn test_invalid_template() {
        let result = TemplateRenderer::from_source("{{#each instruction_items}}unclosed");
        assert!(matches!(result, Err(TemplateError::Compile(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{{{role}}}}!").unwrap();

        let renderer = TemplateRenderer::from_file(file.path()).unwrap();
        assert_eq!(
            renderer.render(&sample()).unwrap(),
            "You are a <careful> reviewer & editor!"
        );
    }

    #[test]
    fn test_from_missing_file() {
        let result = TemplateRenderer::from_file("/nonexistent/promptcraft/template.hbs");
        assert!(matches!(result, Err(TemplateError::Read { .. })));
    }

    #[test]
    fn test_from_optional_file_none() {
        let renderer = TemplateRenderer::from_optional_file(None).unwrap();
        assert!(!renderer.has_override());
    }
}
