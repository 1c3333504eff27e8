//! Rendering seam.
//!
//! The actual templating engine is an external collaborator; generation only
//! needs something that turns a template name and a context into text. The
//! built-in [`SubstitutionRenderer`] covers the CLI and the test suite with
//! plain `{{dotted.path}}` substitution over files in a template directory.

use std::fs;
use std::path::PathBuf;

use regex::Regex;
use serde_json::Value;
use tracing::debug;
use vforge_logic::lookup;

use crate::error::{TemplateError, TemplateResult};

/// Renders a named template against a context.
pub trait Renderer {
    fn render(&self, template: &str, context: &Value) -> TemplateResult<String>;
}

/// Variable-substitution renderer over a directory of template files.
pub struct SubstitutionRenderer {
    templates_dir: PathBuf,
    token_pattern: Regex,
}

impl SubstitutionRenderer {
    pub fn new(templates_dir: impl Into<PathBuf>) -> Self {
        Self {
            templates_dir: templates_dir.into(),
            // Match {{dotted.path}} tokens
            token_pattern: Regex::new(r"\{\{([A-Za-z0-9_.]+)\}\}").unwrap(),
        }
    }

    /// Substitute `{{key}}` tokens in template text.
    ///
    /// Unknown tokens are left intact: rendered text, unlike output paths,
    /// may legitimately contain template-looking sequences.
    pub fn render_str(&self, text: &str, context: &Value) -> String {
        self.token_pattern
            .replace_all(text, |caps: &regex::Captures| {
                match lookup(context, &caps[1]) {
                    Some(Value::String(value)) => value,
                    Some(Value::Number(value)) => value.to_string(),
                    Some(Value::Bool(value)) => value.to_string(),
                    _ => caps[0].to_string(),
                }
            })
            .to_string()
    }
}

impl Renderer for SubstitutionRenderer {
    fn render(&self, template: &str, context: &Value) -> TemplateResult<String> {
        let path = self.templates_dir.join(template);
        if !path.exists() {
            return Err(TemplateError::SourceNotFound(template.to_string()));
        }

        debug!("Rendering template {:?}", path);
        let content = fs::read_to_string(&path)?;
        Ok(self.render_str(&content, context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_render_str_substitutes_scalars() {
        let renderer = SubstitutionRenderer::new(".");
        let ctx = json!({"name": "Hero", "health": 12, "visible": true});

        let rendered = renderer.render_str(
            "ActorSpec {{name}}Actor = {{health}}; // {{visible}}",
            &ctx,
        );
        assert_eq!(rendered, "ActorSpec HeroActor = 12; // true");
    }

    #[test]
    fn test_render_str_dotted_paths() {
        let renderer = SubstitutionRenderer::new(".");
        let ctx = json!({"components": {"sprites": ["a", "b"]}});

        let rendered = renderer.render_str("count: {{components.sprites.length}}", &ctx);
        assert_eq!(rendered, "count: 2");
    }

    #[test]
    fn test_render_str_leaves_unknown_tokens() {
        let renderer = SubstitutionRenderer::new(".");
        let rendered = renderer.render_str("{{missing}} stays", &json!({}));
        assert_eq!(rendered, "{{missing}} stays");
    }

    #[test]
    fn test_render_from_directory() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("actor_spec.c"), "// {{_filename}}\n").unwrap();

        let renderer = SubstitutionRenderer::new(temp.path());
        let rendered = renderer
            .render("actor_spec.c", &json!({"_filename": "Hero"}))
            .unwrap();
        assert_eq!(rendered, "// Hero\n");
    }

    #[test]
    fn test_render_missing_source() {
        let temp = tempdir().unwrap();
        let renderer = SubstitutionRenderer::new(temp.path());

        let err = renderer.render("ghost.c", &json!({})).unwrap_err();
        assert!(matches!(err, TemplateError::SourceNotFound(_)));
    }
}
