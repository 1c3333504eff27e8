//! Data models for project types and items.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The origin of a project data item.
///
/// Contributors partition ownership: `Project` items are user-authored and
/// mutable; the rest are read-only overlays shipped with the engine, an
/// installed plugin, or the studio itself.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Contributor {
    #[default]
    Project,
    Engine,
    Plugin,
    Studio,
}

impl Contributor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Contributor::Project => "project",
            Contributor::Engine => "engine",
            Contributor::Plugin => "plugin",
            Contributor::Studio => "studio",
        }
    }

    /// Only project-contributed items may be mutated or removed.
    pub fn is_read_only(&self) -> bool {
        !matches!(self, Contributor::Project)
    }
}

impl std::fmt::Display for Contributor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Describes one kind of project asset (Actor, Font, Sound, …).
///
/// Type specs are declared once at startup and never mutated at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectTypeSpec {
    /// Unique type identifier.
    pub id: String,
    /// Display name used in listings.
    pub display_name: String,
    /// File extension matched when scanning a workspace (without the dot).
    pub extension: String,
    /// JSON Schema for the item data.
    #[serde(default = "default_schema")]
    pub schema: Value,
    /// Icon identifier for UI hosts.
    #[serde(default)]
    pub icon: Option<String>,
    /// Editor binding identifier for UI hosts.
    #[serde(default)]
    pub editor: Option<String>,
    /// Templates to regenerate when items of this type change.
    #[serde(default)]
    pub templates: Vec<String>,
    /// Disabled types load but are excluded from listings and generation.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Whether the type is surfaced on the project dashboard.
    #[serde(default)]
    pub dashboard: bool,
}

fn default_schema() -> Value {
    Value::Object(serde_json::Map::new())
}

fn default_true() -> bool {
    true
}

impl ProjectTypeSpec {
    /// Create a type spec with a permissive schema.
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            extension: extension.into(),
            schema: default_schema(),
            icon: None,
            editor: None,
            templates: Vec::new(),
            enabled: true,
            dashboard: false,
        }
    }

    pub fn with_schema(mut self, schema: Value) -> Self {
        self.schema = schema;
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_editor(mut self, editor: impl Into<String>) -> Self {
        self.editor = Some(editor.into());
        self
    }

    pub fn with_templates(mut self, templates: Vec<String>) -> Self {
        self.templates = templates;
        self
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.templates.push(template.into());
        self
    }

    pub fn on_dashboard(mut self) -> Self {
        self.dashboard = true;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// A runtime instance of a project type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectItem {
    /// Item identifier, unique within its type.
    pub id: String,
    /// The type this item instantiates.
    pub type_id: String,
    /// Who contributed the item.
    #[serde(rename = "_contributor", default)]
    pub contributor: Contributor,
    /// Source file the item was loaded from, if any.
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// Schema-validated item fields.
    pub data: Value,
}

impl ProjectItem {
    pub fn new(id: impl Into<String>, type_id: impl Into<String>, data: Value) -> Self {
        Self {
            id: id.into(),
            type_id: type_id.into(),
            contributor: Contributor::Project,
            file: None,
            data,
        }
    }

    pub fn with_contributor(mut self, contributor: Contributor) -> Self {
        self.contributor = contributor;
        self
    }

    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// The item's name as used in generated file paths.
    ///
    /// Derived from the source file stem, falling back to the id.
    pub fn filename(&self) -> String {
        self.file
            .as_deref()
            .and_then(|path| path.file_stem())
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.id.clone())
    }

    /// The folder that owns the item's source file.
    pub fn folder(&self) -> Option<&std::path::Path> {
        self.file.as_deref().and_then(|path| path.parent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_contributor_ownership() {
        assert!(!Contributor::Project.is_read_only());
        assert!(Contributor::Engine.is_read_only());
        assert!(Contributor::Plugin.is_read_only());
        assert!(Contributor::Studio.is_read_only());
    }

    #[test]
    fn test_type_spec_builder() {
        let spec = ProjectTypeSpec::new("Actor", "Actor", "actor")
            .with_editor("actorEditor")
            .with_template("ActorSpec")
            .on_dashboard();

        assert_eq!(spec.id, "Actor");
        assert_eq!(spec.extension, "actor");
        assert_eq!(spec.templates, vec!["ActorSpec"]);
        assert!(spec.enabled);
        assert!(spec.dashboard);
    }

    #[test]
    fn test_item_filename_from_file() {
        let item = ProjectItem::new("hero", "Actor", json!({}))
            .with_file("assets/actors/Hero.actor");
        assert_eq!(item.filename(), "Hero");
    }

    #[test]
    fn test_item_filename_falls_back_to_id() {
        let item = ProjectItem::new("hero", "Actor", json!({}));
        assert_eq!(item.filename(), "hero");
    }

    #[test]
    fn test_contributor_round_trip() {
        let item = ProjectItem::new("hero", "Actor", json!({"x": 1}))
            .with_contributor(Contributor::Plugin);
        let text = serde_json::to_string(&item).unwrap();
        assert!(text.contains("\"_contributor\":\"plugin\""));
        let back: ProjectItem = serde_json::from_str(&text).unwrap();
        assert_eq!(back.contributor, Contributor::Plugin);
    }
}
