//! Template declaration definitions.
//!
//! Declarations are static data describing which artifacts get generated
//! from project items and under what conditions. They are authored in code
//! (see [`crate::builtin`]) or as YAML files loaded by
//! [`crate::DeclarationLoader`], and are read-only at runtime.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Where a target's output path is rooted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TargetRoot {
    /// The workspace root.
    #[default]
    Project,
    /// The folder owning the item's source file.
    File,
}

/// A single value or a list of values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn as_slice(&self) -> &[T] {
        match self {
            OneOrMany::One(one) => std::slice::from_ref(one),
            OneOrMany::Many(many) => many,
        }
    }
}

/// Iteration spec fanning a single target out into N outputs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ForEachOf {
    /// Iterate an array resolved from the context by dotted path.
    Var { var: String },
    /// Iterate files matching glob pattern(s) under the target's root.
    FileInFolder { file_in_folder: OneOrMany<String> },
}

/// One output rule of a template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TemplateTarget {
    /// Output path pattern; `${key}` tokens resolve against the iteration
    /// context.
    pub path: String,
    #[serde(default)]
    pub root: TargetRoot,
    #[serde(default)]
    pub for_each_of: Option<ForEachOf>,
    /// JSON-logic predicate gating generation.
    #[serde(default)]
    pub conditions: Option<Value>,
}

impl TemplateTarget {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            root: TargetRoot::default(),
            for_each_of: None,
            conditions: None,
        }
    }

    pub fn with_root(mut self, root: TargetRoot) -> Self {
        self.root = root;
        self
    }

    pub fn for_each_var(mut self, var: impl Into<String>) -> Self {
        self.for_each_of = Some(ForEachOf::Var { var: var.into() });
        self
    }

    pub fn for_each_file(mut self, pattern: impl Into<String>) -> Self {
        self.for_each_of = Some(ForEachOf::FileInFolder {
            file_in_folder: OneOrMany::One(pattern.into()),
        });
        self
    }

    pub fn for_each_files(mut self, patterns: Vec<String>) -> Self {
        self.for_each_of = Some(ForEachOf::FileInFolder {
            file_in_folder: OneOrMany::Many(patterns),
        });
        self
    }

    pub fn with_conditions(mut self, conditions: Value) -> Self {
        self.conditions = Some(conditions);
        self
    }
}

/// Character encoding of a generated artifact.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TextEncoding {
    #[default]
    Utf8,
    ShiftJis,
    Windows1252,
}

impl TextEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf8",
            TextEncoding::ShiftJis => "shift_jis",
            TextEncoding::Windows1252 => "windows1252",
        }
    }
}

/// Events that re-trigger a template.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TemplateEventKind {
    InstalledPluginsChanged,
    ItemOfTypeDeleted,
}

/// Describes one generatable artifact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TemplateSpec {
    /// Unique template identifier.
    pub id: String,
    /// Source template name handed to the renderer.
    pub template: String,
    /// Output rules.
    #[serde(default)]
    pub targets: Vec<TemplateTarget>,
    /// Output text encoding.
    #[serde(default)]
    pub encoding: TextEncoding,
    /// Events that re-trigger generation.
    #[serde(default)]
    pub events: Vec<TemplateEventKind>,
    /// Bound item type: the template runs once per item of this type.
    #[serde(default)]
    pub item_specific: Option<String>,
}

impl TemplateSpec {
    pub fn new(id: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            template: template.into(),
            targets: Vec::new(),
            encoding: TextEncoding::default(),
            events: Vec::new(),
            item_specific: None,
        }
    }

    pub fn with_target(mut self, target: TemplateTarget) -> Self {
        self.targets.push(target);
        self
    }

    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn on_event(mut self, event: TemplateEventKind) -> Self {
        self.events.push(event);
        self
    }

    pub fn item_specific(mut self, type_id: impl Into<String>) -> Self {
        self.item_specific = Some(type_id.into());
        self
    }

    /// Whether the template runs per item rather than once per project.
    pub fn is_item_specific(&self) -> bool {
        self.item_specific.is_some()
    }

    /// Whether the template declares the given trigger event.
    pub fn triggered_by(&self, event: TemplateEventKind) -> bool {
        self.events.contains(&event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_spec_from_yaml() {
        let spec: TemplateSpec = serde_yaml::from_str(
            r#"
id: ActorSpec
template: actor_spec.c
item_specific: Actor
encoding: shift_jis
events: [item_of_type_deleted]
targets:
  - path: build/Specs/${_filename}ActorSpec.c
  - path: Converted/${_forEachOfBasename}.c
    root: file
    for_each_of:
      file_in_folder: "*.png"
    conditions:
      ">": [{"var": "components.sprites.length"}, 0]
"#,
        )
        .unwrap();

        assert_eq!(spec.id, "ActorSpec");
        assert_eq!(spec.encoding, TextEncoding::ShiftJis);
        assert_eq!(spec.item_specific.as_deref(), Some("Actor"));
        assert!(spec.triggered_by(TemplateEventKind::ItemOfTypeDeleted));
        assert_eq!(spec.targets.len(), 2);
        assert_eq!(spec.targets[0].root, TargetRoot::Project);
        assert_eq!(spec.targets[1].root, TargetRoot::File);
        assert!(matches!(
            spec.targets[1].for_each_of,
            Some(ForEachOf::FileInFolder { .. })
        ));
    }

    #[test]
    fn test_for_each_of_var_form() {
        let target: TemplateTarget = serde_yaml::from_str(
            r#"
path: Converted/${_forEachOfBasename}.c
for_each_of:
  var: files
"#,
        )
        .unwrap();
        assert_eq!(
            target.for_each_of,
            Some(ForEachOf::Var {
                var: "files".to_string()
            })
        );
    }

    #[test]
    fn test_file_in_folder_pattern_list() {
        let target: TemplateTarget = serde_yaml::from_str(
            r#"
path: Converted/${_forEachOfBasename}.c
for_each_of:
  file_in_folder: ["*.png", "*.bmp"]
"#,
        )
        .unwrap();
        match target.for_each_of {
            Some(ForEachOf::FileInFolder { file_in_folder }) => {
                assert_eq!(file_in_folder.as_slice(), ["*.png", "*.bmp"]);
            }
            other => panic!("unexpected for_each_of: {:?}", other),
        }
    }

    #[test]
    fn test_builder_matches_serde_defaults() {
        let built = TemplateTarget::new("a/b.c");
        let parsed: TemplateTarget = serde_yaml::from_str("path: a/b.c").unwrap();
        assert_eq!(built, parsed);
    }

    #[test]
    fn test_spec_builder() {
        let spec = TemplateSpec::new("EngineConfig", "config.h")
            .item_specific("EngineConfig")
            .on_event(TemplateEventKind::InstalledPluginsChanged)
            .with_target(
                TemplateTarget::new("headers/Config.h")
                    .with_conditions(json!({"==": [{"var": "generate"}, true]})),
            );

        assert!(spec.is_item_specific());
        assert!(spec.triggered_by(TemplateEventKind::InstalledPluginsChanged));
        assert!(!spec.triggered_by(TemplateEventKind::ItemOfTypeDeleted));
        assert!(spec.targets[0].conditions.is_some());
    }
}
