//! Type registry with eager schema compilation.

use std::collections::HashMap;

use jsonschema::JSONSchema;
use tracing::debug;

use crate::error::{ProjectError, ProjectResult};
use crate::models::{ProjectItem, ProjectTypeSpec};

/// Registry of project types.
///
/// Built once at startup and immutable afterwards. Each type's JSON Schema
/// is compiled at construction time so a broken declaration surfaces as a
/// configuration error before any generation runs.
pub struct TypeRegistry {
    types: HashMap<String, ProjectTypeSpec>,
    schemas: HashMap<String, JSONSchema>,
}

impl TypeRegistry {
    /// Build a registry from type declarations.
    pub fn new(specs: Vec<ProjectTypeSpec>) -> ProjectResult<Self> {
        let mut types = HashMap::new();
        let mut schemas = HashMap::new();

        for spec in specs {
            if types.contains_key(&spec.id) {
                return Err(ProjectError::DuplicateType(spec.id));
            }

            let compiled = JSONSchema::compile(&spec.schema).map_err(|e| {
                ProjectError::SchemaCompile {
                    type_id: spec.id.clone(),
                    message: e.to_string(),
                }
            })?;

            debug!("Registered project type: {}", spec.id);
            schemas.insert(spec.id.clone(), compiled);
            types.insert(spec.id.clone(), spec);
        }

        Ok(Self { types, schemas })
    }

    /// Get a type by id.
    pub fn get(&self, id: &str) -> Option<&ProjectTypeSpec> {
        self.types.get(id)
    }

    /// Get a type by id, returning an error if not found.
    pub fn get_required(&self, id: &str) -> ProjectResult<&ProjectTypeSpec> {
        self.get(id)
            .ok_or_else(|| ProjectError::UnknownType(id.to_string()))
    }

    /// Check if a type is registered.
    pub fn exists(&self, id: &str) -> bool {
        self.types.contains_key(id)
    }

    /// Find the type matching a file extension.
    pub fn type_for_extension(&self, extension: &str) -> Option<&ProjectTypeSpec> {
        self.types.values().find(|t| t.extension == extension)
    }

    /// Template ids associated with a type.
    pub fn templates_for_type(&self, id: &str) -> ProjectResult<&[String]> {
        self.get_required(id).map(|t| t.templates.as_slice())
    }

    /// All types, sorted alphabetically by display name.
    ///
    /// Display ordering only; generation order is never derived from this.
    pub fn list(&self) -> Vec<&ProjectTypeSpec> {
        let mut types: Vec<_> = self.types.values().collect();
        types.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        types
    }

    /// Enabled types, sorted alphabetically by display name.
    pub fn list_enabled(&self) -> Vec<&ProjectTypeSpec> {
        let mut types: Vec<_> = self.types.values().filter(|t| t.enabled).collect();
        types.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        types
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Validate an item's data against its type schema.
    pub fn validate_item(&self, item: &ProjectItem) -> ProjectResult<()> {
        let schema = self
            .schemas
            .get(&item.type_id)
            .ok_or_else(|| ProjectError::UnknownType(item.type_id.clone()))?;

        if let Err(errors) = schema.validate(&item.data) {
            let messages: Vec<String> = errors.map(|e| e.to_string()).collect();
            return Err(ProjectError::SchemaInvalid {
                type_id: item.type_id.clone(),
                item_id: item.id.clone(),
                errors: messages.join("; "),
            });
        }

        Ok(())
    }
}

impl std::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("types", &self.types.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn actor_type() -> ProjectTypeSpec {
        ProjectTypeSpec::new("Actor", "Actor", "actor").with_schema(json!({
            "type": "object",
            "properties": {
                "name": {"type": "string"}
            },
            "required": ["name"]
        }))
    }

    #[test]
    fn test_registry_lookup() {
        let registry = TypeRegistry::new(vec![actor_type()]).unwrap();
        assert!(registry.exists("Actor"));
        assert!(registry.get("Font").is_none());
        assert!(registry.get_required("Font").is_err());
        assert_eq!(registry.type_for_extension("actor").unwrap().id, "Actor");
    }

    #[test]
    fn test_registry_duplicate_type() {
        let result = TypeRegistry::new(vec![actor_type(), actor_type()]);
        assert!(matches!(result, Err(ProjectError::DuplicateType(id)) if id == "Actor"));
    }

    #[test]
    fn test_registry_rejects_bad_schema() {
        let spec = ProjectTypeSpec::new("Broken", "Broken", "broken")
            .with_schema(json!({"type": "not-a-type"}));
        let result = TypeRegistry::new(vec![spec]);
        assert!(matches!(
            result,
            Err(ProjectError::SchemaCompile { type_id, .. }) if type_id == "Broken"
        ));
    }

    #[test]
    fn test_list_sorted_by_display_name() {
        let registry = TypeRegistry::new(vec![
            ProjectTypeSpec::new("Sound", "Sound", "sound"),
            ProjectTypeSpec::new("Actor", "Actor", "actor"),
            ProjectTypeSpec::new("Font", "Font", "font").disabled(),
        ])
        .unwrap();

        let names: Vec<_> = registry.list().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(names, vec!["Actor", "Font", "Sound"]);

        let enabled: Vec<_> = registry
            .list_enabled()
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(enabled, vec!["Actor", "Sound"]);
    }

    #[test]
    fn test_validate_item() {
        let registry = TypeRegistry::new(vec![actor_type()]).unwrap();

        let valid = ProjectItem::new("hero", "Actor", json!({"name": "Hero"}));
        assert!(registry.validate_item(&valid).is_ok());

        let invalid = ProjectItem::new("hero", "Actor", json!({"name": 3}));
        let err = registry.validate_item(&invalid).unwrap_err();
        assert!(matches!(err, ProjectError::SchemaInvalid { .. }));

        let unknown = ProjectItem::new("x", "Ghost", json!({}));
        assert!(matches!(
            registry.validate_item(&unknown),
            Err(ProjectError::UnknownType(_))
        ));
    }
}
