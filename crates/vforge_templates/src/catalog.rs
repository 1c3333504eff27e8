//! Linked catalog of types and templates.

use std::collections::HashMap;

use tracing::debug;
use vforge_logic::Rule;
use vforge_project::{ProjectTypeSpec, TypeRegistry};

use crate::error::{TemplateError, TemplateResult};
use crate::manifest::{TargetRoot, TemplateEventKind, TemplateSpec};

/// The linked pair of type registry and template declarations.
///
/// Linking cross-validates everything the declarations reference: a dangling
/// `item_specific` type, a type whose `templates` list names an unknown
/// template, a condition that does not parse, or a file-rooted target on a
/// template with no item binding all fail here, at load time.
pub struct TemplateCatalog {
    types: TypeRegistry,
    templates: HashMap<String, TemplateSpec>,
}

impl TemplateCatalog {
    /// Link template declarations against a type registry.
    pub fn link(types: TypeRegistry, specs: Vec<TemplateSpec>) -> TemplateResult<Self> {
        let mut templates: HashMap<String, TemplateSpec> = HashMap::new();

        for spec in specs {
            if templates.contains_key(&spec.id) {
                return Err(TemplateError::DuplicateTemplate(spec.id));
            }

            if let Some(type_id) = &spec.item_specific {
                if !types.exists(type_id) {
                    return Err(TemplateError::UnknownItemSpecificType {
                        template: spec.id.clone(),
                        type_id: type_id.clone(),
                    });
                }
            }

            for target in &spec.targets {
                if let Some(conditions) = &target.conditions {
                    Rule::parse(conditions).map_err(|e| TemplateError::InvalidCondition {
                        template: spec.id.clone(),
                        path: target.path.clone(),
                        message: e.to_string(),
                    })?;
                }
                if target.root == TargetRoot::File && spec.item_specific.is_none() {
                    return Err(TemplateError::FileRootOnSharedTemplate {
                        template: spec.id.clone(),
                    });
                }
            }

            debug!("Linked template: {}", spec.id);
            templates.insert(spec.id.clone(), spec);
        }

        for type_spec in types.list() {
            for template_id in &type_spec.templates {
                if !templates.contains_key(template_id) {
                    return Err(TemplateError::UnknownTemplateReference {
                        type_id: type_spec.id.clone(),
                        template: template_id.clone(),
                    });
                }
            }
        }

        Ok(Self { types, templates })
    }

    /// The underlying type registry.
    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    /// Get a template by id.
    pub fn template(&self, id: &str) -> Option<&TemplateSpec> {
        self.templates.get(id)
    }

    /// Get a template by id, returning an error if not found.
    pub fn template_required(&self, id: &str) -> TemplateResult<&TemplateSpec> {
        self.template(id)
            .ok_or_else(|| TemplateError::UnknownTemplate(id.to_string()))
    }

    /// The templates associated with a type, in the type's declaration order.
    pub fn templates_for_type(&self, type_id: &str) -> TemplateResult<Vec<&TemplateSpec>> {
        let type_spec = self.types.get_required(type_id)?;
        type_spec
            .templates
            .iter()
            .map(|id| self.template_required(id))
            .collect()
    }

    /// Resolve the type a template is bound to via `item_specific`.
    pub fn type_for_template(&self, template_id: &str) -> Option<&ProjectTypeSpec> {
        self.template(template_id)
            .and_then(|spec| spec.item_specific.as_deref())
            .and_then(|type_id| self.types.get(type_id))
    }

    /// Templates declaring the given trigger event, in id order.
    pub fn templates_for_event(&self, event: TemplateEventKind) -> Vec<&TemplateSpec> {
        let mut specs: Vec<_> = self
            .templates
            .values()
            .filter(|spec| spec.triggered_by(event))
            .collect();
        specs.sort_by(|a, b| a.id.cmp(&b.id));
        specs
    }

    /// All templates, in id order.
    pub fn list(&self) -> Vec<&TemplateSpec> {
        let mut specs: Vec<_> = self.templates.values().collect();
        specs.sort_by(|a, b| a.id.cmp(&b.id));
        specs
    }

    /// Number of linked templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Check if the catalog has no templates.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl std::fmt::Debug for TemplateCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateCatalog")
            .field("types", &self.types)
            .field("templates", &self.templates.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::TemplateTarget;
    use serde_json::json;

    fn actor_type() -> ProjectTypeSpec {
        ProjectTypeSpec::new("Actor", "Actor", "actor").with_template("ActorSpec")
    }

    fn actor_template() -> TemplateSpec {
        TemplateSpec::new("ActorSpec", "actor_spec.c")
            .item_specific("Actor")
            .with_target(TemplateTarget::new("build/Specs/${_filename}ActorSpec.c"))
    }

    #[test]
    fn test_link_valid_catalog() {
        let types = TypeRegistry::new(vec![actor_type()]).unwrap();
        let catalog = TemplateCatalog::link(types, vec![actor_template()]).unwrap();

        assert_eq!(catalog.len(), 1);
        assert!(catalog.template("ActorSpec").is_some());
        assert_eq!(catalog.type_for_template("ActorSpec").unwrap().id, "Actor");
        assert_eq!(catalog.templates_for_type("Actor").unwrap().len(), 1);
    }

    #[test]
    fn test_link_rejects_dangling_item_specific() {
        let types = TypeRegistry::new(vec![actor_type()]).unwrap();
        let bad = TemplateSpec::new("ActorSpec", "actor_spec.c").item_specific("NonexistentType");

        let err = TemplateCatalog::link(types, vec![bad]).unwrap_err();
        match err {
            TemplateError::UnknownItemSpecificType { template, type_id } => {
                assert_eq!(template, "ActorSpec");
                assert_eq!(type_id, "NonexistentType");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_link_rejects_unknown_template_reference() {
        let types = TypeRegistry::new(vec![
            ProjectTypeSpec::new("Actor", "Actor", "actor").with_template("MissingTemplate"),
        ])
        .unwrap();

        let err = TemplateCatalog::link(types, vec![]).unwrap_err();
        match err {
            TemplateError::UnknownTemplateReference { type_id, template } => {
                assert_eq!(type_id, "Actor");
                assert_eq!(template, "MissingTemplate");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_link_rejects_malformed_condition() {
        let types = TypeRegistry::new(vec![]).unwrap();
        let bad = TemplateSpec::new("Gate", "gate.c").with_target(
            TemplateTarget::new("out.c").with_conditions(json!({"!": [{"var": "x"}]})),
        );

        let err = TemplateCatalog::link(types, vec![bad]).unwrap_err();
        assert!(matches!(err, TemplateError::InvalidCondition { .. }));
    }

    #[test]
    fn test_link_rejects_file_root_without_item_binding() {
        let types = TypeRegistry::new(vec![]).unwrap();
        let bad = TemplateSpec::new("Shared", "shared.c")
            .with_target(TemplateTarget::new("out.c").with_root(TargetRoot::File));

        let err = TemplateCatalog::link(types, vec![bad]).unwrap_err();
        assert!(matches!(
            err,
            TemplateError::FileRootOnSharedTemplate { .. }
        ));
    }

    #[test]
    fn test_link_rejects_duplicate_template() {
        let types = TypeRegistry::new(vec![actor_type()]).unwrap();
        let err =
            TemplateCatalog::link(types, vec![actor_template(), actor_template()]).unwrap_err();
        assert!(matches!(err, TemplateError::DuplicateTemplate(_)));
    }

    #[test]
    fn test_templates_for_event_sorted() {
        let types = TypeRegistry::new(vec![]).unwrap();
        let catalog = TemplateCatalog::link(
            types,
            vec![
                TemplateSpec::new("Zeta", "z.c")
                    .on_event(TemplateEventKind::InstalledPluginsChanged),
                TemplateSpec::new("Alpha", "a.c")
                    .on_event(TemplateEventKind::InstalledPluginsChanged),
                TemplateSpec::new("Quiet", "q.c"),
            ],
        )
        .unwrap();

        let ids: Vec<_> = catalog
            .templates_for_event(TemplateEventKind::InstalledPluginsChanged)
            .iter()
            .map(|spec| spec.id.as_str())
            .collect();
        assert_eq!(ids, vec!["Alpha", "Zeta"]);
    }
}
