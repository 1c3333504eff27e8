//! Render context assembly.
//!
//! An item context is the item's data object plus underscore-prefixed
//! ambient fields (`_filename`, `_itemId`, `_contributor`). The project
//! context maps each enabled type id to the array of its item contexts, so
//! shared templates (linker script, plugin Makefile) can see the whole
//! project.

use serde_json::{Map, Value};
use vforge_project::{ProjectItem, ProjectStore};
use vforge_templates::TemplateCatalog;

/// Build the render context for one item.
pub fn item_context(item: &ProjectItem) -> Value {
    let mut ctx = match &item.data {
        Value::Object(fields) => fields.clone(),
        _ => Map::new(),
    };
    ctx.insert(
        "_filename".to_string(),
        Value::String(item.filename()),
    );
    ctx.insert("_itemId".to_string(), Value::String(item.id.clone()));
    ctx.insert(
        "_contributor".to_string(),
        Value::String(item.contributor.as_str().to_string()),
    );
    Value::Object(ctx)
}

/// Build the project-wide render context.
pub fn project_context(catalog: &TemplateCatalog, store: &ProjectStore) -> Value {
    let mut ctx = Map::new();
    for type_spec in catalog.types().list_enabled() {
        let items: Vec<Value> = store
            .items_of_type(&type_spec.id)
            .iter()
            .map(item_context)
            .collect();
        ctx.insert(type_spec.id.clone(), Value::Array(items));
    }
    Value::Object(ctx)
}
