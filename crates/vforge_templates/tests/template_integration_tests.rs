//! Integration tests for declaration loading, linking and expansion.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use tempfile::tempdir;

use vforge_project::TypeRegistry;
use vforge_templates::{
    builtin, DeclarationLoader, TargetExpander, TemplateCatalog, TemplateError,
};

#[test]
fn test_builtin_plus_plugin_declarations_link() {
    let temp = tempdir().unwrap();
    fs::write(
        temp.path().join("jump_pad.yaml"),
        r#"
kind: type
id: JumpPad
display_name: Jump Pad
extension: jumppad
templates: [JumpPadSpec]
"#,
    )
    .unwrap();
    fs::write(
        temp.path().join("jump_pad_spec.yaml"),
        r#"
kind: template
id: JumpPadSpec
template: jump_pad_spec.c
item_specific: JumpPad
targets:
  - path: build/Specs/${_filename}JumpPadSpec.c
"#,
    )
    .unwrap();

    let mut set = builtin::declarations();
    set.extend(DeclarationLoader::new(temp.path()).load_all().unwrap());

    let registry = TypeRegistry::new(set.types).unwrap();
    let catalog = TemplateCatalog::link(registry, set.templates).unwrap();

    assert!(catalog.template("JumpPadSpec").is_some());
    assert_eq!(
        catalog.type_for_template("JumpPadSpec").unwrap().id,
        "JumpPad"
    );
}

#[test]
fn test_plugin_declaration_with_dangling_type_fails_link() {
    let temp = tempdir().unwrap();
    fs::write(
        temp.path().join("orphan.yaml"),
        r#"
kind: template
id: OrphanSpec
template: orphan.c
item_specific: NonexistentType
"#,
    )
    .unwrap();

    let mut set = builtin::declarations();
    set.extend(DeclarationLoader::new(temp.path()).load_all().unwrap());

    let registry = TypeRegistry::new(set.types).unwrap();
    let err = TemplateCatalog::link(registry, set.templates).unwrap_err();

    let message = err.to_string();
    assert!(message.contains("OrphanSpec"));
    assert!(message.contains("NonexistentType"));
}

#[test]
fn test_expand_builtin_actor_targets_end_to_end() {
    let temp = tempdir().unwrap();
    let actor_dir = temp.path().join("assets/Actor/Hero");
    fs::create_dir_all(actor_dir.join("Sprites")).unwrap();
    fs::write(actor_dir.join("Sprites/idle.png"), b"png").unwrap();
    fs::write(actor_dir.join("Sprites/walk.png"), b"png").unwrap();

    let set = builtin::declarations();
    let registry = TypeRegistry::new(set.types).unwrap();
    let catalog = TemplateCatalog::link(registry, set.templates).unwrap();
    let spec = catalog.template("ActorSpec").unwrap();

    let ctx = json!({
        "name": "Hero",
        "components": {"sprites": [{"name": "idle"}, {"name": "walk"}]},
        "_filename": "Hero"
    });

    let expander = TargetExpander::new();

    // project-rooted spec file
    let spec_outputs = expander
        .expand(&spec.targets[0], &ctx, temp.path())
        .unwrap();
    assert_eq!(
        spec_outputs[0].path,
        PathBuf::from("build/Specs/HeroActorSpec.c")
    );

    // file-rooted converted sprites, anchored at the item folder
    let converted = expander.expand(&spec.targets[1], &ctx, &actor_dir).unwrap();
    let mut paths: Vec<_> = converted.iter().map(|e| e.path.clone()).collect();
    paths.sort();
    assert_eq!(
        paths,
        vec![
            PathBuf::from("Converted/idle.c"),
            PathBuf::from("Converted/walk.c")
        ]
    );
}

#[test]
fn test_expand_actor_without_sprites_skips_conversion() {
    let set = builtin::declarations();
    let registry = TypeRegistry::new(set.types).unwrap();
    let catalog = TemplateCatalog::link(registry, set.templates).unwrap();
    let spec = catalog.template("ActorSpec").unwrap();

    let ctx = json!({
        "name": "Ghost",
        "components": {"sprites": []},
        "_filename": "Ghost"
    });

    let expander = TargetExpander::new();
    let converted = expander
        .expand(&spec.targets[1], &ctx, Path::new("."))
        .unwrap();
    assert!(converted.is_empty());
}

#[test]
fn test_unresolved_filename_token_fails_but_names_the_token() {
    let expander = TargetExpander::new();
    let target = vforge_templates::TemplateTarget::new("build/Specs/${_filename}Spec.c");

    let err = expander
        .expand(&target, &json!({"name": "NoFilename"}), Path::new("."))
        .unwrap_err();
    match err {
        TemplateError::UnresolvedPlaceholder { pattern, token } => {
            assert_eq!(pattern, "build/Specs/${_filename}Spec.c");
            assert_eq!(token, "${_filename}");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}
