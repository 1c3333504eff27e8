//! Built-in type and template declarations.
//!
//! The stock set covers the standard console asset kinds and the artifacts
//! regenerated from them: spec sources under `build/Specs/`, converted asset
//! data next to each item, engine configuration headers, the linker script
//! and the plugin Makefile fragment.

use serde_json::json;
use vforge_project::ProjectTypeSpec;

use crate::loader::DeclarationSet;
use crate::manifest::{TargetRoot, TemplateEventKind, TemplateSpec, TemplateTarget};

/// The built-in declaration set.
pub fn declarations() -> DeclarationSet {
    DeclarationSet {
        types: types(),
        templates: templates(),
    }
}

fn types() -> Vec<ProjectTypeSpec> {
    vec![
        ProjectTypeSpec::new("Actor", "Actor", "actor")
            .with_schema(json!({
                "type": "object",
                "required": ["name"],
                "properties": {
                    "name": {"type": "string"},
                    "extraInfo": {"type": "string"},
                    "components": {
                        "type": "object",
                        "properties": {
                            "sprites": {"type": "array", "items": {"type": "object"}},
                            "colliders": {"type": "array", "items": {"type": "object"}},
                            "animations": {"type": "array", "items": {"type": "object"}}
                        }
                    }
                }
            }))
            .with_icon("codicon-person")
            .with_editor("actorEditor")
            .with_template("ActorSpec")
            .on_dashboard(),
        ProjectTypeSpec::new("Font", "Font", "font")
            .with_schema(json!({
                "type": "object",
                "required": ["name"],
                "properties": {
                    "name": {"type": "string"},
                    "offset": {"type": "integer", "minimum": 0},
                    "characterCount": {"type": "integer", "minimum": 1},
                    "size": {
                        "type": "object",
                        "properties": {
                            "x": {"type": "integer", "minimum": 1},
                            "y": {"type": "integer", "minimum": 1}
                        }
                    }
                }
            }))
            .with_icon("codicon-case-sensitive")
            .with_editor("fontEditor")
            .with_template("FontSpec")
            .on_dashboard(),
        ProjectTypeSpec::new("Image", "Image", "image")
            .with_schema(json!({
                "type": "object",
                "properties": {
                    "name": {"type": "string"},
                    "files": {"type": "array", "items": {"type": "string"}},
                    "tileset": {
                        "type": "object",
                        "properties": {
                            "shared": {"type": "boolean"},
                            "compression": {"type": "string"}
                        }
                    }
                }
            }))
            .with_icon("codicon-file-media")
            .with_editor("imageEditor")
            .with_template("ImageData"),
        ProjectTypeSpec::new("Sound", "Sound", "sound")
            .with_schema(json!({
                "type": "object",
                "required": ["name"],
                "properties": {
                    "name": {"type": "string"},
                    "loop": {"type": "boolean"},
                    "speed": {"type": "number"},
                    "tracks": {"type": "array", "items": {"type": "object"}}
                }
            }))
            .with_icon("codicon-music")
            .with_editor("soundEditor")
            .with_template("SoundSpec")
            .on_dashboard(),
        ProjectTypeSpec::new("Stage", "Stage", "stage")
            .with_schema(json!({
                "type": "object",
                "required": ["name"],
                "properties": {
                    "name": {"type": "string"},
                    "actors": {"type": "array", "items": {"type": "object"}},
                    "size": {
                        "type": "object",
                        "properties": {
                            "x": {"type": "integer"},
                            "y": {"type": "integer"},
                            "z": {"type": "integer"}
                        }
                    }
                }
            }))
            .with_icon("codicon-window")
            .with_editor("stageEditor")
            .with_template("StageSpec")
            .on_dashboard(),
        ProjectTypeSpec::new("Translations", "Translations", "translations")
            .with_schema(json!({
                "type": "object",
                "properties": {
                    "languages": {"type": "array", "items": {"type": "object"}},
                    "strings": {"type": "object"}
                }
            }))
            .with_icon("codicon-globe")
            .with_editor("translationsEditor")
            .with_template("TranslationsData"),
        ProjectTypeSpec::new("WaveForm", "Wave Form", "waveform")
            .with_schema(json!({
                "type": "object",
                "required": ["name", "values"],
                "properties": {
                    "name": {"type": "string"},
                    "values": {
                        "type": "array",
                        "items": {"type": "integer", "minimum": 0, "maximum": 63},
                        "minItems": 32,
                        "maxItems": 32
                    }
                }
            }))
            .with_icon("codicon-pulse")
            .with_editor("waveFormEditor")
            .with_template("WaveFormSpec"),
        ProjectTypeSpec::new("EngineConfig", "Engine Config", "engineconfig")
            .with_schema(json!({
                "type": "object",
                "properties": {
                    "frameRate": {"type": "integer"},
                    "memory": {"type": "object"},
                    "optics": {"type": "object"}
                }
            }))
            .with_editor("engineConfigEditor")
            .with_template("EngineConfigHeader"),
        ProjectTypeSpec::new("RomInfo", "ROM Info", "rominfo")
            .with_schema(json!({
                "type": "object",
                "required": ["gameTitle", "makerCode", "gameCode"],
                "properties": {
                    "gameTitle": {"type": "string", "maxLength": 20},
                    "makerCode": {"type": "string", "maxLength": 2},
                    "gameCode": {"type": "string", "maxLength": 4},
                    "revision": {"type": "integer", "minimum": 0}
                }
            }))
            .with_editor("romInfoEditor")
            .with_template("RomInfoSource"),
    ]
}

fn templates() -> Vec<TemplateSpec> {
    vec![
        TemplateSpec::new("ActorSpec", "actor_spec.c")
            .item_specific("Actor")
            .on_event(TemplateEventKind::ItemOfTypeDeleted)
            .with_target(TemplateTarget::new("build/Specs/${_filename}ActorSpec.c"))
            .with_target(
                TemplateTarget::new("Converted/${_forEachOfBasename}.c")
                    .with_root(TargetRoot::File)
                    .for_each_file("Sprites/*.png")
                    .with_conditions(json!({
                        ">": [{"var": "components.sprites.length"}, 0]
                    })),
            ),
        TemplateSpec::new("FontSpec", "font_spec.c")
            .item_specific("Font")
            .with_target(TemplateTarget::new("build/Specs/${_filename}FontSpec.c"))
            .with_target(
                TemplateTarget::new("Converted/${_forEachOfBasename}.c")
                    .with_root(TargetRoot::File)
                    .for_each_file("*.png"),
            ),
        TemplateSpec::new("ImageData", "image_data.c")
            .item_specific("Image")
            .with_target(
                TemplateTarget::new("Converted/${_forEachOfBasename}.c")
                    .with_root(TargetRoot::File)
                    .for_each_var("files"),
            ),
        TemplateSpec::new("SoundSpec", "sound_spec.c")
            .item_specific("Sound")
            .on_event(TemplateEventKind::ItemOfTypeDeleted)
            .with_target(TemplateTarget::new("build/Specs/${_filename}SoundSpec.c")),
        TemplateSpec::new("StageSpec", "stage_spec.c")
            .item_specific("Stage")
            .on_event(TemplateEventKind::ItemOfTypeDeleted)
            .with_target(TemplateTarget::new("build/Specs/${_filename}StageSpec.c"))
            .with_target(
                TemplateTarget::new("build/Specs/${_filename}StageSpec.h")
                    .with_conditions(json!({">": [{"var": "actors.length"}, 0]})),
            ),
        TemplateSpec::new("TranslationsData", "translations.c")
            .item_specific("Translations")
            .with_target(TemplateTarget::new("source/Texts.c"))
            .with_target(
                TemplateTarget::new("source/Texts-${_forEachOfBasename}.c")
                    .for_each_var("languages")
                    .with_conditions(json!({">": [{"var": "languages.length"}, 1]})),
            ),
        TemplateSpec::new("WaveFormSpec", "waveform_spec.c")
            .item_specific("WaveForm")
            .with_target(TemplateTarget::new(
                "build/Specs/${_filename}WaveFormSpec.c",
            )),
        TemplateSpec::new("EngineConfigHeader", "engine_config.h")
            .item_specific("EngineConfig")
            .on_event(TemplateEventKind::InstalledPluginsChanged)
            .with_target(TemplateTarget::new("headers/Config.h")),
        TemplateSpec::new("RomInfoSource", "rom_info.c")
            .item_specific("RomInfo")
            .with_encoding(crate::manifest::TextEncoding::ShiftJis)
            .with_target(TemplateTarget::new("source/RomInfo.c")),
        TemplateSpec::new("LinkerScript", "linker.ld")
            .on_event(TemplateEventKind::InstalledPluginsChanged)
            .with_target(TemplateTarget::new("build/vforge.ld")),
        TemplateSpec::new("PluginsMakefile", "plugins.make")
            .on_event(TemplateEventKind::InstalledPluginsChanged)
            .with_target(TemplateTarget::new("build/plugins.make")),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TemplateCatalog;
    use vforge_project::TypeRegistry;

    #[test]
    fn test_builtin_declarations_link_cleanly() {
        let set = declarations();
        let registry = TypeRegistry::new(set.types).unwrap();
        let catalog = TemplateCatalog::link(registry, set.templates).unwrap();

        assert!(catalog.template("ActorSpec").is_some());
        assert_eq!(catalog.type_for_template("ActorSpec").unwrap().id, "Actor");
        assert!(!catalog
            .templates_for_event(TemplateEventKind::InstalledPluginsChanged)
            .is_empty());
    }

    #[test]
    fn test_builtin_types_all_enabled() {
        let set = declarations();
        assert!(set.types.iter().all(|t| t.enabled));
    }

    #[test]
    fn test_shared_templates_have_no_file_roots() {
        for spec in templates() {
            if spec.item_specific.is_none() {
                assert!(
                    spec.targets.iter().all(|t| t.root == TargetRoot::Project),
                    "shared template {} must be project-rooted",
                    spec.id
                );
            }
        }
    }
}
