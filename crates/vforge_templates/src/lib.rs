//! # vforge_templates
//!
//! Template declarations, target expansion and the rendering seam for VForge.
//!
//! A template describes one generatable artifact: which output paths it
//! writes (each gated by an optional JSON-logic condition and optionally
//! fanned out over an array or a folder of files), which source template the
//! renderer consumes, the output text encoding, and the events that trigger
//! regeneration. Declarations are static data — built in via [`builtin`],
//! or contributed as YAML files loaded by [`DeclarationLoader`].
//!
//! [`TemplateCatalog::link`] cross-validates the declarations against the
//! type registry eagerly, so a dangling reference is a load-time
//! configuration error instead of a failure deep inside a build run.
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//! use vforge_templates::{TargetExpander, TemplateTarget};
//!
//! let target = TemplateTarget::new("Converted/${_forEachOfBasename}.c")
//!     .for_each_var("files");
//! let ctx = json!({"files": ["a.png", "b.png"], "_filename": "Hero"});
//!
//! let expander = TargetExpander::new();
//! let expanded = expander.expand(&target, &ctx, std::path::Path::new(".")).unwrap();
//! assert_eq!(expanded.len(), 2);
//! ```

pub mod builtin;
pub mod catalog;
pub mod error;
pub mod expand;
pub mod loader;
pub mod manifest;
pub mod render;

pub use catalog::TemplateCatalog;
pub use error::{TemplateError, TemplateResult};
pub use expand::{ExpandedTarget, TargetExpander};
pub use loader::{DeclarationLoader, DeclarationSet};
pub use manifest::{
    ForEachOf, OneOrMany, TargetRoot, TemplateEventKind, TemplateSpec, TemplateTarget,
    TextEncoding,
};
pub use render::{Renderer, SubstitutionRenderer};
