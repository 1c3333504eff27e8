//! # vforge_codegen
//!
//! The generation engine: decides which templates to run for a change,
//! expands their targets, renders each output and writes the artifacts.
//!
//! Generation is single-threaded and synchronous. Triggers
//! ([`GenerationTrigger`]) are discrete events raised by the host — a plugin
//! install, an item deletion, an item save — and a triggered run either
//! completes or reports per-target failures; there is no cancellation.
//! A failing target never aborts its siblings: outcomes are collected into a
//! [`GenerationReport`] and surfaced to the caller.
//!
//! ## Example
//!
//! ```rust,no_run
//! use vforge_codegen::GenerationEngine;
//! use vforge_project::{ProjectLoader, TypeRegistry};
//! use vforge_templates::{builtin, SubstitutionRenderer, TemplateCatalog};
//!
//! let set = builtin::declarations();
//! let registry = TypeRegistry::new(set.types).unwrap();
//! let catalog = TemplateCatalog::link(registry, set.templates).unwrap();
//!
//! let store = ProjectLoader::new("./my-game").load(catalog.types()).unwrap();
//! let renderer = SubstitutionRenderer::new("./templates");
//!
//! let engine = GenerationEngine::new(&catalog, &renderer, "./my-game");
//! let report = engine.generate_all(&store);
//! println!("{} files written", report.written.len());
//! ```

pub mod context;
pub mod engine;
pub mod error;
pub mod triggers;
pub mod writer;

pub use engine::{FailedTarget, GenerationEngine, GenerationReport, SkippedTarget};
pub use error::{CodegenError, CodegenResult};
pub use triggers::GenerationTrigger;
pub use writer::{ArtifactWriter, WriteOutcome};
