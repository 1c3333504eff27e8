//! CLI command definitions.
//!
//! This module defines the command structure for the VForge CLI. Each
//! subcommand loads the declaration catalog the same way: built-in
//! declarations first, then any plugin-contributed YAML declarations.

use std::path::Path;

use anyhow::Context;
use clap::{Parser, Subcommand};

use vforge_project::TypeRegistry;
use vforge_templates::{builtin, DeclarationLoader, TemplateCatalog};

pub mod generate;
pub mod list;
pub mod validate;

/// VForge - data-driven code generation for retro console game projects
#[derive(Parser)]
#[command(name = "vforge")]
#[command(version, about = "VForge - data-driven code generation for retro console projects")]
#[command(long_about = r#"
VForge regenerates build artifacts (spec sources, converted assets, linker
scripts, Makefile fragments) from the typed asset files of a retro console
game project, driven by declarative templates.

WORKFLOWS:
  generate  → Run templates and write generated artifacts
  validate  → Check declarations and project items without writing anything
  list      → Show registered types and templates

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Validation failure
  4 - Template/configuration error
  5 - Generation error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate artifacts from project data
    Generate(generate::GenerateArgs),

    /// Validate declarations and project items
    Validate(validate::ValidateArgs),

    /// List registered types and templates
    List(list::ListArgs),
}

/// Load and link the declaration catalog: built-ins plus optional plugin
/// declarations.
pub fn load_catalog(declarations: Option<&Path>) -> anyhow::Result<TemplateCatalog> {
    let mut set = builtin::declarations();

    if let Some(path) = declarations {
        let loaded = DeclarationLoader::new(path)
            .load_all()
            .with_context(|| format!("loading declarations from {}", path.display()))?;
        set.extend(loaded);
    }

    let registry = TypeRegistry::new(set.types).context("building type registry")?;
    let catalog =
        TemplateCatalog::link(registry, set.templates).context("linking template catalog")?;
    Ok(catalog)
}
