//! Generate command - Run templates and write artifacts.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::info;

use vforge_codegen::{GenerationEngine, GenerationReport};
use vforge_project::ProjectLoader;
use vforge_templates::SubstitutionRenderer;

#[derive(Args)]
pub struct GenerateArgs {
    /// Workspace root containing the project files
    #[arg(short, long, default_value = ".")]
    workspace: PathBuf,

    /// Directory with renderer template sources
    #[arg(long, default_value = "templates")]
    templates_dir: PathBuf,

    /// Directory with additional (plugin) declarations
    #[arg(long)]
    declarations: Option<PathBuf>,

    /// Only run this template
    #[arg(long)]
    template: Option<String>,

    /// Only run templates associated with this type
    #[arg(long = "type")]
    type_id: Option<String>,

    /// Only regenerate this item (requires --type)
    #[arg(long, requires = "type_id")]
    item: Option<String>,
}

pub async fn execute(args: GenerateArgs) -> Result<()> {
    info!("Generating in workspace {:?}", args.workspace);

    let catalog = super::load_catalog(args.declarations.as_deref())?;
    let store = ProjectLoader::new(&args.workspace).load(catalog.types())?;
    println!("📦 Loaded {} project items", store.len());

    let renderer = SubstitutionRenderer::new(&args.templates_dir);
    let engine = GenerationEngine::new(&catalog, &renderer, &args.workspace);

    let report = if let Some(template) = &args.template {
        engine.generate_template(&store, template)?
    } else if let Some(type_id) = &args.type_id {
        match &args.item {
            Some(item_id) => {
                let item = store.get(type_id, item_id).ok_or_else(|| {
                    anyhow::anyhow!("item not found: {}/{}", type_id, item_id)
                })?;
                engine.generate_for_item(&store, item)?
            }
            None => engine.generate_for_type(&store, type_id)?,
        }
    } else {
        engine.generate_all(&store)
    };

    print_report(&report);

    if !report.is_success() {
        anyhow::bail!("generation finished with {} failed target(s)", report.failed.len());
    }
    Ok(())
}

fn print_report(report: &GenerationReport) {
    println!("✅ Wrote {} file(s)", report.written.len());

    if !report.skipped.is_empty() {
        println!("⚠️  Skipped {} target(s):", report.skipped.len());
        for skipped in &report.skipped {
            println!("   - {} '{}': {}", skipped.template, skipped.path, skipped.reason);
        }
    }

    if !report.failed.is_empty() {
        println!("❌ {} target(s) failed:", report.failed.len());
        for failed in &report.failed {
            println!("   - {} '{}': {}", failed.template, failed.path, failed.error);
        }
    }
}
