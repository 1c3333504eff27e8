//! Validate command - Check declarations and project items.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::info;

use vforge_project::ProjectLoader;

#[derive(Args)]
pub struct ValidateArgs {
    /// Workspace root containing the project files
    #[arg(short, long, default_value = ".")]
    workspace: PathBuf,

    /// Directory with additional (plugin) declarations
    #[arg(long)]
    declarations: Option<PathBuf>,

    /// Skip project item validation
    #[arg(long)]
    skip_items: bool,
}

pub async fn execute(args: ValidateArgs) -> Result<()> {
    info!("Validating workspace {:?}", args.workspace);

    let mut all_passed = true;

    // Declaration catalog: linking surfaces configuration errors eagerly
    println!("📋 Validating declarations...");
    let catalog = super::load_catalog(args.declarations.as_deref())?;
    println!(
        "   ✅ {} types, {} templates linked",
        catalog.types().len(),
        catalog.len()
    );

    // Project items against their type schemas
    if !args.skip_items {
        println!("🔎 Validating project items...");

        let issues = ProjectLoader::new(&args.workspace).check(catalog.types())?;
        if issues.is_empty() {
            println!("   ✅ Item validation passed");
        } else {
            all_passed = false;
            println!("   ❌ Item validation failed:");
            for issue in &issues {
                println!("      - {}", issue);
            }
        }
    }

    println!();
    if all_passed {
        println!("✅ All validations passed!");
    } else {
        println!("❌ Some validations failed. Please fix the issues above.");
        std::process::exit(i32::from(crate::ExitCodes::VALIDATION_FAILURE));
    }

    Ok(())
}
