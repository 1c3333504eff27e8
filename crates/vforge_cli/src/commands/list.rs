//! List command - Show registered types and templates.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListKind {
    Types,
    Templates,
}

#[derive(Args)]
pub struct ListArgs {
    /// What to list
    #[arg(value_enum, default_value = "types")]
    kind: ListKind,

    /// Directory with additional (plugin) declarations
    #[arg(long)]
    declarations: Option<PathBuf>,
}

pub async fn execute(args: ListArgs) -> Result<()> {
    let catalog = super::load_catalog(args.declarations.as_deref())?;

    match args.kind {
        ListKind::Types => {
            println!("Registered types:");
            for type_spec in catalog.types().list() {
                let status = if type_spec.enabled { "" } else { " (disabled)" };
                let dashboard = if type_spec.dashboard { " 📌" } else { "" };
                println!(
                    "  {} [.{}] → {}{}{}",
                    type_spec.display_name,
                    type_spec.extension,
                    type_spec.templates.join(", "),
                    status,
                    dashboard
                );
            }
        }
        ListKind::Templates => {
            println!("Registered templates:");
            for spec in catalog.list() {
                let binding = spec
                    .item_specific
                    .as_deref()
                    .map(|type_id| format!(" (per {})", type_id))
                    .unwrap_or_default();
                println!(
                    "  {}{} — {} target(s), encoding {}",
                    spec.id,
                    binding,
                    spec.targets.len(),
                    spec.encoding.as_str()
                );
            }
        }
    }

    Ok(())
}
