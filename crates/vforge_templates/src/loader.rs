//! Declaration loading from YAML files.
//!
//! Beyond the built-in set, installed plugins can contribute their own type
//! and template declarations as YAML files. Each file holds one declaration
//! tagged by `kind`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info, warn};
use vforge_project::ProjectTypeSpec;
use walkdir::WalkDir;

use crate::error::TemplateResult;
use crate::manifest::TemplateSpec;

/// A declaration file, tagged by kind.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Declaration {
    Type(ProjectTypeSpec),
    Template(TemplateSpec),
}

/// Declarations collected from a directory.
#[derive(Debug, Default)]
pub struct DeclarationSet {
    pub types: Vec<ProjectTypeSpec>,
    pub templates: Vec<TemplateSpec>,
}

impl DeclarationSet {
    /// Merge another set into this one.
    pub fn extend(&mut self, other: DeclarationSet) {
        self.types.extend(other.types);
        self.templates.extend(other.templates);
    }
}

/// Loads type and template declarations from YAML files.
pub struct DeclarationLoader {
    declarations_path: PathBuf,
}

impl DeclarationLoader {
    pub fn new(declarations_path: impl Into<PathBuf>) -> Self {
        Self {
            declarations_path: declarations_path.into(),
        }
    }

    /// Load all declarations under the directory.
    ///
    /// Files that fail to parse are skipped with a warning so a broken
    /// plugin declaration does not block the rest.
    pub fn load_all(&self) -> TemplateResult<DeclarationSet> {
        let mut set = DeclarationSet::default();

        if !self.declarations_path.exists() {
            warn!(
                "Declarations directory does not exist: {:?}",
                self.declarations_path
            );
            return Ok(set);
        }

        for entry in WalkDir::new(&self.declarations_path)
            .min_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file())
            .filter(|e| is_yaml(e.path()))
        {
            match self.load_declaration(entry.path()) {
                Ok(Declaration::Type(spec)) => {
                    debug!("Loaded type declaration: {}", spec.id);
                    set.types.push(spec);
                }
                Ok(Declaration::Template(spec)) => {
                    debug!("Loaded template declaration: {}", spec.id);
                    set.templates.push(spec);
                }
                Err(e) => {
                    warn!("Skipping declaration {:?}: {}", entry.path(), e);
                }
            }
        }

        info!(
            "Loaded {} type and {} template declarations from {:?}",
            set.types.len(),
            set.templates.len(),
            self.declarations_path
        );
        Ok(set)
    }

    fn load_declaration(&self, path: &Path) -> TemplateResult<Declaration> {
        let content = fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}
