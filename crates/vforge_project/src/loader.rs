//! Workspace scanning and item loading.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::ProjectResult;
use crate::models::{Contributor, ProjectItem};
use crate::registry::TypeRegistry;
use crate::store::ProjectStore;

/// Directories never scanned for items.
const SKIPPED_DIRS: &[&str] = &["build", "node_modules", ".git", ".vforge"];

/// Loads project items from a workspace directory.
///
/// Files are matched against the registered type extensions. The item's
/// contributor is inferred from its location: files under `plugins/` belong
/// to plugins, files under `engine/` to the engine, everything else to the
/// project. Items that fail to parse or validate are skipped with a warning
/// so one broken file does not take the whole project down.
pub struct ProjectLoader {
    workspace: PathBuf,
}

impl ProjectLoader {
    pub fn new(workspace: impl Into<PathBuf>) -> Self {
        Self {
            workspace: workspace.into(),
        }
    }

    /// Scan the workspace and build a store of all valid items.
    pub fn load(&self, registry: &TypeRegistry) -> ProjectResult<ProjectStore> {
        let mut store = ProjectStore::new();

        if !self.workspace.exists() {
            warn!("Workspace does not exist: {:?}", self.workspace);
            return Ok(store);
        }

        for entry in WalkDir::new(&self.workspace)
            .min_depth(1)
            .into_iter()
            .filter_entry(|e| !is_skipped_dir(e))
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file())
        {
            let path = entry.path();
            let extension = match path.extension().and_then(|e| e.to_str()) {
                Some(ext) => ext,
                None => continue,
            };

            let spec = match registry.type_for_extension(extension) {
                Some(spec) => spec,
                None => continue,
            };

            match self.load_item(path, &spec.id) {
                Ok(item) => {
                    if let Err(e) = registry.validate_item(&item) {
                        warn!("Skipping invalid item {:?}: {}", path, e);
                        continue;
                    }
                    debug!("Loaded item {}/{}", item.type_id, item.id);
                    if let Err(e) = store.insert(item) {
                        warn!("Skipping duplicate item {:?}: {}", path, e);
                    }
                }
                Err(e) => {
                    warn!("Skipping unreadable item {:?}: {}", path, e);
                }
            }
        }

        info!("Loaded {} items from {:?}", store.len(), self.workspace);
        Ok(store)
    }

    /// Collect validation issues across the workspace without building a store.
    ///
    /// Unlike [`load`](Self::load), nothing is skipped silently: every file
    /// that fails to parse or validate contributes an issue.
    pub fn check(&self, registry: &TypeRegistry) -> ProjectResult<Vec<String>> {
        let mut issues = Vec::new();

        if !self.workspace.exists() {
            issues.push(format!("workspace does not exist: {:?}", self.workspace));
            return Ok(issues);
        }

        for entry in WalkDir::new(&self.workspace)
            .min_depth(1)
            .into_iter()
            .filter_entry(|e| !is_skipped_dir(e))
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file())
        {
            let path = entry.path();
            let extension = match path.extension().and_then(|e| e.to_str()) {
                Some(ext) => ext,
                None => continue,
            };

            let spec = match registry.type_for_extension(extension) {
                Some(spec) => spec,
                None => continue,
            };

            match self.load_item(path, &spec.id) {
                Ok(item) => {
                    if let Err(e) = registry.validate_item(&item) {
                        issues.push(e.to_string());
                    }
                }
                Err(e) => {
                    issues.push(format!("{}: {}", path.display(), e));
                }
            }
        }

        Ok(issues)
    }

    fn load_item(&self, path: &Path, type_id: &str) -> ProjectResult<ProjectItem> {
        let content = fs::read_to_string(path)?;
        let data: serde_json::Value = serde_json::from_str(&content)?;

        let id = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        Ok(ProjectItem::new(id, type_id, data)
            .with_contributor(self.contributor_for(path))
            .with_file(path))
    }

    fn contributor_for(&self, path: &Path) -> Contributor {
        let relative = path.strip_prefix(&self.workspace).unwrap_or(path);
        match relative.components().next() {
            Some(component) if component.as_os_str() == "plugins" => Contributor::Plugin,
            Some(component) if component.as_os_str() == "engine" => Contributor::Engine,
            Some(component) if component.as_os_str() == "studio" => Contributor::Studio,
            _ => Contributor::Project,
        }
    }
}

fn is_skipped_dir(entry: &walkdir::DirEntry) -> bool {
    entry.path().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|name| SKIPPED_DIRS.contains(&name))
            .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProjectTypeSpec;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    fn registry() -> TypeRegistry {
        TypeRegistry::new(vec![ProjectTypeSpec::new("Actor", "Actor", "actor")
            .with_schema(json!({
                "type": "object",
                "required": ["name"],
                "properties": {"name": {"type": "string"}}
            }))])
        .unwrap()
    }

    #[test]
    fn test_load_matches_registered_extensions() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("assets")).unwrap();
        fs::write(
            temp.path().join("assets/Hero.actor"),
            r#"{"name": "Hero"}"#,
        )
        .unwrap();
        fs::write(temp.path().join("notes.txt"), "not an item").unwrap();

        let store = ProjectLoader::new(temp.path()).load(&registry()).unwrap();
        assert_eq!(store.len(), 1);

        let item = store.get("Actor", "Hero").unwrap();
        assert_eq!(item.contributor, Contributor::Project);
        assert_eq!(item.filename(), "Hero");
    }

    #[test]
    fn test_load_infers_plugin_contributor() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("plugins/platformer")).unwrap();
        fs::write(
            temp.path().join("plugins/platformer/Jumper.actor"),
            r#"{"name": "Jumper"}"#,
        )
        .unwrap();

        let store = ProjectLoader::new(temp.path()).load(&registry()).unwrap();
        let item = store.get("Actor", "Jumper").unwrap();
        assert_eq!(item.contributor, Contributor::Plugin);
    }

    #[test]
    fn test_load_skips_invalid_items() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("Bad.actor"), r#"{"name": 42}"#).unwrap();
        fs::write(temp.path().join("Broken.actor"), "{not json").unwrap();
        fs::write(temp.path().join("Good.actor"), r#"{"name": "Good"}"#).unwrap();

        let registry = registry();
        let store = ProjectLoader::new(temp.path()).load(&registry).unwrap();
        assert_eq!(store.len(), 1);

        let issues = ProjectLoader::new(temp.path()).check(&registry).unwrap();
        assert_eq!(issues.len(), 2);
    }

    #[test]
    fn test_load_skips_build_dir() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("build")).unwrap();
        fs::write(
            temp.path().join("build/Stale.actor"),
            r#"{"name": "Stale"}"#,
        )
        .unwrap();

        let store = ProjectLoader::new(temp.path()).load(&registry()).unwrap();
        assert!(store.is_empty());
    }
}
