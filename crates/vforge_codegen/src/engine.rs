//! The generation engine.

use std::path::PathBuf;

use tracing::{debug, info, warn};
use vforge_project::{ProjectItem, ProjectStore};
use vforge_templates::{
    Renderer, TargetExpander, TargetRoot, TemplateCatalog, TemplateEventKind, TemplateSpec,
    TemplateTarget,
};

use crate::context;
use crate::error::CodegenResult;
use crate::triggers::GenerationTrigger;
use crate::writer::{ArtifactWriter, WriteOutcome};

/// A target that produced no outputs in a run.
#[derive(Debug, Clone)]
pub struct SkippedTarget {
    pub template: String,
    pub path: String,
    pub reason: String,
}

/// A target that failed in a run.
#[derive(Debug, Clone)]
pub struct FailedTarget {
    pub template: String,
    pub path: String,
    pub error: String,
}

/// Outcome of one generation run.
///
/// Failures are collected per target; a failing target never aborts its
/// siblings or other templates.
#[derive(Debug, Default)]
pub struct GenerationReport {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<SkippedTarget>,
    pub failed: Vec<FailedTarget>,
}

impl GenerationReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Runs templates against project data and writes the resulting artifacts.
pub struct GenerationEngine<'a> {
    catalog: &'a TemplateCatalog,
    renderer: &'a dyn Renderer,
    expander: TargetExpander,
    workspace: PathBuf,
}

impl<'a> GenerationEngine<'a> {
    pub fn new(
        catalog: &'a TemplateCatalog,
        renderer: &'a dyn Renderer,
        workspace: impl Into<PathBuf>,
    ) -> Self {
        Self {
            catalog,
            renderer,
            expander: TargetExpander::new(),
            workspace: workspace.into(),
        }
    }

    /// Run every template in the catalog.
    pub fn generate_all(&self, store: &ProjectStore) -> GenerationReport {
        info!("Generating all templates");
        let mut report = GenerationReport::default();
        let mut writer = ArtifactWriter::new();

        for spec in self.catalog.list() {
            self.run_template(store, spec, None, &mut writer, &mut report);
        }
        report
    }

    /// Run a single template by id.
    pub fn generate_template(
        &self,
        store: &ProjectStore,
        template_id: &str,
    ) -> CodegenResult<GenerationReport> {
        let spec = self.catalog.template_required(template_id)?;
        let mut report = GenerationReport::default();
        let mut writer = ArtifactWriter::new();
        self.run_template(store, spec, None, &mut writer, &mut report);
        Ok(report)
    }

    /// Run the templates associated with an item's type, for that item only.
    pub fn generate_for_item(
        &self,
        store: &ProjectStore,
        item: &ProjectItem,
    ) -> CodegenResult<GenerationReport> {
        debug!("Generating for item {}/{}", item.type_id, item.id);
        let mut report = GenerationReport::default();
        let mut writer = ArtifactWriter::new();

        for spec in self.catalog.templates_for_type(&item.type_id)? {
            self.run_template(store, spec, Some(item), &mut writer, &mut report);
        }
        Ok(report)
    }

    /// Run the templates associated with a type, for all its items.
    pub fn generate_for_type(
        &self,
        store: &ProjectStore,
        type_id: &str,
    ) -> CodegenResult<GenerationReport> {
        debug!("Generating for type {}", type_id);
        let mut report = GenerationReport::default();
        let mut writer = ArtifactWriter::new();

        for spec in self.catalog.templates_for_type(type_id)? {
            self.run_template(store, spec, None, &mut writer, &mut report);
        }
        Ok(report)
    }

    /// React to a discrete trigger event.
    pub fn handle_trigger(
        &self,
        store: &ProjectStore,
        trigger: &GenerationTrigger,
    ) -> CodegenResult<GenerationReport> {
        info!("Handling trigger: {}", trigger);

        match trigger {
            GenerationTrigger::InstalledPluginsChanged => {
                let mut report = GenerationReport::default();
                let mut writer = ArtifactWriter::new();
                for spec in self
                    .catalog
                    .templates_for_event(TemplateEventKind::InstalledPluginsChanged)
                {
                    self.run_template(store, spec, None, &mut writer, &mut report);
                }
                Ok(report)
            }
            GenerationTrigger::ItemDeleted { type_id } => {
                let mut report = GenerationReport::default();
                let mut writer = ArtifactWriter::new();
                for spec in self
                    .catalog
                    .templates_for_event(TemplateEventKind::ItemOfTypeDeleted)
                {
                    if spec.item_specific.as_deref() == Some(type_id.as_str()) {
                        self.run_template(store, spec, None, &mut writer, &mut report);
                    }
                }
                Ok(report)
            }
            GenerationTrigger::ItemSaved { type_id, item_id } => {
                let item = store.get(type_id, item_id).ok_or_else(|| {
                    vforge_project::ProjectError::ItemNotFound {
                        type_id: type_id.clone(),
                        item_id: item_id.clone(),
                    }
                })?;
                self.generate_for_item(store, item)
            }
        }
    }

    fn run_template(
        &self,
        store: &ProjectStore,
        spec: &TemplateSpec,
        only_item: Option<&ProjectItem>,
        writer: &mut ArtifactWriter,
        report: &mut GenerationReport,
    ) {
        match &spec.item_specific {
            Some(type_id) => {
                // linked catalogs guarantee the type exists
                let type_spec = match self.catalog.types().get(type_id) {
                    Some(type_spec) => type_spec,
                    None => return,
                };
                if !type_spec.enabled {
                    report.skipped.push(SkippedTarget {
                        template: spec.id.clone(),
                        path: String::new(),
                        reason: format!("type '{}' is disabled", type_id),
                    });
                    return;
                }

                let items: Vec<&ProjectItem> = match only_item {
                    Some(item) => vec![item],
                    None => store.items_of_type(type_id).iter().collect(),
                };

                for item in items {
                    let ctx = context::item_context(item);
                    for target in &spec.targets {
                        let base = match target.root {
                            TargetRoot::Project => self.workspace.clone(),
                            TargetRoot::File => item
                                .folder()
                                .map(|folder| folder.to_path_buf())
                                .unwrap_or_else(|| {
                                    warn!(
                                        "Item {}/{} has no source folder, using workspace root",
                                        item.type_id, item.id
                                    );
                                    self.workspace.clone()
                                }),
                        };
                        self.run_target(spec, target, &ctx, &base, writer, report);
                    }
                }
            }
            None => {
                let ctx = context::project_context(self.catalog, store);
                for target in &spec.targets {
                    self.run_target(spec, target, &ctx, &self.workspace, writer, report);
                }
            }
        }
    }

    fn run_target(
        &self,
        spec: &TemplateSpec,
        target: &TemplateTarget,
        ctx: &serde_json::Value,
        base: &std::path::Path,
        writer: &mut ArtifactWriter,
        report: &mut GenerationReport,
    ) {
        let outputs = match self.expander.expand(target, ctx, base) {
            Ok(outputs) => outputs,
            Err(e) => {
                report.failed.push(FailedTarget {
                    template: spec.id.clone(),
                    path: target.path.clone(),
                    error: e.to_string(),
                });
                return;
            }
        };

        if outputs.is_empty() {
            report.skipped.push(SkippedTarget {
                template: spec.id.clone(),
                path: target.path.clone(),
                reason: "no outputs (condition false or empty iteration)".to_string(),
            });
            return;
        }

        for output in outputs {
            let destination = base.join(&output.path);
            let text = match self.renderer.render(&spec.template, &output.context) {
                Ok(text) => text,
                Err(e) => {
                    report.failed.push(FailedTarget {
                        template: spec.id.clone(),
                        path: destination.display().to_string(),
                        error: e.to_string(),
                    });
                    continue;
                }
            };

            match writer.write(&destination, &text, spec.encoding) {
                Ok(WriteOutcome::Written) => report.written.push(destination),
                Ok(WriteOutcome::DuplicateSkipped) => report.skipped.push(SkippedTarget {
                    template: spec.id.clone(),
                    path: destination.display().to_string(),
                    reason: "duplicate output path in this run".to_string(),
                }),
                Err(e) => report.failed.push(FailedTarget {
                    template: spec.id.clone(),
                    path: destination.display().to_string(),
                    error: e.to_string(),
                }),
            }
        }
    }
}
