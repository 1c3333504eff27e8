//! Error types for template declarations and expansion.

use thiserror::Error;

/// Result type alias for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Errors that can occur during template operations.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("unknown template: {0}")]
    UnknownTemplate(String),

    #[error("duplicate template: {0}")]
    DuplicateTemplate(String),

    #[error("template '{template}' binds item type '{type_id}' which is not registered")]
    UnknownItemSpecificType { template: String, type_id: String },

    #[error("type '{type_id}' references unknown template '{template}'")]
    UnknownTemplateReference { type_id: String, template: String },

    #[error("template '{template}' target '{path}' has an invalid condition: {message}")]
    InvalidCondition {
        template: String,
        path: String,
        message: String,
    },

    #[error("template '{template}' uses a file root but binds no item type")]
    FileRootOnSharedTemplate { template: String },

    #[error("unresolved placeholder '{token}' in path pattern '{pattern}'")]
    UnresolvedPlaceholder { pattern: String, token: String },

    #[error("template source not found: {0}")]
    SourceNotFound(String),

    #[error("rendering failed for template '{template}': {message}")]
    RenderFailed { template: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("glob error: {0}")]
    Glob(#[from] glob::PatternError),

    #[error("project error: {0}")]
    Project(#[from] vforge_project::ProjectError),
}
