//! Error types for generation.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for generation operations.
pub type CodegenResult<T> = Result<T, CodegenError>;

/// Errors that can occur during generation.
#[derive(Error, Debug)]
pub enum CodegenError {
    #[error("invalid output path: {0}")]
    InvalidOutputPath(PathBuf),

    #[error("template error: {0}")]
    Template(#[from] vforge_templates::TemplateError),

    #[error("project error: {0}")]
    Project(#[from] vforge_project::ProjectError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
