//! Error types for project data.

use thiserror::Error;

use crate::models::Contributor;

/// Result type alias for project operations.
pub type ProjectResult<T> = Result<T, ProjectError>;

/// Errors that can occur while working with project data.
#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("unknown project type: {0}")]
    UnknownType(String),

    #[error("duplicate project type: {0}")]
    DuplicateType(String),

    #[error("schema for type '{type_id}' failed to compile: {message}")]
    SchemaCompile { type_id: String, message: String },

    #[error("item '{item_id}' of type '{type_id}' failed schema validation: {errors}")]
    SchemaInvalid {
        type_id: String,
        item_id: String,
        errors: String,
    },

    #[error("item {type_id}/{item_id} is contributed by '{contributor}' and is read-only")]
    ReadOnlyItem {
        type_id: String,
        item_id: String,
        contributor: Contributor,
    },

    #[error("item already exists: {type_id}/{item_id}")]
    DuplicateItem { type_id: String, item_id: String },

    #[error("item not found: {type_id}/{item_id}")]
    ItemNotFound { type_id: String, item_id: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
