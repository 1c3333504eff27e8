//! Error types for rule parsing.

use thiserror::Error;

/// Result type alias for rule operations.
pub type LogicResult<T> = Result<T, LogicError>;

/// Errors that can occur while parsing a rule expression.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LogicError {
    #[error("unsupported operator: {operator}")]
    UnknownOperator { operator: String },

    #[error("malformed rule: {message}")]
    MalformedRule { message: String },
}
