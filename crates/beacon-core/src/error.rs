//! Error types for beacon core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    #[error("Unknown logic combinator: {0}")]
    UnknownLogic(String),
}

/// Raised when an artifact is saved with a missing or malformed required field.
///
/// Blocks the save; nothing is partially written.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{kind} is missing required field '{field}'")]
    MissingField { kind: &'static str, field: &'static str },

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl ValidationError {
    pub fn missing(kind: &'static str, field: &'static str) -> Self {
        ValidationError::MissingField { kind, field }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
