//! Error types for the repository layer

use beacon_core::{ArtifactKind, ValidationError};
use std::time::Duration;
use thiserror::Error;

/// Result type alias for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors that can occur during repository operations
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// No artifact of this kind has the id
    #[error("{kind} not found: {id}")]
    NotFound { kind: ArtifactKind, id: String },

    /// A required field is missing; nothing was saved
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The key/value store rejected the write or read
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// The key/value store did not answer in time
    #[error("Persistence timed out after {0:?}")]
    Timeout(Duration),

    /// Stored data could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RepositoryError {
    pub fn not_found(kind: ArtifactKind, id: impl Into<String>) -> Self {
        RepositoryError::NotFound {
            kind,
            id: id.into(),
        }
    }
}
