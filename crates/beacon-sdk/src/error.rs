//! SDK error types

use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Unknown operator or logic text
    #[error("Core error: {0}")]
    CoreError(#[from] beacon_core::CoreError),

    /// Required field missing on save
    #[error("Validation error: {0}")]
    ValidationError(#[from] beacon_core::ValidationError),

    /// Property provider failed
    #[error("Provider error: {0}")]
    ProviderError(#[from] beacon_runtime::ProviderError),

    /// Persistence failed
    #[error("Repository error: {0}")]
    RepositoryError(#[from] beacon_repository::RepositoryError),

    /// Property not present in the catalog for the object type
    #[error("Unknown property '{property}' on {object_type}")]
    UnknownProperty {
        object_type: String,
        property: String,
    },
}

impl From<config::ConfigError> for SdkError {
    fn from(e: config::ConfigError) -> Self {
        SdkError::ConfigError(e.to_string())
    }
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;
