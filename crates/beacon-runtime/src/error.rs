//! Runtime error types

use std::time::Duration;
use thiserror::Error;

/// Failure of the external property provider.
///
/// Never fatal: the caller shows the message and may retry the fetch.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// No CRM credentials are configured
    #[error("CRM credentials are not configured")]
    MissingCredentials,

    /// The provider call failed
    #[error("Property request failed: {0}")]
    Request(String),

    /// The provider did not answer in time
    #[error("Property request timed out after {0:?}")]
    Timeout(Duration),

    /// The provider answered with something unusable
    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),
}

/// Result type for provider operations
pub type Result<T> = std::result::Result<T, ProviderError>;
