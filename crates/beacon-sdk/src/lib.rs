//! Beacon admin SDK
//!
//! High-level API for the admin console: load configuration, wire the
//! property catalog and artifact store together, and preview which
//! artifacts apply to a CRM record.

pub mod builder;
pub mod config;
pub mod console;
pub mod error;

// Re-export main types
pub use builder::AdminConsoleBuilder;
pub use config::{AdminConfig, IdStrategy, StorageConfig};
pub use console::{AdminConsole, Applicable, ConditionSummary};
pub use error::{Result, SdkError};

// Re-export commonly used types from dependencies
pub use beacon_core::{Record, Value};
pub use beacon_repository::{ChangeEvent, ImportSummary};
pub use beacon_runtime::{ConditionTrace, PropertyProvider, StaticPropertyProvider};
