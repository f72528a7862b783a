//! Beacon Runtime - targeting evaluation and glossary indexing
//!
//! - [`MatchEvaluator`]: decides whether a condition set applies to a CRM record
//! - [`TriggerIndexBuilder`]: compiles glossary entries into a trigger lookup table
//! - [`PropertyCatalog`]: per-object-type cache of CRM property metadata

pub mod catalog;
pub mod engine;
pub mod error;
pub mod trigger;

pub use catalog::{CatalogStats, PropertyCatalog, PropertyProvider, StaticPropertyProvider};
pub use engine::{ConditionTrace, MatchEvaluator};
pub use error::{ProviderError, Result};
pub use trigger::{
    normalize_trigger, TriggerCollision, TriggerIndex, TriggerIndexBuilder, TriggerMatch,
    TriggerScanner,
};
