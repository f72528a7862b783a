//! Beacon Core - shared types for the beacon sales-enablement overlay
//!
//! This crate provides the fundamental types used across the beacon workspace:
//! - Record values and property metadata fetched from the CRM
//! - Conditions, operators and condition sets (the targeting model)
//! - Targetable artifacts (rules, cards, presentations) and glossary entries
//! - Admin settings
//! - Error types

pub mod artifact;
pub mod condition;
pub mod error;
pub mod settings;
pub mod types;

// Re-export commonly used types
pub use artifact::{
    Artifact, ArtifactKind, ArtifactMeta, Card, CardSection, CardType, GlossaryEntry,
    Presentation, PropertyValueEntry, Rule, RuleType, Targeted,
};
pub use condition::{Condition, ConditionSet, Logic, Operator, ResolvedCondition};
pub use error::{CoreError, ValidationError};
pub use settings::Settings;
pub use types::{PropertyDefinition, PropertyOption, PropertyType, Record, Value};
