//! Targetable artifacts and glossary entries
//!
//! Rules, cards and presentations each own a `ConditionSet` plus a
//! kind-specific payload. Glossary entries are not targeted by conditions;
//! they feed the trigger index instead.

mod card;
mod glossary;
mod presentation;
mod rule;

pub use card::{Card, CardSection, CardType};
pub use glossary::{GlossaryEntry, PropertyValueEntry};
pub use presentation::{to_embed_url, Presentation};
pub use rule::{Rule, RuleType};

use crate::condition::ConditionSet;
use crate::error::ValidationError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kinds of stored artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Rule,
    Card,
    Presentation,
    Glossary,
}

impl ArtifactKind {
    /// Prefix for generated ids (`rule_...`)
    pub fn id_prefix(&self) -> &'static str {
        match self {
            ArtifactKind::Rule => "rule",
            ArtifactKind::Card => "card",
            ArtifactKind::Presentation => "presentation",
            ArtifactKind::Glossary => "glossary",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ArtifactKind::Rule => "Rule",
            ArtifactKind::Card => "Card",
            ArtifactKind::Presentation => "Presentation",
            ArtifactKind::Glossary => "Glossary entry",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identity and timestamps shared by every artifact
///
/// Timestamps are milliseconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactMeta {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

/// Common behaviour of stored artifacts
pub trait Artifact: Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    const KIND: ArtifactKind;

    fn meta(&self) -> &ArtifactMeta;

    fn meta_mut(&mut self) -> &mut ArtifactMeta;

    /// Check required fields before a save
    fn validate(&self) -> Result<(), ValidationError>;

    /// Canonicalise fields before a save
    fn normalize(&mut self) {}

    fn id(&self) -> &str {
        &self.meta().id
    }
}

/// Artifacts that carry targeting conditions
pub trait Targeted {
    fn conditions(&self) -> &ConditionSet;

    /// CRM object type the artifact targets
    fn object_type(&self) -> &str;

    fn is_enabled(&self) -> bool {
        true
    }
}

pub(crate) fn require(
    kind: ArtifactKind,
    field: &'static str,
    value: &str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::missing(kind.name(), field))
    } else {
        Ok(())
    }
}

pub(crate) fn default_enabled() -> bool {
    true
}
