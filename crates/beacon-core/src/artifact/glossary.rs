//! Glossary entries
//!
//! An entry defines a term (plus aliases) that the page overlay highlights
//! wherever it appears. Entries seeded from an enumeration property also
//! carry one sub-entry per option value, each with its own definition.

use super::{default_enabled, require, Artifact, ArtifactKind, ArtifactMeta};
use crate::error::ValidationError;
use crate::types::PropertyDefinition;
use serde::{Deserialize, Serialize};

/// Definition of one value of an enumeration property
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PropertyValueEntry {
    pub value: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub definition: String,
}

/// Glossary entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlossaryEntry {
    #[serde(flatten)]
    pub meta: ArtifactMeta,

    #[serde(default)]
    pub term: String,

    #[serde(default)]
    pub aliases: Vec<String>,

    /// Text shown in the hover card
    #[serde(default)]
    pub definition: String,

    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_group: Option<String>,

    /// Internal property name, for entries seeded from the catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_name: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub property_values: Vec<PropertyValueEntry>,
}

impl GlossaryEntry {
    pub fn new(term: impl Into<String>, definition: impl Into<String>) -> Self {
        GlossaryEntry {
            meta: ArtifactMeta::default(),
            term: term.into(),
            aliases: Vec::new(),
            definition: definition.into(),
            enabled: true,
            object_type: None,
            property_group: None,
            property_name: None,
            property_values: Vec::new(),
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Seed an entry from a catalog property.
    ///
    /// The label becomes the term and the internal name an alias (when it
    /// differs); enumeration options become value sub-entries with empty
    /// definitions for the author to fill in.
    pub fn from_property(object_type: impl Into<String>, definition: &PropertyDefinition) -> Self {
        let mut entry = GlossaryEntry::new(definition.label.clone(), String::new());
        if !definition.name.eq_ignore_ascii_case(&definition.label) {
            entry.aliases.push(definition.name.clone());
        }
        entry.object_type = Some(object_type.into());
        entry.property_group = definition.group_name.clone();
        entry.property_name = Some(definition.name.clone());
        entry.property_values = definition
            .options
            .iter()
            .map(|o| PropertyValueEntry {
                value: o.value.clone(),
                label: o.label.clone(),
                description: o.description.clone().unwrap_or_default(),
                definition: String::new(),
            })
            .collect();
        entry
    }

    /// The term followed by every alias, unnormalized
    pub fn triggers(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.term.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    /// Look up a value sub-entry, ignoring case
    pub fn property_value(&self, value: &str) -> Option<&PropertyValueEntry> {
        self.property_values
            .iter()
            .find(|v| v.value.eq_ignore_ascii_case(value.trim()))
    }
}

impl Artifact for GlossaryEntry {
    const KIND: ArtifactKind = ArtifactKind::Glossary;

    fn meta(&self) -> &ArtifactMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut ArtifactMeta {
        &mut self.meta
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require(Self::KIND, "term", &self.term)
    }

    fn normalize(&mut self) {
        self.term = self.term.trim().to_string();
        self.aliases = self
            .aliases
            .iter()
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect();
    }
}
