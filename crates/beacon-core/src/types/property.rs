//! CRM property metadata
//!
//! Property definitions are fetched per object type from the CRM and are
//! immutable once fetched. They drive condition authoring (labels, option
//! pickers) and glossary seeding.

use serde::{Deserialize, Serialize};

/// Property value type as reported by the CRM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    String,
    Number,
    Enumeration,
    #[serde(alias = "datetime")]
    Date,
    #[serde(alias = "boolean")]
    Bool,
}

/// An allowed value of an enumeration property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyOption {
    pub value: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Metadata for one property of a CRM object type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDefinition {
    /// Internal name, unique within the object type
    pub name: String,

    /// Human-readable label
    pub label: String,

    /// Value type
    #[serde(rename = "type")]
    pub property_type: PropertyType,

    /// Allowed values (enumeration properties only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<PropertyOption>,

    /// Property group the CRM files this property under
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
}

impl PropertyDefinition {
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        property_type: PropertyType,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            property_type,
            options: Vec::new(),
            group_name: None,
        }
    }

    /// Add an enumeration option
    pub fn with_option(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.options.push(PropertyOption {
            value: value.into(),
            label: label.into(),
            description: None,
        });
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group_name = Some(group.into());
        self
    }

    pub fn is_enumeration(&self) -> bool {
        self.property_type == PropertyType::Enumeration
    }

    /// Find an option by value, ignoring case and surrounding whitespace
    pub fn option(&self, value: &str) -> Option<&PropertyOption> {
        let wanted = value.trim();
        self.options
            .iter()
            .find(|o| o.value.trim().eq_ignore_ascii_case(wanted))
    }
}
