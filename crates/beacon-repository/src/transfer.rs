//! Export/import document
//!
//! Export writes every targetable collection plus settings. Import accepts
//! any subset of those keys: provided collections replace the stored ones
//! wholesale, provided settings are merged key by key.

use beacon_core::{Card, Presentation, Rule, Settings};
use serde::{Deserialize, Serialize};

use crate::RepositoryResult;

/// Full snapshot produced by [`crate::ArtifactStore::export`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub rules: Vec<Rule>,
    pub battle_cards: Vec<Card>,
    pub presentations: Vec<Presentation>,
    pub settings: Settings,
    /// RFC 3339 timestamp
    pub exported_at: String,
}

impl ExportDocument {
    pub fn to_json(&self) -> RepositoryResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Partial document accepted by [`crate::ArtifactStore::import`]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<Rule>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battle_cards: Option<Vec<Card>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presentations: Option<Vec<Presentation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Settings>,
    /// Informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<String>,
}

impl ImportDocument {
    pub fn from_json(json: &str) -> RepositoryResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// True when the document carries nothing to apply
    pub fn is_empty(&self) -> bool {
        self.rules.is_none()
            && self.battle_cards.is_none()
            && self.presentations.is_none()
            && self.settings.is_none()
    }
}

impl From<ExportDocument> for ImportDocument {
    fn from(doc: ExportDocument) -> Self {
        ImportDocument {
            rules: Some(doc.rules),
            battle_cards: Some(doc.battle_cards),
            presentations: Some(doc.presentations),
            settings: Some(doc.settings),
            exported_at: Some(doc.exported_at),
        }
    }
}

/// What an import changed; `None` means the key was absent and left alone
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub rules: Option<usize>,
    pub cards: Option<usize>,
    pub presentations: Option<usize>,
    /// Settings keys merged
    pub settings_keys: usize,
}
