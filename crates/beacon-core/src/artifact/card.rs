//! Reference (battle) card artifact

use super::{require, Artifact, ArtifactKind, ArtifactMeta, Targeted};
use crate::condition::ConditionSet;
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Competitor,
    Objection,
    Tip,
    Process,
    #[default]
    #[serde(other)]
    Other,
}

/// One titled block of card content
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CardSection {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl CardSection {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    fn is_blank(&self) -> bool {
        self.title.trim().is_empty() && self.content.trim().is_empty()
    }
}

/// Card definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    #[serde(flatten)]
    pub meta: ArtifactMeta,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub object_type: String,

    #[serde(rename = "type", default)]
    pub card_type: CardType,

    #[serde(default)]
    pub sections: Vec<CardSection>,

    /// Optional link to a longer asset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    #[serde(flatten)]
    pub conditions: ConditionSet,
}

impl Card {
    pub fn new(name: impl Into<String>, object_type: impl Into<String>) -> Self {
        Card {
            meta: ArtifactMeta::default(),
            name: name.into(),
            object_type: object_type.into(),
            card_type: CardType::default(),
            sections: Vec::new(),
            link: None,
            conditions: ConditionSet::default(),
        }
    }

    pub fn with_type(mut self, card_type: CardType) -> Self {
        self.card_type = card_type;
        self
    }

    pub fn with_section(mut self, title: impl Into<String>, content: impl Into<String>) -> Self {
        self.sections.push(CardSection::new(title, content));
        self
    }

    pub fn with_conditions(mut self, conditions: ConditionSet) -> Self {
        self.conditions = conditions;
        self
    }
}

impl Artifact for Card {
    const KIND: ArtifactKind = ArtifactKind::Card;

    fn meta(&self) -> &ArtifactMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut ArtifactMeta {
        &mut self.meta
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require(Self::KIND, "name", &self.name)
    }

    // Empty sections left behind by the editor are not saved
    fn normalize(&mut self) {
        self.conditions.prune();
        self.sections.retain(|s| !s.is_blank());
        if self.link.as_deref().is_some_and(|l| l.trim().is_empty()) {
            self.link = None;
        }
    }
}

impl Targeted for Card {
    fn conditions(&self) -> &ConditionSet {
        &self.conditions
    }

    fn object_type(&self) -> &str {
        &self.object_type
    }
}
