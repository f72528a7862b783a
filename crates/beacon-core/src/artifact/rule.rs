//! Rule artifact: a banner message shown on matching records

use super::{default_enabled, require, Artifact, ArtifactKind, ArtifactMeta, Targeted};
use crate::condition::ConditionSet;
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Banner style of a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleType {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

/// Rule definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    #[serde(flatten)]
    pub meta: ArtifactMeta,

    /// Human-readable name
    #[serde(default)]
    pub name: String,

    /// CRM object type (contacts, deals, ...)
    #[serde(default)]
    pub object_type: String,

    /// Banner text
    #[serde(default)]
    pub message: String,

    #[serde(rename = "type", default)]
    pub rule_type: RuleType,

    /// Higher shows first
    #[serde(default)]
    pub priority: i32,

    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(flatten)]
    pub conditions: ConditionSet,
}

impl Rule {
    /// Create a new, unsaved rule
    pub fn new(
        name: impl Into<String>,
        object_type: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Rule {
            meta: ArtifactMeta::default(),
            name: name.into(),
            object_type: object_type.into(),
            message: message.into(),
            rule_type: RuleType::default(),
            priority: 0,
            enabled: true,
            conditions: ConditionSet::default(),
        }
    }

    pub fn with_type(mut self, rule_type: RuleType) -> Self {
        self.rule_type = rule_type;
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_conditions(mut self, conditions: ConditionSet) -> Self {
        self.conditions = conditions;
        self
    }
}

impl Artifact for Rule {
    const KIND: ArtifactKind = ArtifactKind::Rule;

    fn meta(&self) -> &ArtifactMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut ArtifactMeta {
        &mut self.meta
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require(Self::KIND, "name", &self.name)?;
        require(Self::KIND, "message", &self.message)
    }

    fn normalize(&mut self) {
        self.conditions.prune();
    }
}

impl Targeted for Rule {
    fn conditions(&self) -> &ConditionSet {
        &self.conditions
    }

    fn object_type(&self) -> &str {
        &self.object_type
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::{Condition, Logic, Operator};

    #[test]
    fn test_rule_wire_shape() {
        let rule = Rule::new("Renewal", "deals", "Offer the renewal bundle")
            .with_type(RuleType::Warning)
            .with_priority(5)
            .with_conditions(ConditionSet::any(vec![Condition::new(
                "dealstage",
                Operator::Equals,
                "closedwon",
            )]));

        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json["type"], "warning");
        assert_eq!(json["objectType"], "deals");
        assert_eq!(json["logic"], "ANY");
        assert_eq!(json["conditions"][0]["operator"], "equals");
        assert_eq!(json["enabled"], true);
    }

    #[test]
    fn test_rule_from_stored_json() {
        let json = r#"{
            "id": "rule_1700000000000",
            "createdAt": 1700000000000,
            "name": "Big deal",
            "objectType": "deals",
            "message": "Loop in your manager",
            "type": "info",
            "priority": 2,
            "conditions": [{"property": "amount", "operator": "greater_than", "value": "1000"}],
            "logic": "ALL",
            "displayOnAll": false
        }"#;

        let rule: Rule = serde_json::from_str(json).unwrap();
        assert_eq!(rule.id(), "rule_1700000000000");
        assert!(rule.enabled);
        assert_eq!(rule.conditions.logic, Logic::All);
        assert_eq!(rule.conditions.len(), 1);
        assert_eq!(rule.meta.updated_at, None);
    }

    #[test]
    fn test_rule_validation() {
        assert!(Rule::new("n", "deals", "m").validate().is_ok());
        assert_eq!(
            Rule::new("n", "deals", " ").validate(),
            Err(ValidationError::missing("Rule", "message"))
        );
        assert_eq!(
            Rule::new("", "deals", "m").validate(),
            Err(ValidationError::missing("Rule", "name"))
        );
    }
}
