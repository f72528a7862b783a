//! Condition and condition set types

use super::operator::Operator;
use crate::error::CoreError;
use crate::types::PropertyDefinition;
use serde::{Deserialize, Serialize, Serializer};
use std::str::FromStr;

/// A single property/operator/value predicate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Property name for the artifact's object type
    #[serde(default)]
    pub property: String,

    /// Operator
    pub operator: Operator,

    /// Comparison value; never read by the presence operators
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Condition {
    /// Create a condition; the value is dropped for operators that take none
    pub fn new(property: impl Into<String>, operator: Operator, value: impl Into<String>) -> Self {
        let value = operator.requires_value().then(|| value.into());
        Self {
            property: property.into(),
            operator,
            value,
        }
    }

    /// Create a presence condition (`is_empty` / `is_not_empty`)
    pub fn presence(property: impl Into<String>, operator: Operator) -> Self {
        Self {
            property: property.into(),
            operator,
            value: None,
        }
    }

    /// The value the operator reads, if any
    pub fn value(&self) -> Option<&str> {
        if self.operator.requires_value() {
            self.value.as_deref()
        } else {
            None
        }
    }

    /// A condition is complete when it names a property and, for operators
    /// that read one, carries a non-blank value.
    pub fn is_complete(&self) -> bool {
        if self.property.trim().is_empty() {
            return false;
        }
        if self.operator.requires_value() {
            return self.value.as_deref().is_some_and(|v| !v.trim().is_empty());
        }
        true
    }

    /// Copy with any value stripped from presence operators
    fn normalized(&self) -> Condition {
        Condition {
            property: self.property.clone(),
            operator: self.operator,
            value: self.value().map(str::to_string),
        }
    }
}

/// Combinator applied across a set's conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Logic {
    /// Every condition must hold (AND); vacuously true when empty
    #[default]
    #[serde(rename = "ALL", alias = "all", alias = "AND", alias = "and")]
    All,
    /// At least one condition must hold (OR); false when empty
    #[serde(rename = "ANY", alias = "any", alias = "OR", alias = "or")]
    Any,
}

impl FromStr for Logic {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ALL" | "AND" => Ok(Logic::All),
            "ANY" | "OR" => Ok(Logic::Any),
            _ => Err(CoreError::UnknownLogic(s.to_string())),
        }
    }
}

/// Ordered conditions plus combinator
///
/// When `display_on_all` is set the conditions are ignored entirely and the
/// set matches every record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionSet {
    /// Conditions in authoring order; incomplete ones are dropped on serialization
    #[serde(default, serialize_with = "serialize_complete")]
    pub conditions: Vec<Condition>,

    /// Combinator
    #[serde(default)]
    pub logic: Logic,

    /// Unconditional match override
    #[serde(default)]
    pub display_on_all: bool,
}

#[allow(clippy::ptr_arg)]
fn serialize_complete<S: Serializer>(
    conditions: &Vec<Condition>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let kept: Vec<Condition> = conditions
        .iter()
        .filter(|c| c.is_complete())
        .map(Condition::normalized)
        .collect();
    kept.serialize(serializer)
}

/// A condition paired with its catalog labels
///
/// `label` is empty when the property is not (yet) in the loaded catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCondition<'a> {
    pub condition: &'a Condition,
    pub label: &'a str,
    /// Label of the matching enumeration option, if any
    pub value_label: Option<&'a str>,
}

impl ConditionSet {
    /// Create an empty set with the given combinator
    pub fn new(logic: Logic) -> Self {
        Self {
            conditions: Vec::new(),
            logic,
            display_on_all: false,
        }
    }

    /// A set that matches every record
    pub fn display_on_all() -> Self {
        Self {
            display_on_all: true,
            ..Default::default()
        }
    }

    /// AND over the given conditions
    pub fn all(conditions: Vec<Condition>) -> Self {
        Self {
            conditions,
            logic: Logic::All,
            display_on_all: false,
        }
    }

    /// OR over the given conditions
    pub fn any(conditions: Vec<Condition>) -> Self {
        Self {
            conditions,
            logic: Logic::Any,
            display_on_all: false,
        }
    }

    /// Append a condition.
    ///
    /// The property is not checked against any catalog; references that are
    /// not loaded yet are kept verbatim and resolved when next rendered.
    pub fn add_condition(
        &mut self,
        property: impl Into<String>,
        operator: Operator,
        value: Option<String>,
    ) {
        let value = if operator.requires_value() { value } else { None };
        self.conditions.push(Condition {
            property: property.into(),
            operator,
            value,
        });
    }

    /// Remove the condition at `index`, if there is one
    pub fn remove_condition(&mut self, index: usize) -> Option<Condition> {
        if index < self.conditions.len() {
            Some(self.conditions.remove(index))
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Complete conditions only, as they would be persisted
    pub fn complete_conditions(&self) -> impl Iterator<Item = &Condition> {
        self.conditions.iter().filter(|c| c.is_complete())
    }

    /// Drop incomplete conditions and strip values from presence operators,
    /// leaving exactly what serialization would keep
    pub fn prune(&mut self) {
        self.conditions = self.complete_conditions().map(Condition::normalized).collect();
    }

    /// Resolve each condition against a catalog for labels
    pub fn resolve<'a>(&'a self, catalog: &'a [PropertyDefinition]) -> Vec<ResolvedCondition<'a>> {
        self.conditions
            .iter()
            .map(|condition| {
                let definition = catalog.iter().find(|d| d.name == condition.property);
                if definition.is_none() && !condition.property.is_empty() {
                    log::debug!("Unresolved property reference: {}", condition.property);
                }
                let value_label = match (definition, condition.value()) {
                    (Some(def), Some(value)) => def.option(value).map(|o| o.label.as_str()),
                    _ => None,
                };
                ResolvedCondition {
                    condition,
                    label: definition.map(|d| d.label.as_str()).unwrap_or(""),
                    value_label,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PropertyType;

    #[test]
    fn test_presence_condition_drops_value() {
        let c = Condition::new("industry", Operator::IsEmpty, "ignored");
        assert_eq!(c.value, None);
        assert!(c.is_complete());
    }

    #[test]
    fn test_incomplete_conditions() {
        assert!(!Condition::new("", Operator::Equals, "x").is_complete());
        assert!(!Condition::new("stage", Operator::Equals, "  ").is_complete());
        assert!(Condition::new("stage", Operator::Equals, "won").is_complete());
    }

    #[test]
    fn test_add_and_remove() {
        let mut set = ConditionSet::new(Logic::All);
        set.add_condition("stage", Operator::Equals, Some("won".to_string()));
        set.add_condition("industry", Operator::IsNotEmpty, Some("dropped".to_string()));
        assert_eq!(set.len(), 2);
        assert_eq!(set.conditions[1].value, None);

        let removed = set.remove_condition(0).unwrap();
        assert_eq!(removed.property, "stage");
        assert_eq!(set.len(), 1);
        assert!(set.remove_condition(5).is_none());
        assert_eq!(set.logic, Logic::All);
    }

    #[test]
    fn test_serialization_drops_incomplete_conditions() {
        let mut set = ConditionSet::any(vec![
            Condition::new("stage", Operator::Equals, "won"),
            Condition::new("", Operator::Equals, "orphan"),
        ]);
        set.conditions.push(Condition {
            property: "owner".to_string(),
            operator: Operator::IsEmpty,
            value: Some("stale".to_string()),
        });

        let json = serde_json::to_value(&set).unwrap();
        let conditions = json["conditions"].as_array().unwrap();
        assert_eq!(conditions.len(), 2);
        assert_eq!(conditions[0]["property"], "stage");
        assert!(conditions[1].get("value").is_none());
        assert_eq!(json["logic"], "ANY");
        assert_eq!(json["displayOnAll"], false);
    }

    #[test]
    fn test_prune_matches_serialized_form() {
        let mut set = ConditionSet::all(vec![
            Condition::new("stage", Operator::Equals, "won"),
            Condition::new("", Operator::Equals, "x"),
            Condition {
                property: "email".to_string(),
                operator: Operator::IsEmpty,
                value: Some("stale".to_string()),
            },
        ]);
        set.prune();

        assert_eq!(set.len(), 2);
        assert_eq!(set.conditions[1].value, None);
        let json = serde_json::to_value(&set).unwrap();
        let back: ConditionSet = serde_json::from_value(json).unwrap();
        assert_eq!(back, set);
    }

    #[test]
    fn test_deserialize_defaults() {
        let set: ConditionSet = serde_json::from_str("{}").unwrap();
        assert!(set.is_empty());
        assert_eq!(set.logic, Logic::All);
        assert!(!set.display_on_all);
    }

    #[test]
    fn test_logic_aliases() {
        let set: ConditionSet = serde_json::from_str(r#"{"logic": "OR"}"#).unwrap();
        assert_eq!(set.logic, Logic::Any);
        assert_eq!("and".parse::<Logic>().unwrap(), Logic::All);
        assert!("xor".parse::<Logic>().is_err());
    }

    #[test]
    fn test_resolve_keeps_unknown_properties() {
        let catalog = vec![
            PropertyDefinition::new("lifecyclestage", "Lifecycle Stage", PropertyType::Enumeration)
                .with_option("customer", "Customer"),
        ];
        let set = ConditionSet::all(vec![
            Condition::new("lifecyclestage", Operator::Equals, "customer"),
            Condition::new("custom_score", Operator::GreaterThan, "10"),
        ]);

        let resolved = set.resolve(&catalog);
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].label, "Lifecycle Stage");
        assert_eq!(resolved[0].value_label, Some("Customer"));
        assert_eq!(resolved[1].label, "");
        assert_eq!(resolved[1].condition.property, "custom_score");
    }
}
