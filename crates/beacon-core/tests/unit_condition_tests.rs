//! Unit tests for condition sets as they are authored and persisted

use beacon_core::{Condition, ConditionSet, Logic, Operator, PropertyDefinition, PropertyType, Rule};

#[test]
fn test_authoring_then_saving_keeps_only_complete_conditions() {
    let mut set = ConditionSet::new(Logic::Any);
    set.add_condition("lifecyclestage", Operator::Equals, Some("customer".to_string()));
    set.add_condition("", Operator::Contains, Some("orphan".to_string()));
    set.add_condition("amount", Operator::GreaterThan, None);
    set.add_condition("notes", Operator::IsEmpty, None);

    let json = serde_json::to_string(&set).unwrap();
    let saved: ConditionSet = serde_json::from_str(&json).unwrap();

    assert_eq!(saved.logic, Logic::Any);
    assert_eq!(
        saved.conditions,
        vec![
            Condition::new("lifecyclestage", Operator::Equals, "customer"),
            Condition::presence("notes", Operator::IsEmpty),
        ]
    );
}

#[test]
fn test_display_on_all_survives_round_trip_with_conditions() {
    let mut set = ConditionSet::all(vec![Condition::new("stage", Operator::Equals, "won")]);
    set.display_on_all = true;

    let saved: ConditionSet = serde_json::from_str(&serde_json::to_string(&set).unwrap()).unwrap();
    assert!(saved.display_on_all);
    assert_eq!(saved.len(), 1);
}

#[test]
fn test_unresolved_reference_is_preserved_on_save() {
    let catalog: Vec<PropertyDefinition> = Vec::new();
    let rule = Rule::new("Custom", "deals", "Check the custom score").with_conditions(
        ConditionSet::all(vec![Condition::new("custom_score", Operator::LessThan, "3")]),
    );

    let resolved = rule.conditions.resolve(&catalog);
    assert_eq!(resolved[0].label, "");

    let saved: Rule = serde_json::from_str(&serde_json::to_string(&rule).unwrap()).unwrap();
    assert_eq!(saved.conditions.conditions[0].property, "custom_score");
}

#[test]
fn test_resolution_after_catalog_loads() {
    let set = ConditionSet::all(vec![Condition::new("hs_lead_status", Operator::Equals, "OPEN")]);
    assert_eq!(set.resolve(&[])[0].label, "");

    let catalog = vec![PropertyDefinition::new("hs_lead_status", "Lead Status", PropertyType::Enumeration)
        .with_option("OPEN", "Open")];
    let resolved = set.resolve(&catalog);
    assert_eq!(resolved[0].label, "Lead Status");
    assert_eq!(resolved[0].value_label, Some("Open"));
}
