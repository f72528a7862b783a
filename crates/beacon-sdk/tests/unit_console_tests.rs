//! Unit tests for AdminConsole
//!
//! These tests drive the facade end to end over an in-memory store and a
//! static property provider.

use beacon_core::{
    Card, Condition, ConditionSet, Operator, Presentation, PropertyDefinition, PropertyType,
    Record, Rule,
};
use beacon_repository::{FixedClock, MemoryStore, SequenceIdGenerator};
use beacon_runtime::{ProviderError, StaticPropertyProvider};
use beacon_sdk::{AdminConsole, AdminConsoleBuilder, ChangeEvent, SdkError};
use std::sync::Arc;

fn deal_properties() -> Vec<PropertyDefinition> {
    vec![
        PropertyDefinition::new("dealstage", "Deal Stage", PropertyType::Enumeration)
            .with_option("closedwon", "Closed Won")
            .with_option("closedlost", "Closed Lost"),
        PropertyDefinition::new("amount", "Amount", PropertyType::Number),
    ]
}

async fn console() -> AdminConsole {
    AdminConsoleBuilder::new()
        .with_provider(Arc::new(
            StaticPropertyProvider::new().with_properties("deals", deal_properties()),
        ))
        .with_store(Arc::new(MemoryStore::new()))
        .with_clock(Arc::new(FixedClock::at_millis(1_700_000_000_000)))
        .with_id_generator(Arc::new(SequenceIdGenerator::new()))
        .build()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_any_rule_matches_on_second_condition() {
    let mut console = console().await;
    console
        .store_mut()
        .create(
            Rule::new("Upsell", "contacts", "Pitch the enterprise tier").with_conditions(
                ConditionSet::any(vec![
                    Condition::new("lifecyclestage", Operator::Equals, "customer"),
                    Condition::new("amount", Operator::GreaterThan, "1000"),
                ]),
            ),
        )
        .await
        .unwrap();

    let record = Record::new()
        .with("lifecyclestage", "lead")
        .with("amount", "5000");
    let applicable = console.applicable("contacts", &record);

    assert_eq!(applicable.rules.len(), 1);
    assert_eq!(applicable.rules[0].name, "Upsell");
}

#[tokio::test]
async fn test_applicable_filters_object_type_and_disabled() {
    let mut console = console().await;
    let store = console.store_mut();

    store
        .create(Rule::new("Low", "deals", "low").with_priority(1))
        .await
        .unwrap();
    store
        .create(Rule::new("High", "deals", "high").with_priority(9))
        .await
        .unwrap();
    let off = store.create(Rule::new("Off", "deals", "off")).await.unwrap();
    store.set_rule_enabled(&off.meta.id, false).await.unwrap();
    store
        .create(Rule::new("Contacts only", "contacts", "c"))
        .await
        .unwrap();
    store.create(Card::new("Acme", "deals")).await.unwrap();
    store
        .create(
            Presentation::new("Deck", "deals", "https://example.com/deck").with_conditions(
                ConditionSet::all(vec![Condition::new(
                    "dealstage",
                    Operator::Equals,
                    "closedwon",
                )]),
            ),
        )
        .await
        .unwrap();

    let record = Record::new().with("dealstage", "appointmentscheduled");
    let applicable = console.applicable("deals", &record);

    let names: Vec<&str> = applicable.rules.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["High", "Low"]);
    assert_eq!(applicable.cards.len(), 1);
    assert!(applicable.presentations.is_empty());

    assert!(console.applicable("tickets", &record).is_empty());
}

#[tokio::test]
async fn test_preview_trace() {
    let console = console().await;
    let set = ConditionSet::all(vec![
        Condition::new("amount", Operator::GreaterThan, "100"),
        Condition::new("dealstage", Operator::Equals, "closedwon"),
    ]);

    let (matched, trace) = console.preview(&set, &Record::new().with("amount", "N/A"));

    assert!(!matched);
    assert_eq!(trace.len(), 1);
    assert_eq!(trace[0].property, "amount");
    assert!(!trace[0].result);
}

#[tokio::test]
async fn test_describe_conditions_uses_catalog_labels() {
    let console = console().await;
    let set = ConditionSet::all(vec![
        Condition::new("dealstage", Operator::Equals, "closedwon"),
        Condition::new("custom_score", Operator::LessThan, "7"),
    ]);

    let summary = console.describe_conditions("deals", &set).await.unwrap();

    assert_eq!(summary[0].label, "Deal Stage");
    assert_eq!(summary[0].value.as_deref(), Some("Closed Won"));
    assert_eq!(summary[1].label, "");
    assert_eq!(summary[1].property, "custom_score");
    assert_eq!(summary[1].value.as_deref(), Some("7"));
}

#[tokio::test]
async fn test_seed_glossary_entry() {
    let mut console = console().await;

    let entry = console.seed_glossary_entry("deals", "dealstage").await.unwrap();
    assert_eq!(entry.term, "Deal Stage");
    assert_eq!(entry.property_values.len(), 2);
    assert_eq!(
        console.store().trigger_index().lookup("dealstage").unwrap().meta.id,
        entry.meta.id
    );

    let err = console.seed_glossary_entry("deals", "nope").await.unwrap_err();
    assert!(matches!(err, SdkError::UnknownProperty { .. }));
}

#[tokio::test]
async fn test_missing_provider_means_missing_credentials() {
    let console = AdminConsole::builder().build().await.unwrap();

    let err = console
        .describe_conditions("deals", &ConditionSet::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SdkError::ProviderError(ProviderError::MissingCredentials)
    ));
}

#[tokio::test]
async fn test_subscribers_see_saves() {
    let mut console = console().await;
    let mut rx = console.subscribe();

    console
        .store_mut()
        .create(Card::new("Acme", "deals"))
        .await
        .unwrap();

    assert_eq!(
        rx.recv().await.unwrap(),
        ChangeEvent::RefreshUi {
            keys: vec!["cards".to_string()]
        }
    );
}

#[tokio::test]
async fn test_export_import_json() {
    let mut source = console().await;
    source
        .store_mut()
        .create(Rule::new("R", "deals", "m"))
        .await
        .unwrap();
    let json = source.export_json().unwrap();

    let mut target = console().await;
    let summary = target.import_json(&json).await.unwrap();

    assert_eq!(summary.rules, Some(1));
    assert_eq!(target.store().rules(), source.store().rules());
}

#[tokio::test]
async fn test_clear_credentials_drops_catalog() {
    let console = console().await;
    console.catalog().fetch("deals").await.unwrap();
    assert!(console.catalog().cached("deals").await.is_some());

    console.clear_credentials().await;
    assert!(console.catalog().cached("deals").await.is_none());
}
