//! Unit tests for ArtifactStore
//!
//! These tests focus on persistence failure handling, change notification
//! and export/import.

use async_trait::async_trait;
use beacon_core::{
    Card, CardType, Condition, ConditionSet, GlossaryEntry, Operator, Presentation, Rule, Settings,
};
use beacon_repository::{
    ArtifactStore, BroadcastNotifier, ChangeEvent, FixedClock, ImportDocument, KeyValueStore,
    MemoryStore, RepositoryError, RepositoryResult, SequenceIdGenerator, StoreMap,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Memory store whose writes can be made to fail or hang
#[derive(Default)]
struct FlakyStore {
    inner: MemoryStore,
    fail_writes: AtomicBool,
    hang_writes: AtomicBool,
    writes: AtomicUsize,
}

#[async_trait]
impl KeyValueStore for FlakyStore {
    async fn get(&self, defaults: StoreMap) -> RepositoryResult<StoreMap> {
        self.inner.get(defaults).await
    }

    async fn set(&self, items: StoreMap) -> RepositoryResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.hang_writes.load(Ordering::SeqCst) {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RepositoryError::Persistence("quota exceeded".to_string()));
        }
        self.inner.set(items).await
    }
}

fn store_over(backend: Arc<dyn KeyValueStore>) -> ArtifactStore {
    ArtifactStore::new(backend)
        .with_clock(Arc::new(FixedClock::at_millis(1_700_000_000_000)))
        .with_id_generator(Arc::new(SequenceIdGenerator::new()))
}

fn sample_rule() -> Rule {
    Rule::new("Big deal", "deals", "Loop in a solutions engineer")
        .with_priority(3)
        .with_conditions(ConditionSet::any(vec![
            Condition::new("lifecyclestage", Operator::Equals, "customer"),
            Condition::new("amount", Operator::GreaterThan, "1000"),
        ]))
}

#[tokio::test]
async fn test_failed_write_leaves_memory_unchanged() {
    let backend = Arc::new(FlakyStore::default());
    let mut store = store_over(backend.clone());
    let rule = store.create(sample_rule()).await.unwrap();

    backend.fail_writes.store(true, Ordering::SeqCst);

    let err = store.create(Rule::new("Second", "deals", "m")).await.unwrap_err();
    assert!(matches!(err, RepositoryError::Persistence(_)));
    assert_eq!(store.rules().len(), 1);

    let err = store.delete::<Rule>(&rule.meta.id).await.unwrap_err();
    assert!(matches!(err, RepositoryError::Persistence(_)));
    assert!(store.get::<Rule>(&rule.meta.id).is_some());

    assert!(store.set_rule_enabled(&rule.meta.id, false).await.is_err());
    assert!(store.get::<Rule>(&rule.meta.id).unwrap().enabled);
}

#[tokio::test]
async fn test_failed_glossary_write_keeps_old_index() {
    let backend = Arc::new(FlakyStore::default());
    let mut store = store_over(backend.clone());
    store.create(GlossaryEntry::new("ARR", "Annual recurring revenue")).await.unwrap();
    let before = store.trigger_index().clone();

    backend.fail_writes.store(true, Ordering::SeqCst);
    assert!(store.create(GlossaryEntry::new("MRR", "Monthly")).await.is_err());

    assert_eq!(store.trigger_index(), &before);
    assert!(store.trigger_index().lookup("mrr").is_none());
}

#[tokio::test(start_paused = true)]
async fn test_hung_write_times_out() {
    let backend = Arc::new(FlakyStore::default());
    backend.hang_writes.store(true, Ordering::SeqCst);
    let mut store = store_over(backend.clone()).with_timeout(Duration::from_secs(2));

    let err = store.create(sample_rule()).await.unwrap_err();
    assert!(matches!(err, RepositoryError::Timeout(d) if d == Duration::from_secs(2)));
    assert!(store.rules().is_empty());
}

#[tokio::test]
async fn test_notification_after_each_save() {
    let notifier = Arc::new(BroadcastNotifier::new(8));
    let mut rx = notifier.subscribe();
    let mut store = store_over(Arc::new(MemoryStore::new())).with_notifier(notifier.clone());

    store.create(sample_rule()).await.unwrap();
    assert_eq!(
        rx.recv().await.unwrap(),
        ChangeEvent::RefreshUi {
            keys: vec!["rules".to_string()]
        }
    );

    store.create(GlossaryEntry::new("ARR", "a")).await.unwrap();
    let ChangeEvent::RefreshUi { mut keys } = rx.recv().await.unwrap();
    keys.sort();
    assert_eq!(
        keys,
        vec![
            "entriesById",
            "glossaryEntries",
            "termTriggerIndex",
            "termTriggerIndexVersion"
        ]
    );
}

#[tokio::test]
async fn test_no_notification_when_write_fails() {
    let backend = Arc::new(FlakyStore::default());
    backend.fail_writes.store(true, Ordering::SeqCst);
    let notifier = Arc::new(BroadcastNotifier::new(8));
    let mut rx = notifier.subscribe();
    let mut store = store_over(backend).with_notifier(notifier.clone());

    assert!(store.create(sample_rule()).await.is_err());
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_export_import_round_trip() {
    let mut source = store_over(Arc::new(MemoryStore::new()));
    source.create(sample_rule()).await.unwrap();
    source
        .create(
            Card::new("Acme", "deals")
                .with_type(CardType::Competitor)
                .with_section("Strengths", "Price")
                .with_conditions(ConditionSet::display_on_all()),
        )
        .await
        .unwrap();
    source
        .create(Presentation::new(
            "Pitch",
            "deals",
            "https://www.youtube.com/watch?v=abc123",
        ))
        .await
        .unwrap();

    let json = source.export().to_json().unwrap();

    let mut target = store_over(Arc::new(MemoryStore::new()));
    let mut local = Settings::new();
    local.set("theme", "dark");
    target.update_settings(local).await.unwrap();

    let summary = target.import(ImportDocument::from_json(&json).unwrap()).await.unwrap();

    assert_eq!(summary.rules, Some(1));
    assert_eq!(summary.cards, Some(1));
    assert_eq!(summary.presentations, Some(1));
    assert_eq!(target.rules(), source.rules());
    assert_eq!(target.cards(), source.cards());
    assert_eq!(target.presentations(), source.presentations());

    // merged, not replaced
    assert_eq!(target.settings().get("theme"), Some(&serde_json::json!("dark")));
    assert!(target.settings().get_bool("showRules", false));
}

#[tokio::test]
async fn test_partial_import_leaves_other_collections() {
    let backend = Arc::new(FlakyStore::default());
    let mut store = store_over(backend.clone());
    store.create(sample_rule()).await.unwrap();
    store.create(Card::new("Acme", "deals")).await.unwrap();
    let writes_before = backend.writes.load(Ordering::SeqCst);

    let doc = ImportDocument::from_json(r#"{"battleCards": [], "settings": {"showCards": false}}"#)
        .unwrap();
    let summary = store.import(doc).await.unwrap();

    assert_eq!(summary.rules, None);
    assert_eq!(summary.cards, Some(0));
    assert_eq!(summary.settings_keys, 1);
    assert_eq!(store.rules().len(), 1);
    assert!(store.cards().is_empty());
    assert!(!store.settings().get_bool("showCards", true));
    assert_eq!(backend.writes.load(Ordering::SeqCst), writes_before + 1);
}

#[tokio::test]
async fn test_export_timestamp_is_rfc3339() {
    let store = store_over(Arc::new(MemoryStore::new()));
    let doc = store.export();
    assert!(chrono::DateTime::parse_from_rfc3339(&doc.exported_at).is_ok());
    assert!(doc.exported_at.starts_with("2023-11-14T22:13:20"));
}
