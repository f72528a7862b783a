//! Artifact store
//!
//! [`ArtifactStore`] holds the canonical rule, card, presentation and
//! glossary collections in memory and persists them through a
//! [`KeyValueStore`]. Every mutation builds the next collection on a copy,
//! writes the whole collection, and only then replaces the in-memory one. A
//! failed write leaves memory untouched and is returned to the caller.
//!
//! Glossary writes carry the rebuilt trigger index in the same `set` call,
//! so readers never see entries and index out of step.

use beacon_core::{Artifact, Card, GlossaryEntry, Presentation, Rule, Settings};
use beacon_runtime::{TriggerIndex, TriggerIndexBuilder};
use serde::de::DeserializeOwned;
use serde_json::{json, Value as JsonValue};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::RepositoryError;
use crate::id::{IdGenerator, TimestampIdGenerator};
use crate::keys;
use crate::notify::{ChangeEvent, ChangeNotifier, NoopNotifier};
use crate::traits::{KeyValueStore, StoreMap};
use crate::transfer::{ExportDocument, ImportDocument, ImportSummary};
use crate::RepositoryResult;

/// Default bound on a single store read or write
pub const DEFAULT_PERSISTENCE_TIMEOUT: Duration = Duration::from_secs(5);

/// In-memory copy of everything the store owns
#[derive(Debug, Clone, Default)]
pub struct StoreState {
    pub rules: Vec<Rule>,
    pub cards: Vec<Card>,
    pub presentations: Vec<Presentation>,
    pub glossary: Vec<GlossaryEntry>,
    pub settings: Settings,
    pub trigger_index: TriggerIndex,
}

/// An artifact kind with its own collection in the store
pub trait StoredArtifact: Artifact {
    /// Storage key of the collection
    const KEY: &'static str;

    fn collection(state: &StoreState) -> &Vec<Self>;

    fn collection_mut(state: &mut StoreState) -> &mut Vec<Self>;

    /// Derived index persisted alongside the collection, if the kind has one
    fn derived_index(_items: &[Self], _version: i64) -> Option<TriggerIndex> {
        None
    }
}

impl StoredArtifact for Rule {
    const KEY: &'static str = keys::RULES;

    fn collection(state: &StoreState) -> &Vec<Self> {
        &state.rules
    }

    fn collection_mut(state: &mut StoreState) -> &mut Vec<Self> {
        &mut state.rules
    }
}

impl StoredArtifact for Card {
    const KEY: &'static str = keys::CARDS;

    fn collection(state: &StoreState) -> &Vec<Self> {
        &state.cards
    }

    fn collection_mut(state: &mut StoreState) -> &mut Vec<Self> {
        &mut state.cards
    }
}

impl StoredArtifact for Presentation {
    const KEY: &'static str = keys::PRESENTATIONS;

    fn collection(state: &StoreState) -> &Vec<Self> {
        &state.presentations
    }

    fn collection_mut(state: &mut StoreState) -> &mut Vec<Self> {
        &mut state.presentations
    }
}

impl StoredArtifact for GlossaryEntry {
    const KEY: &'static str = keys::GLOSSARY_ENTRIES;

    fn collection(state: &StoreState) -> &Vec<Self> {
        &state.glossary
    }

    fn collection_mut(state: &mut StoreState) -> &mut Vec<Self> {
        &mut state.glossary
    }

    fn derived_index(items: &[Self], version: i64) -> Option<TriggerIndex> {
        Some(TriggerIndexBuilder::build(items, version))
    }
}

/// Owner of the artifact collections
pub struct ArtifactStore {
    backend: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
    notifier: Arc<dyn ChangeNotifier>,
    timeout: Duration,
    state: StoreState,
}

impl ArtifactStore {
    /// Store over `backend` with wall-clock timestamps, timestamp ids and no
    /// listeners. Call [`ArtifactStore::load`] before reading.
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        Self {
            backend,
            ids: Arc::new(TimestampIdGenerator::new(clock.clone())),
            clock,
            notifier: Arc::new(NoopNotifier),
            timeout: DEFAULT_PERSISTENCE_TIMEOUT,
            state: StoreState {
                settings: Settings::defaults(),
                ..Default::default()
            },
        }
    }

    /// Source of created/updated timestamps.
    ///
    /// The id generator is configured separately.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn ChangeNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Bound every store read and write by `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replace the in-memory state with what the backend holds.
    ///
    /// Missing keys fall back to empty collections and default settings.
    /// The trigger index is rebuilt from the loaded entries rather than
    /// trusted from storage.
    pub async fn load(&mut self) -> RepositoryResult<()> {
        let mut defaults = StoreMap::new();
        for key in [
            keys::RULES,
            keys::CARDS,
            keys::PRESENTATIONS,
            keys::GLOSSARY_ENTRIES,
        ] {
            defaults.insert(key.to_string(), json!([]));
        }
        defaults.insert(keys::SETTINGS.to_string(), JsonValue::Null);
        defaults.insert(keys::TRIGGER_INDEX_VERSION.to_string(), json!(0));

        let mut values = self.read(defaults).await?;

        let glossary: Vec<GlossaryEntry> = take_collection(&mut values, keys::GLOSSARY_ENTRIES)?;
        let version = values
            .get(keys::TRIGGER_INDEX_VERSION)
            .and_then(JsonValue::as_i64)
            .unwrap_or(0);

        let mut settings = Settings::defaults();
        match values.remove(keys::SETTINGS) {
            None | Some(JsonValue::Null) => {}
            Some(stored) => settings.merge(serde_json::from_value(stored)?),
        }

        let state = StoreState {
            rules: take_collection(&mut values, keys::RULES)?,
            cards: take_collection(&mut values, keys::CARDS)?,
            presentations: take_collection(&mut values, keys::PRESENTATIONS)?,
            trigger_index: TriggerIndexBuilder::build(&glossary, version),
            glossary,
            settings,
        };

        info!(
            rules = state.rules.len(),
            cards = state.cards.len(),
            presentations = state.presentations.len(),
            glossary = state.glossary.len(),
            "artifact store loaded"
        );
        self.state = state;
        Ok(())
    }

    pub fn state(&self) -> &StoreState {
        &self.state
    }

    pub fn list<A: StoredArtifact>(&self) -> &[A] {
        A::collection(&self.state)
    }

    pub fn get<A: StoredArtifact>(&self, id: &str) -> Option<&A> {
        A::collection(&self.state).iter().find(|a| a.id() == id)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.state.rules
    }

    pub fn cards(&self) -> &[Card] {
        &self.state.cards
    }

    pub fn presentations(&self) -> &[Presentation] {
        &self.state.presentations
    }

    pub fn glossary(&self) -> &[GlossaryEntry] {
        &self.state.glossary
    }

    pub fn settings(&self) -> &Settings {
        &self.state.settings
    }

    pub fn trigger_index(&self) -> &TriggerIndex {
        &self.state.trigger_index
    }

    /// Validate and append a new artifact.
    ///
    /// Any id or timestamps on the input are replaced.
    pub async fn create<A: StoredArtifact>(&mut self, mut artifact: A) -> RepositoryResult<A> {
        artifact.normalize();
        artifact.validate()?;

        let now = self.clock.now_millis();
        let meta = artifact.meta_mut();
        meta.id = format!("{}_{}", A::KIND.id_prefix(), self.ids.next_token());
        meta.created_at = now;
        meta.updated_at = None;

        let mut items = A::collection(&self.state).clone();
        items.push(artifact.clone());
        self.save(items).await?;

        info!(kind = %A::KIND, id = artifact.id(), "artifact created");
        Ok(artifact)
    }

    /// Replace an artifact's content, keeping its id and creation time
    pub async fn update<A: StoredArtifact>(&mut self, id: &str, mut artifact: A) -> RepositoryResult<A> {
        let position = self.position::<A>(id)?;
        artifact.normalize();
        artifact.validate()?;

        let mut items = A::collection(&self.state).clone();
        let created_at = items[position].meta().created_at;
        let meta = artifact.meta_mut();
        meta.id = id.to_string();
        meta.created_at = created_at;
        meta.updated_at = Some(self.clock.now_millis());

        items[position] = artifact.clone();
        self.save(items).await?;

        info!(kind = %A::KIND, id, "artifact updated");
        Ok(artifact)
    }

    /// Remove an artifact for good
    pub async fn delete<A: StoredArtifact>(&mut self, id: &str) -> RepositoryResult<A> {
        let position = self.position::<A>(id)?;

        let mut items = A::collection(&self.state).clone();
        let removed = items.remove(position);
        self.save(items).await?;

        info!(kind = %A::KIND, id, "artifact deleted");
        Ok(removed)
    }

    /// Flip a rule's `enabled` flag; id and timestamps are left alone
    pub async fn set_rule_enabled(&mut self, id: &str, enabled: bool) -> RepositoryResult<()> {
        self.modify::<Rule, _>(id, |rule| rule.enabled = enabled).await
    }

    /// Flip a glossary entry's `enabled` flag and rebuild the index
    pub async fn set_glossary_enabled(&mut self, id: &str, enabled: bool) -> RepositoryResult<()> {
        self.modify::<GlossaryEntry, _>(id, |entry| entry.enabled = enabled)
            .await
    }

    /// Rebuild the trigger index from the current entries and persist it
    pub async fn rebuild_trigger_index(&mut self) -> RepositoryResult<&TriggerIndex> {
        let items = self.state.glossary.clone();
        self.save(items).await?;
        Ok(&self.state.trigger_index)
    }

    /// Merge `changes` into the settings document
    pub async fn update_settings(&mut self, changes: Settings) -> RepositoryResult<&Settings> {
        let mut next = self.state.settings.clone();
        next.merge(changes);

        let mut payload = StoreMap::new();
        payload.insert(keys::SETTINGS.to_string(), serde_json::to_value(&next)?);
        self.write(payload).await?;

        self.state.settings = next;
        Ok(&self.state.settings)
    }

    /// Snapshot of the targetable collections and settings
    pub fn export(&self) -> ExportDocument {
        ExportDocument {
            rules: self.state.rules.clone(),
            battle_cards: self.state.cards.clone(),
            presentations: self.state.presentations.clone(),
            settings: self.state.settings.clone(),
            exported_at: self.clock.now().to_rfc3339(),
        }
    }

    /// Apply an import document in a single write.
    ///
    /// Imported artifacts are taken as they are, ids and timestamps included.
    pub async fn import(&mut self, doc: ImportDocument) -> RepositoryResult<ImportSummary> {
        let mut summary = ImportSummary::default();
        if doc.is_empty() {
            debug!("empty import document ignored");
            return Ok(summary);
        }

        let mut next = self.state.clone();
        let mut payload = StoreMap::new();

        if let Some(rules) = doc.rules {
            summary.rules = Some(rules.len());
            payload.insert(keys::RULES.to_string(), serde_json::to_value(&rules)?);
            next.rules = rules;
        }
        if let Some(cards) = doc.battle_cards {
            summary.cards = Some(cards.len());
            payload.insert(keys::CARDS.to_string(), serde_json::to_value(&cards)?);
            next.cards = cards;
        }
        if let Some(presentations) = doc.presentations {
            summary.presentations = Some(presentations.len());
            payload.insert(
                keys::PRESENTATIONS.to_string(),
                serde_json::to_value(&presentations)?,
            );
            next.presentations = presentations;
        }
        if let Some(settings) = doc.settings {
            summary.settings_keys = settings.len();
            next.settings.merge(settings);
            payload.insert(keys::SETTINGS.to_string(), serde_json::to_value(&next.settings)?);
        }

        self.write(payload).await?;
        self.state = next;

        info!(?summary, "import applied");
        Ok(summary)
    }

    fn position<A: StoredArtifact>(&self, id: &str) -> RepositoryResult<usize> {
        A::collection(&self.state)
            .iter()
            .position(|a| a.id() == id)
            .ok_or_else(|| RepositoryError::not_found(A::KIND, id))
    }

    async fn modify<A, F>(&mut self, id: &str, change: F) -> RepositoryResult<()>
    where
        A: StoredArtifact,
        F: FnOnce(&mut A),
    {
        let position = self.position::<A>(id)?;
        let mut items = A::collection(&self.state).clone();
        change(&mut items[position]);
        self.save(items).await
    }

    /// Write a whole collection (plus its derived index) and commit it
    async fn save<A: StoredArtifact>(&mut self, items: Vec<A>) -> RepositoryResult<()> {
        let mut payload = StoreMap::new();
        payload.insert(A::KEY.to_string(), serde_json::to_value(&items)?);

        let index = A::derived_index(&items, self.next_index_version());
        if let Some(index) = &index {
            payload.insert(
                keys::TERM_TRIGGER_INDEX.to_string(),
                serde_json::to_value(&index.term_map)?,
            );
            payload.insert(
                keys::ENTRIES_BY_ID.to_string(),
                serde_json::to_value(&index.entries_by_id)?,
            );
            payload.insert(keys::TRIGGER_INDEX_VERSION.to_string(), json!(index.version));
        }

        self.write(payload).await?;

        *A::collection_mut(&mut self.state) = items;
        if let Some(index) = index {
            debug!(
                version = index.version,
                triggers = index.trigger_count(),
                "trigger index committed"
            );
            self.state.trigger_index = index;
        }
        Ok(())
    }

    /// Index versions are millisecond stamps that never go backwards
    fn next_index_version(&self) -> i64 {
        self.clock
            .now_millis()
            .max(self.state.trigger_index.version + 1)
    }

    async fn read(&self, defaults: StoreMap) -> RepositoryResult<StoreMap> {
        match tokio::time::timeout(self.timeout, self.backend.get(defaults)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(timeout = ?self.timeout, "store read timed out");
                Err(RepositoryError::Timeout(self.timeout))
            }
        }
    }

    async fn write(&self, payload: StoreMap) -> RepositoryResult<()> {
        let keys: Vec<String> = payload.keys().cloned().collect();

        match tokio::time::timeout(self.timeout, self.backend.set(payload)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                warn!(?keys, error = %e, "store write failed");
                return Err(e);
            }
            Err(_) => {
                warn!(?keys, timeout = ?self.timeout, "store write timed out");
                return Err(RepositoryError::Timeout(self.timeout));
            }
        }

        debug!(?keys, "store write committed");
        self.notifier.notify(ChangeEvent::RefreshUi { keys });
        Ok(())
    }
}

fn take_collection<T: DeserializeOwned>(values: &mut StoreMap, key: &str) -> RepositoryResult<Vec<T>> {
    match values.remove(key) {
        None | Some(JsonValue::Null) => Ok(Vec::new()),
        Some(value) => Ok(serde_json::from_value(value)?),
    }
}
