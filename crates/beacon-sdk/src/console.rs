//! Admin console facade
//!
//! Ties the property catalog, the artifact store and the evaluator
//! together for the admin surface: authoring, previews against a sample
//! record, glossary seeding and export/import.

use beacon_core::{Card, ConditionSet, GlossaryEntry, Presentation, Record, Rule, Targeted};
use beacon_repository::{ArtifactStore, BroadcastNotifier, ChangeEvent, ImportDocument, ImportSummary};
use beacon_runtime::{ConditionTrace, MatchEvaluator, PropertyCatalog};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::config::AdminConfig;
use crate::error::{Result, SdkError};

/// Artifacts that apply to one record
#[derive(Debug, Default)]
pub struct Applicable<'a> {
    /// Highest priority first
    pub rules: Vec<&'a Rule>,
    pub cards: Vec<&'a Card>,
    pub presentations: Vec<&'a Presentation>,
}

impl Applicable<'_> {
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty() && self.cards.is_empty() && self.presentations.is_empty()
    }
}

/// Human-readable form of one condition
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionSummary {
    pub property: String,
    /// Catalog label; empty when the property is not in the catalog
    pub label: String,
    pub operator: &'static str,
    /// Option label when the value is an enumeration option, else the raw value
    pub value: Option<String>,
}

/// The admin console
pub struct AdminConsole {
    config: AdminConfig,
    catalog: PropertyCatalog,
    store: ArtifactStore,
    notifier: Arc<BroadcastNotifier>,
}

impl AdminConsole {
    pub(crate) fn new(
        config: AdminConfig,
        catalog: PropertyCatalog,
        store: ArtifactStore,
        notifier: Arc<BroadcastNotifier>,
    ) -> Self {
        Self {
            config,
            catalog,
            store,
            notifier,
        }
    }

    pub fn builder() -> crate::AdminConsoleBuilder {
        crate::AdminConsoleBuilder::new()
    }

    pub fn config(&self) -> &AdminConfig {
        &self.config
    }

    pub fn catalog(&self) -> &PropertyCatalog {
        &self.catalog
    }

    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ArtifactStore {
        &mut self.store
    }

    /// Change events emitted after each successful save
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.notifier.subscribe()
    }

    /// Enabled rules, cards and presentations for `object_type` whose
    /// conditions match `record`
    pub fn applicable(&self, object_type: &str, record: &Record) -> Applicable<'_> {
        let applicable = Applicable {
            rules: MatchEvaluator::select_rules(
                self.store
                    .rules()
                    .iter()
                    .filter(|r| r.object_type() == object_type),
                record,
            ),
            cards: MatchEvaluator::select(
                self.store
                    .cards()
                    .iter()
                    .filter(|c| c.object_type() == object_type),
                record,
            ),
            presentations: MatchEvaluator::select(
                self.store
                    .presentations()
                    .iter()
                    .filter(|p| p.object_type() == object_type),
                record,
            ),
        };

        debug!(
            object_type,
            rules = applicable.rules.len(),
            cards = applicable.cards.len(),
            presentations = applicable.presentations.len(),
            "applicable artifacts selected"
        );
        applicable
    }

    /// Evaluate a condition set against a sample record, with the per-condition trace
    pub fn preview(&self, conditions: &ConditionSet, record: &Record) -> (bool, Vec<ConditionTrace>) {
        MatchEvaluator::evaluate_with_trace(conditions, record)
    }

    /// Label each condition from the object type's catalog.
    ///
    /// Conditions on properties the catalog does not know are kept with an
    /// empty label.
    pub async fn describe_conditions(
        &self,
        object_type: &str,
        conditions: &ConditionSet,
    ) -> Result<Vec<ConditionSummary>> {
        let properties = self.catalog.fetch(object_type).await?;

        Ok(conditions
            .resolve(&properties)
            .into_iter()
            .map(|resolved| ConditionSummary {
                property: resolved.condition.property.clone(),
                label: resolved.label.to_string(),
                operator: resolved.condition.operator.label(),
                value: resolved
                    .value_label
                    .or(resolved.condition.value())
                    .map(str::to_string),
            })
            .collect())
    }

    /// Create a glossary entry from a catalog property and its options
    pub async fn seed_glossary_entry(
        &mut self,
        object_type: &str,
        property: &str,
    ) -> Result<GlossaryEntry> {
        let definition = self
            .catalog
            .find(object_type, property)
            .await?
            .ok_or_else(|| SdkError::UnknownProperty {
                object_type: object_type.to_string(),
                property: property.to_string(),
            })?;

        let entry = self
            .store
            .create(GlossaryEntry::from_property(object_type, &definition))
            .await?;
        info!(object_type, property, id = %entry.meta.id, "glossary entry seeded from property");
        Ok(entry)
    }

    /// Drop cached property metadata after the operator clears credentials
    pub async fn clear_credentials(&self) {
        self.catalog.clear().await;
    }

    /// Export document as pretty JSON
    pub fn export_json(&self) -> Result<String> {
        Ok(self.store.export().to_json()?)
    }

    pub async fn import_json(&mut self, json: &str) -> Result<ImportSummary> {
        let doc = ImportDocument::from_json(json)?;
        Ok(self.store.import(doc).await?)
    }
}
