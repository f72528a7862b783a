//! Trigger index construction

use beacon_core::{Artifact, GlossaryEntry};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Canonical trigger form: trimmed and lowercased, nothing else
pub fn normalize_trigger(s: &str) -> String {
    s.trim().to_lowercase()
}

/// A trigger claimed by more than one entry during a build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerCollision {
    pub trigger: String,
    /// Entry that held the trigger before
    pub replaced: String,
    /// Entry that holds it now
    pub winner: String,
}

/// Normalized trigger lookup over the enabled glossary entries
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerIndex {
    /// Normalized trigger -> entry id
    pub term_map: HashMap<String, String>,

    /// Entry id -> entry snapshot, for every enabled entry
    pub entries_by_id: HashMap<String, GlossaryEntry>,

    /// Build stamp (milliseconds); increases with every rebuild
    pub version: i64,

    /// Collisions seen while building; not persisted
    #[serde(skip)]
    pub collisions: Vec<TriggerCollision>,
}

impl TriggerIndex {
    /// Entry for a trigger, in any case or padding
    pub fn lookup(&self, trigger: &str) -> Option<&GlossaryEntry> {
        let id = self.term_map.get(&normalize_trigger(trigger))?;
        self.entries_by_id.get(id)
    }

    pub fn entry(&self, id: &str) -> Option<&GlossaryEntry> {
        self.entries_by_id.get(id)
    }

    pub fn trigger_count(&self) -> usize {
        self.term_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.term_map.is_empty() && self.entries_by_id.is_empty()
    }
}

/// Compiles glossary entries into a [`TriggerIndex`]
pub struct TriggerIndexBuilder;

impl TriggerIndexBuilder {
    /// Build the index from `entries` in collection order.
    ///
    /// - disabled entries are left out entirely
    /// - an entry with a blank term adds no triggers (its aliases included)
    ///   but stays retrievable by id
    /// - when two entries share a normalized trigger, the later one wins
    pub fn build(entries: &[GlossaryEntry], version: i64) -> TriggerIndex {
        let mut index = TriggerIndex {
            version,
            ..Default::default()
        };

        for entry in entries.iter().filter(|e| e.enabled) {
            let id = entry.id().to_string();
            index.entries_by_id.insert(id.clone(), entry.clone());

            if entry.term.trim().is_empty() {
                debug!(entry = %id, "glossary entry has no term, not indexed");
                continue;
            }

            for trigger in entry.triggers().map(normalize_trigger) {
                if trigger.is_empty() {
                    continue;
                }
                if let Some(previous) = index.term_map.insert(trigger.clone(), id.clone()) {
                    if previous != id {
                        warn!(
                            trigger = %trigger,
                            replaced = %previous,
                            winner = %id,
                            "duplicate glossary trigger, later entry wins"
                        );
                        index.collisions.push(TriggerCollision {
                            trigger,
                            replaced: previous,
                            winner: id.clone(),
                        });
                    }
                }
            }
        }

        debug!(
            entries = index.entries_by_id.len(),
            triggers = index.term_map.len(),
            collisions = index.collisions.len(),
            version,
            "trigger index built"
        );
        index
    }
}
