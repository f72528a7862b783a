//! Admin settings
//!
//! Settings are an open key/value document. Updates and imports merge keys
//! into the current document rather than replacing it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Settings document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings(Map<String, JsonValue>);

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults written on first run
    pub fn defaults() -> Self {
        let mut settings = Settings::new();
        settings.set("showRules", true);
        settings.set("showCards", true);
        settings.set("showPresentations", true);
        settings.set("highlightGlossary", true);
        settings
    }

    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.0.get(key)
    }

    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.0.get(key).and_then(JsonValue::as_bool).unwrap_or(default)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<JsonValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Overlay every key of `other` onto this document
    pub fn merge(&mut self, other: Settings) {
        for (key, value) in other.0 {
            self.0.insert(key, value);
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
