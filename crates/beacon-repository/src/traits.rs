//! Key/value store seam
//!
//! Artifacts persist through a scoped key/value store: one JSON value per
//! well-known key (see [`crate::keys`]). Reads take a map of defaults and
//! answer with the stored value for each key, or the default when the key
//! was never written.
//!
//! # Examples
//!
//! ```
//! use beacon_repository::{KeyValueStore, MemoryStore, StoreMap};
//! use serde_json::json;
//!
//! # #[tokio::main]
//! # async fn main() -> beacon_repository::RepositoryResult<()> {
//! let store = MemoryStore::new();
//!
//! let mut items = StoreMap::new();
//! items.insert("rules".to_string(), json!([]));
//! store.set(items).await?;
//!
//! let mut defaults = StoreMap::new();
//! defaults.insert("rules".to_string(), json!(null));
//! defaults.insert("cards".to_string(), json!([]));
//! let values = store.get(defaults).await?;
//!
//! assert_eq!(values["rules"], json!([]));
//! assert_eq!(values["cards"], json!([]));
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use serde_json::{Map, Value as JsonValue};

use crate::RepositoryResult;

/// Key -> JSON value map exchanged with a store
pub type StoreMap = Map<String, JsonValue>;

/// Scoped key/value persistence
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Stored value for every key of `defaults`, falling back to the default
    async fn get(&self, defaults: StoreMap) -> RepositoryResult<StoreMap>;

    /// Write every key of `items` in one operation
    async fn set(&self, items: StoreMap) -> RepositoryResult<()>;
}

/// Overlay stored values onto `defaults`
pub(crate) fn resolve(stored: &StoreMap, defaults: StoreMap) -> StoreMap {
    defaults
        .into_iter()
        .map(|(key, default)| {
            let value = stored.get(&key).cloned().unwrap_or(default);
            (key, value)
        })
        .collect()
}
