//! In-memory key/value store

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::traits::{resolve, KeyValueStore, StoreMap};
use crate::RepositoryResult;

/// Key/value store held in process memory
///
/// Used by tests and by the preview console when no file is configured.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<StoreMap>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing contents
    pub fn with_data(data: StoreMap) -> Self {
        Self {
            data: RwLock::new(data),
        }
    }

    /// Copy of everything stored
    pub async fn snapshot(&self) -> StoreMap {
        self.data.read().await.clone()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, defaults: StoreMap) -> RepositoryResult<StoreMap> {
        let data = self.data.read().await;
        Ok(resolve(&data, defaults))
    }

    async fn set(&self, items: StoreMap) -> RepositoryResult<()> {
        let mut data = self.data.write().await;
        data.extend(items);
        Ok(())
    }
}
