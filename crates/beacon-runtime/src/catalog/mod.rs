//! Property catalog
//!
//! Caches property definitions per object type for the catalog's lifetime.
//! A cached object type is never fetched again until the cache is cleared
//! explicitly (credentials changed); there is no time-based expiry.
//!
//! # Examples
//!
//! ```
//! use beacon_core::{PropertyDefinition, PropertyType};
//! use beacon_runtime::{PropertyCatalog, StaticPropertyProvider};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), beacon_runtime::ProviderError> {
//! let provider = Arc::new(StaticPropertyProvider::new().with_properties(
//!     "deals",
//!     vec![PropertyDefinition::new("amount", "Amount", PropertyType::Number)],
//! ));
//! let catalog = PropertyCatalog::new(provider.clone());
//!
//! catalog.fetch("deals").await?;
//! catalog.fetch("deals").await?; // cache hit
//! assert_eq!(provider.calls(), 1);
//! # Ok(())
//! # }
//! ```

mod provider;

pub use provider::{PropertyProvider, StaticPropertyProvider};

use crate::error::{ProviderError, Result};
use beacon_core::PropertyDefinition;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Default timeout for a provider fetch
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);

/// Catalog hit/miss statistics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogStats {
    pub hits: u64,
    pub misses: u64,
    /// Provider calls that failed or timed out
    pub failures: u64,
    /// Object types currently cached
    pub cached_object_types: usize,
}

impl CatalogStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Per-object-type property metadata cache
pub struct PropertyCatalog {
    provider: Arc<dyn PropertyProvider>,
    cache: RwLock<HashMap<String, Arc<Vec<PropertyDefinition>>>>,
    stats: RwLock<CatalogStats>,
    /// Bumped by `clear`/`invalidate`; fetches started before a bump are not cached
    generation: AtomicU64,
    timeout: Duration,
}

impl PropertyCatalog {
    pub fn new(provider: Arc<dyn PropertyProvider>) -> Self {
        Self {
            provider,
            cache: RwLock::new(HashMap::new()),
            stats: RwLock::new(CatalogStats::default()),
            generation: AtomicU64::new(0),
            timeout: DEFAULT_PROVIDER_TIMEOUT,
        }
    }

    /// Bound every provider call by `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Property definitions for `object_type`, fetched once and then cached.
    ///
    /// Failures are not cached; the next call retries the provider.
    pub async fn fetch(&self, object_type: &str) -> Result<Arc<Vec<PropertyDefinition>>> {
        let hit = self.cache.read().await.get(object_type).cloned();
        if let Some(cached) = hit {
            self.stats.write().await.hits += 1;
            debug!(object_type, "property catalog hit");
            return Ok(cached);
        }
        self.stats.write().await.misses += 1;
        let generation = self.generation.load(Ordering::SeqCst);

        let fetched = match tokio::time::timeout(
            self.timeout,
            self.provider.fetch_properties(object_type),
        )
        .await
        {
            Ok(Ok(properties)) => properties,
            Ok(Err(e)) => return Err(self.record_failure(object_type, e).await),
            Err(_) => {
                let e = ProviderError::Timeout(self.timeout);
                return Err(self.record_failure(object_type, e).await);
            }
        };

        info!(object_type, count = fetched.len(), "fetched property definitions");

        let mut cache = self.cache.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(object_type, "catalog cleared during fetch, result not cached");
            return Ok(Arc::new(fetched));
        }

        // A concurrent fetch may have filled the slot first; keep that one.
        let entry = cache
            .entry(object_type.to_string())
            .or_insert_with(|| Arc::new(fetched))
            .clone();
        self.stats.write().await.cached_object_types = cache.len();
        Ok(entry)
    }

    async fn record_failure(&self, object_type: &str, error: ProviderError) -> ProviderError {
        warn!(object_type, error = %error, "property fetch failed");
        self.stats.write().await.failures += 1;
        error
    }

    /// Cached definitions without touching the provider
    pub async fn cached(&self, object_type: &str) -> Option<Arc<Vec<PropertyDefinition>>> {
        self.cache.read().await.get(object_type).cloned()
    }

    /// Find one property by name, fetching the object type if needed
    pub async fn find(&self, object_type: &str, name: &str) -> Result<Option<PropertyDefinition>> {
        let properties = self.fetch(object_type).await?;
        Ok(properties.iter().find(|p| p.name == name).cloned())
    }

    /// Drop one object type from the cache
    pub async fn invalidate(&self, object_type: &str) {
        let mut cache = self.cache.write().await;
        self.generation.fetch_add(1, Ordering::SeqCst);
        cache.remove(object_type);
        self.stats.write().await.cached_object_types = cache.len();
    }

    /// Drop everything; called when the operator clears credentials
    pub async fn clear(&self) {
        let mut cache = self.cache.write().await;
        self.generation.fetch_add(1, Ordering::SeqCst);
        let dropped = cache.len();
        cache.clear();
        self.stats.write().await.cached_object_types = 0;
        info!(dropped, "property catalog cleared");
    }

    pub async fn stats(&self) -> CatalogStats {
        self.stats.read().await.clone()
    }
}
