//! Builder pattern for AdminConsole

use crate::config::AdminConfig;
use crate::console::AdminConsole;
use crate::error::Result;
use beacon_repository::{ArtifactStore, BroadcastNotifier, Clock, IdGenerator, KeyValueStore, SystemClock};
use beacon_runtime::{PropertyCatalog, PropertyProvider, StaticPropertyProvider};
use std::sync::Arc;
use tracing::info;

/// Builder for AdminConsole
///
/// # Example
///
/// ```rust,ignore
/// use beacon_sdk::{AdminConfig, AdminConsoleBuilder};
///
/// let console = AdminConsoleBuilder::new()
///     .with_config(AdminConfig::load()?)
///     .with_provider(crm_provider)
///     .build()
///     .await?;
/// ```
pub struct AdminConsoleBuilder {
    config: AdminConfig,
    provider: Option<Arc<dyn PropertyProvider>>,
    store: Option<Arc<dyn KeyValueStore>>,
    clock: Option<Arc<dyn Clock>>,
    id_generator: Option<Arc<dyn IdGenerator>>,
}

impl AdminConsoleBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: AdminConfig::default(),
            provider: None,
            store: None,
            clock: None,
            id_generator: None,
        }
    }

    pub fn with_config(mut self, config: AdminConfig) -> Self {
        self.config = config;
        self
    }

    /// Source of CRM property metadata.
    ///
    /// Without one, every catalog fetch fails with missing credentials.
    pub fn with_provider(mut self, provider: Arc<dyn PropertyProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Key/value store to persist into, overriding `config.storage`
    pub fn with_store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Id generator, overriding `config.id_strategy`
    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.id_generator = Some(ids);
        self
    }

    /// Wire everything together and load the stored artifacts
    pub async fn build(self) -> Result<AdminConsole> {
        let config = self.config;

        let provider = self.provider.unwrap_or_else(|| {
            Arc::new(StaticPropertyProvider::new().without_credentials()) as Arc<dyn PropertyProvider>
        });
        let catalog = PropertyCatalog::new(provider).with_timeout(config.provider_timeout());

        let backend = self
            .store
            .unwrap_or_else(|| config.storage.key_value_store());
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock) as Arc<dyn Clock>);
        let ids = self
            .id_generator
            .unwrap_or_else(|| config.id_strategy.generator(clock.clone()));
        let notifier = Arc::new(BroadcastNotifier::new(config.notification_capacity));

        let mut store = ArtifactStore::new(backend)
            .with_clock(clock)
            .with_id_generator(ids)
            .with_notifier(notifier.clone())
            .with_timeout(config.persistence_timeout());
        store.load().await?;

        info!(
            storage = ?config.storage,
            id_strategy = ?config.id_strategy,
            "admin console ready"
        );

        Ok(AdminConsole::new(config, catalog, store, notifier))
    }
}

impl Default for AdminConsoleBuilder {
    fn default() -> Self {
        Self::new()
    }
}
