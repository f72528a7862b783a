//! Property provider seam
//!
//! The real provider is an authenticated proxy to the CRM vendor's API and
//! lives outside this workspace. [`StaticPropertyProvider`] serves fixed
//! definitions for tests and demos.

use crate::error::{ProviderError, Result};
use async_trait::async_trait;
use beacon_core::PropertyDefinition;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Source of CRM property metadata
#[async_trait]
pub trait PropertyProvider: Send + Sync {
    /// Fetch every property definition for an object type
    async fn fetch_properties(&self, object_type: &str) -> Result<Vec<PropertyDefinition>>;
}

/// In-memory provider with call counting and scripted failures
#[derive(Default)]
pub struct StaticPropertyProvider {
    properties: HashMap<String, Vec<PropertyDefinition>>,
    has_credentials: bool,
    delay: Option<Duration>,
    failures: Mutex<Vec<ProviderError>>,
    calls: AtomicUsize,
}

impl StaticPropertyProvider {
    pub fn new() -> Self {
        Self {
            has_credentials: true,
            ..Default::default()
        }
    }

    /// Serve `properties` for `object_type`
    pub fn with_properties(
        mut self,
        object_type: impl Into<String>,
        properties: Vec<PropertyDefinition>,
    ) -> Self {
        self.properties.insert(object_type.into(), properties);
        self
    }

    /// Simulate a provider with no credentials configured
    pub fn without_credentials(mut self) -> Self {
        self.has_credentials = false;
        self
    }

    /// Wait before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Fail the next call with `error`; queued failures are used in order
    pub fn fail_next(&self, error: ProviderError) {
        if let Ok(mut failures) = self.failures.lock() {
            failures.push(error);
        }
    }

    /// Number of fetches served so far, failed ones included
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn take_failure(&self) -> Option<ProviderError> {
        let mut failures = self.failures.lock().ok()?;
        if failures.is_empty() {
            None
        } else {
            Some(failures.remove(0))
        }
    }
}

#[async_trait]
impl PropertyProvider for StaticPropertyProvider {
    async fn fetch_properties(&self, object_type: &str) -> Result<Vec<PropertyDefinition>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if !self.has_credentials {
            return Err(ProviderError::MissingCredentials);
        }
        if let Some(err) = self.take_failure() {
            return Err(err);
        }

        self.properties
            .get(object_type)
            .cloned()
            .ok_or_else(|| ProviderError::Request(format!("unknown object type '{}'", object_type)))
    }
}
