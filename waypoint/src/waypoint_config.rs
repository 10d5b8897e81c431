//! Configuration of the persistence tiers.

use crate::errors::{ErrorKind, WaypointError, WaypointResult};
use crate::store::{DetachedStore, DocumentStore, MemoryStore};

/// Settings that decide what the primary tier is.
///
/// Both inputs are supplied by the host (environment, command line, ...);
/// they are taken as given and never parsed here.
///
/// The primary tier is resolved in this order:
/// 1. an explicitly plugged-in store ([WaypointConfig::set_primary_store]);
/// 2. an in-memory store, when `use_fallback_store` is set;
/// 3. a [DetachedStore] for `primary_endpoint`, which reports every
///    operation as unavailable.
///
/// The secondary tier is not configurable: it is always a fresh
/// [MemoryStore].
#[derive(Clone, Default)]
pub struct WaypointConfig {
    use_fallback_store: bool,
    primary_endpoint: Option<String>,
    primary_store: Option<DocumentStore>,
}

impl WaypointConfig {
    pub fn new() -> Self {
        WaypointConfig::default()
    }

    pub fn use_fallback_store(&self) -> bool {
        self.use_fallback_store
    }

    pub fn set_use_fallback_store(&mut self, use_fallback_store: bool) {
        self.use_fallback_store = use_fallback_store;
    }

    pub fn primary_endpoint(&self) -> Option<&str> {
        self.primary_endpoint.as_deref()
    }

    /// Sets the primary database endpoint; a blank endpoint is rejected.
    pub fn set_primary_endpoint(&mut self, endpoint: &str) -> WaypointResult<()> {
        if endpoint.trim().is_empty() {
            log::error!("Primary store endpoint cannot be empty");
            return Err(WaypointError::new(
                "Primary store endpoint cannot be empty",
                ErrorKind::ConfigError,
            ));
        }
        self.primary_endpoint = Some(endpoint.to_string());
        Ok(())
    }

    pub fn set_primary_store(&mut self, store: DocumentStore) {
        self.primary_store = Some(store);
    }

    /// Resolves the primary tier.
    pub fn primary(&self) -> DocumentStore {
        if let Some(store) = &self.primary_store {
            return store.clone();
        }
        if self.use_fallback_store {
            log::info!("Using in-memory store as primary");
            return DocumentStore::new(MemoryStore::new());
        }
        match &self.primary_endpoint {
            Some(endpoint) => log::warn!(
                "No adapter for primary store at {}; all operations use the secondary store",
                endpoint
            ),
            None => log::warn!("No primary store configured; all operations use the secondary store"),
        }
        DocumentStore::new(DetachedStore::new(self.primary_endpoint.clone()))
    }

    /// Creates the secondary tier.
    pub fn secondary(&self) -> DocumentStore {
        DocumentStore::new(MemoryStore::new())
    }
}
