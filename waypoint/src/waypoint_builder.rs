use crate::errors::{WaypointError, WaypointResult};
use crate::repository::Repository;
use crate::store::{DocumentStore, DocumentStoreProvider};
use crate::tiering::TieredStore;
use crate::waypoint_config::WaypointConfig;

/// Fluent construction of a [Repository].
///
/// The first invalid setting is remembered and returned by
/// [WaypointBuilder::open]; later settings are ignored.
///
/// ```rust
/// use waypoint::WaypointBuilder;
///
/// let repository = WaypointBuilder::new()
///     .use_fallback_store(true)
///     .open()
///     .unwrap();
/// assert_eq!(repository.tiers().primary().describe(), "memory");
/// ```
#[derive(Default)]
pub struct WaypointBuilder {
    error: Option<WaypointError>,
    config: WaypointConfig,
}

impl WaypointBuilder {
    pub fn new() -> Self {
        WaypointBuilder {
            error: None,
            config: WaypointConfig::new(),
        }
    }

    /// Uses an in-memory store as the primary tier instead of a database.
    pub fn use_fallback_store(mut self, use_fallback_store: bool) -> Self {
        if self.error.is_none() {
            self.config.set_use_fallback_store(use_fallback_store);
        }
        self
    }

    pub fn primary_endpoint(mut self, endpoint: &str) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.config.set_primary_endpoint(endpoint) {
                self.error = Some(e);
            }
        }
        self
    }

    /// Plugs in an adapter for the primary tier.
    pub fn primary_store<T: DocumentStoreProvider + 'static>(mut self, store: T) -> Self {
        if self.error.is_none() {
            self.config.set_primary_store(DocumentStore::new(store));
        }
        self
    }

    pub fn config(&self) -> &WaypointConfig {
        &self.config
    }

    /// Builds the repository, or returns the first configuration error.
    pub fn open(self) -> WaypointResult<Repository> {
        if let Some(error) = self.error {
            return Err(error);
        }
        let tiers = TieredStore::new(self.config.primary(), self.config.secondary());
        log::debug!(
            "Opened repository with primary {} and secondary {}",
            tiers.primary().describe(),
            tiers.secondary().describe()
        );
        Ok(Repository::with_tiers(tiers))
    }
}
