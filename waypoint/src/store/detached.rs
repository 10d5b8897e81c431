use super::DocumentStoreProvider;
use crate::collection::Collection;
use crate::errors::{ErrorKind, WaypointError, WaypointResult};

/// A primary store that is configured but cannot be reached.
///
/// Stands in for an external database endpoint with no adapter attached (or
/// no endpoint at all). Every collection lookup fails with
/// [ErrorKind::PrimaryUnavailable], so every operation routed through the
/// tiering policy degrades to the secondary store.
#[derive(Clone, Debug)]
pub struct DetachedStore {
    endpoint: Option<String>,
}

impl DetachedStore {
    pub fn new(endpoint: Option<String>) -> Self {
        DetachedStore { endpoint }
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }
}

impl DocumentStoreProvider for DetachedStore {
    fn collection(&self, name: &str) -> WaypointResult<Collection> {
        let message = match &self.endpoint {
            Some(endpoint) => format!(
                "Primary store at '{}' is not reachable; collection '{}' unavailable",
                endpoint, name
            ),
            None => format!(
                "No primary store endpoint configured; collection '{}' unavailable",
                name
            ),
        };
        Err(WaypointError::new(&message, ErrorKind::PrimaryUnavailable))
    }

    fn describe(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => format!("detached({})", endpoint),
            None => "detached".to_string(),
        }
    }
}
