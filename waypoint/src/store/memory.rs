use super::DocumentStoreProvider;
use crate::collection::{Collection, MemoryCollection};
use crate::errors::WaypointResult;
use dashmap::DashMap;
use std::sync::Arc;

/// In-memory document store.
///
/// # Purpose
/// Backs both the emulated primary tier (when the host switches to the
/// fallback store instead of a real database) and the process-local
/// secondary tier. Collections are created lazily, one per namespace, and
/// live as long as the store. Nothing is persisted beyond the process.
///
/// # Characteristics
/// - **Thread-Safe**: namespaces live in a `DashMap`, documents behind a
///   per-collection lock
/// - **Shared**: clones of the store, and every `Collection` handed out for
///   the same namespace, observe the same documents
#[derive(Clone, Default)]
pub struct MemoryStore {
    collections: Arc<DashMap<String, MemoryCollection>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            collections: Arc::new(DashMap::new()),
        }
    }

    /// Direct access to a namespace's collection, creating it if needed.
    pub fn memory_collection(&self, name: &str) -> MemoryCollection {
        self.collections
            .entry(name.to_string())
            .or_insert_with(|| {
                log::debug!("Creating in-memory collection '{}'", name);
                MemoryCollection::new(name)
            })
            .clone()
    }

    /// Whether a namespace has been created.
    pub fn has_collection(&self, name: &str) -> bool {
        self.collections.contains_key(name)
    }

    /// Names of the namespaces created so far.
    pub fn collection_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.collections.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }
}

impl DocumentStoreProvider for MemoryStore {
    fn collection(&self, name: &str) -> WaypointResult<Collection> {
        Ok(Collection::new(self.memory_collection(name)))
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
