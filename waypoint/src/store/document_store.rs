use crate::collection::Collection;
use crate::errors::WaypointResult;
use std::ops::Deref;
use std::sync::Arc;

/// A namespace of collections: the unit the tiering policy treats as one
/// tier.
///
/// Implementations resolve a logical namespace (`"users"`, `"roadmaps"`)
/// to a [Collection]. Resolving may fail, for example when an external
/// database cannot be reached; the policy treats that exactly like a failure
/// of the operation itself.
pub trait DocumentStoreProvider: Send + Sync {
    /// Returns the collection for `name`, creating it on first use if the
    /// store supports that.
    fn collection(&self, name: &str) -> WaypointResult<Collection>;

    /// Short description for logs (`"memory"`, `"detached(mongodb://...)"`).
    fn describe(&self) -> String;
}

/// A shareable handle to a document store.
#[derive(Clone)]
pub struct DocumentStore {
    inner: Arc<dyn DocumentStoreProvider>,
}

impl DocumentStore {
    pub fn new<T: DocumentStoreProvider + 'static>(inner: T) -> Self {
        DocumentStore {
            inner: Arc::new(inner),
        }
    }
}

impl Deref for DocumentStore {
    type Target = Arc<dyn DocumentStoreProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
