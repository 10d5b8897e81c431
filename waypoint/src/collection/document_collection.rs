use super::Document;
use crate::errors::WaypointResult;
use crate::filter::Filter;
use crate::update::Update;
use std::ops::Deref;
use std::sync::Arc;

/// Outcome of [DocumentCollectionProvider::update_one].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct UpdateResult {
    modified_count: u64,
}

impl UpdateResult {
    pub fn new(modified_count: u64) -> Self {
        UpdateResult { modified_count }
    }

    /// `1` if a document was found and at least one leaf written, else `0`.
    pub fn modified_count(&self) -> u64 {
        self.modified_count
    }
}

/// Trait defining the interface of a collection store.
///
/// Implemented by the emulated [super::MemoryCollection] and by adapters to
/// external databases. "Not found" is never an error: absence is reported as
/// `None` or a modified count of `0`. Any error an implementation returns is
/// a transport or validation failure and is left to the caller (the tiering
/// policy) to recover from.
pub trait DocumentCollectionProvider: Send + Sync {
    /// Returns the first document, in collection order, matching the filter.
    fn find_one(&self, filter: &Filter) -> WaypointResult<Option<Document>>;

    /// Appends a document unconditionally and returns it. No identifier is
    /// assigned and no uniqueness is enforced.
    fn insert_one(&self, document: Document) -> WaypointResult<Document>;

    /// Overwrites the first document matching the plain-equality filter, or
    /// appends `document` when none matches.
    fn replace_one(&self, filter: &Filter, document: Document) -> WaypointResult<()>;

    /// Applies `update` to the first document matching the filter.
    fn update_one(&self, filter: &Filter, update: &Update) -> WaypointResult<UpdateResult>;

    /// Number of documents in the collection.
    fn size(&self) -> WaypointResult<usize>;

    /// Returns the name of this collection.
    fn name(&self) -> String;
}

/// A shareable handle to a collection store.
///
/// All clones refer to the same underlying collection.
///
/// ```rust
/// use waypoint::collection::{Collection, MemoryCollection};
/// use waypoint::doc;
/// use waypoint::filter::field;
///
/// let users = Collection::new(MemoryCollection::new("users"));
/// users.insert_one(doc! { email: "a@b.com" }).unwrap();
/// assert!(users.find_one(&field("email").eq("a@b.com")).unwrap().is_some());
/// ```
#[derive(Clone)]
pub struct Collection {
    inner: Arc<dyn DocumentCollectionProvider>,
}

impl Collection {
    pub fn new<T: DocumentCollectionProvider + 'static>(inner: T) -> Self {
        Collection {
            inner: Arc::new(inner),
        }
    }
}

impl Deref for Collection {
    type Target = Arc<dyn DocumentCollectionProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
