use super::{Document, DocumentCollectionProvider, UpdateResult};
use crate::errors::{ErrorKind, WaypointError, WaypointResult};
use crate::filter::{Filter, FilterMatch};
use crate::update::Update;
use parking_lot::RwLock;
use std::sync::Arc;

/// In-memory emulation of a MongoDB-like collection.
///
/// Documents are kept in insertion order in a single vector and every lookup
/// is a linear scan; there are no indexes. Each public operation holds the
/// collection lock for its whole duration, so concurrent updates cannot
/// interleave and at most one document is mutated per call.
///
/// Clones share the same documents.
#[derive(Clone)]
pub struct MemoryCollection {
    name: String,
    documents: Arc<RwLock<Vec<Document>>>,
}

impl MemoryCollection {
    pub fn new(name: &str) -> Self {
        MemoryCollection {
            name: name.to_string(),
            documents: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// A snapshot of all documents in collection order.
    pub fn documents(&self) -> Vec<Document> {
        self.documents.read().clone()
    }
}

impl DocumentCollectionProvider for MemoryCollection {
    fn find_one(&self, filter: &Filter) -> WaypointResult<Option<Document>> {
        let documents = self.documents.read();
        for document in documents.iter() {
            if filter.apply(document)?.is_match() {
                return Ok(Some(document.clone()));
            }
        }
        Ok(None)
    }

    fn insert_one(&self, document: Document) -> WaypointResult<Document> {
        let mut documents = self.documents.write();
        documents.push(document.clone());
        log::debug!("Inserted document into '{}' ({} total)", self.name, documents.len());
        Ok(document)
    }

    fn replace_one(&self, filter: &Filter, document: Document) -> WaypointResult<()> {
        filter.validate()?;
        if filter.array_clause().is_some() {
            log::error!("replace_one on '{}' called with array filter {}", self.name, filter);
            return Err(WaypointError::new(
                "replace_one only supports plain equality filters",
                ErrorKind::MalformedInvocation,
            ));
        }

        let mut documents = self.documents.write();
        for slot in documents.iter_mut() {
            if filter.apply(slot)?.is_match() {
                *slot = document;
                log::debug!("Replaced document matching {} in '{}'", filter, self.name);
                return Ok(());
            }
        }

        documents.push(document);
        log::debug!("No document matched {} in '{}', appended", filter, self.name);
        Ok(())
    }

    fn update_one(&self, filter: &Filter, update: &Update) -> WaypointResult<UpdateResult> {
        filter.validate()?;
        update.validate(filter)?;

        let mut documents = self.documents.write();
        for document in documents.iter_mut() {
            if let FilterMatch::Matched { element } = filter.apply(document)? {
                let modified = update.apply(document, element)?;
                log::debug!(
                    "Applied {} to document matching {} in '{}' (modified {})",
                    update,
                    filter,
                    self.name,
                    modified
                );
                return Ok(UpdateResult::new(modified));
            }
        }
        Ok(UpdateResult::new(0))
    }

    fn size(&self) -> WaypointResult<usize> {
        Ok(self.documents.read().len())
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}
