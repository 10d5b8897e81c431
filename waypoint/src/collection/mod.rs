//! Documents and collection stores.
//!
//! A [Document] is a schema-less mapping from field name to
//! [crate::common::Value]. A collection is an ordered sequence of documents
//! behind the [DocumentCollectionProvider] contract: `find_one`,
//! `insert_one`, `replace_one` (with upsert-on-miss) and `update_one` (with
//! positional array updates).
//!
//! ```rust
//! use waypoint::collection::{Collection, MemoryCollection};
//! use waypoint::doc;
//! use waypoint::filter::{element, field};
//! use waypoint::update::set_element;
//!
//! let roadmaps = Collection::new(MemoryCollection::new("roadmaps"));
//! roadmaps.insert_one(doc! {
//!     user_email: "a@b.com",
//!     steps: [{ week: 1, completed: false }, { week: 2, completed: false }],
//! }).unwrap();
//!
//! let filter = field("user_email").eq("a@b.com").and(element("steps", "week").eq(2));
//! let result = roadmaps.update_one(&filter, &set_element("steps", "completed", true)).unwrap();
//! assert_eq!(result.modified_count(), 1);
//! ```

mod document;
mod document_collection;
mod memory_collection;

pub use document::*;
pub use document_collection::*;
pub use memory_collection::*;
