//! Document stores: namespaces of collections that form one persistence tier.
//!
//! - [MemoryStore] - in-process store; backs the emulated primary tier and
//!   the secondary tier
//! - [DetachedStore] - a primary that is configured but unreachable
//!
//! Adapters to external databases implement [DocumentStoreProvider].

mod detached;
mod document_store;
mod memory;

pub use detached::*;
pub use document_store::*;
pub use memory::*;
