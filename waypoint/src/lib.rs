//! # Waypoint - Tiered Document Store for Career Roadmaps
//!
//! Waypoint persists users and their week-by-week career roadmaps in a small
//! MongoDB-like document store, and keeps working when the primary database
//! is down by degrading to a process-local secondary store.
//!
//! ## Key Features
//!
//! - **Embedded collection**: ordered documents with `find_one`, `insert_one`,
//!   `replace_one` (upsert on miss) and `update_one` with a positional array
//!   update
//! - **Closed query model**: filters and updates are explicit variants, not
//!   stringly-typed paths; MongoDB-shaped descriptors are converted at the edge
//! - **Tiering**: every access tries the primary store and falls back to the
//!   secondary store according to an explicit decision table
//! - **Typed records**: application code sees `User` and `Roadmap`, never raw
//!   documents
//!
//! ## Quick Start
//!
//! ```rust
//! use waypoint::model::UserProfile;
//! use waypoint::service::simulated_roadmap;
//! use waypoint::WaypointBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // no database adapter: everything lands in the secondary store
//! let repository = WaypointBuilder::new()
//!     .primary_endpoint("mongodb://localhost:27017")
//!     .open()?;
//!
//! let profile = UserProfile::new("Backend Engineer", "3 months");
//! repository.save_roadmap("a@b.com", simulated_roadmap(&profile))?;
//! repository.update_progress("a@b.com", 2, true)?;
//!
//! let roadmap = repository.get_roadmap("a@b.com")?;
//! assert!(roadmap.step(2).unwrap().completed);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`collection`] - Documents and the collection store
//! - [`common`] - Values, record conversion and field names
//! - [`errors`] - Error types and result definitions
//! - [`filter`] - Query filters and the query matcher
//! - [`model`] - Typed records
//! - [`repository`] - The data-access object owning both tiers
//! - [`service`] - Account and roadmap services
//! - [`store`] - Document stores (tiers)
//! - [`tiering`] - The fallback protocol
//! - [`update`] - Update descriptors and the update applier
//! - [`waypoint_builder`] / [`waypoint_config`] - Configuration

pub mod collection;
pub mod common;
pub mod errors;
pub mod filter;
pub mod model;
pub mod repository;
pub mod service;
pub mod store;
pub mod tiering;
pub mod update;
pub mod waypoint_builder;
pub mod waypoint_config;

pub use waypoint_builder::WaypointBuilder;
pub use waypoint_config::WaypointConfig;
