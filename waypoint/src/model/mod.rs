//! Typed records exchanged with the [crate::repository::Repository].
//!
//! Records are converted to and from [crate::collection::Document] through
//! [crate::common::Convertible]; nothing outside the store handles raw
//! documents.

mod profile;
mod roadmap;
mod user;

pub use profile::*;
pub use roadmap::*;
pub use user::*;
