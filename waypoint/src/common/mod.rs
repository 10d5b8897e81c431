//! Common types shared by the store, the tiering policy and the typed records.

mod constants;
mod convertible;
mod value;

pub use constants::*;
pub use convertible::*;
pub use value::*;
