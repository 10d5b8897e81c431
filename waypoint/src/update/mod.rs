//! `$set`-style update descriptors and the logic applying them.
//!
//! Two assignment shapes exist: [set] overwrites a top-level field and
//! [set_element] overwrites a leaf of the single array element selected by
//! the filter's array-membership clause (the MongoDB `array.$.leaf` form).

mod descriptor;
mod update;

pub use update::*;
