//! Query filters for selecting documents from collections.
//!
//! A [Filter] is a conjunction of equality clauses. Two clause shapes exist:
//!
//! - `field("email").eq("a@b.com")` - exact equality on a top-level field
//! - `element("steps", "week").eq(3)` - array membership: some element of the
//!   `steps` array has `week == 3`. The first such element is remembered so a
//!   positional update can target it.
//!
//! There are no comparison, pattern or logical operators beyond `and`.
//! MongoDB-shaped descriptors such as `{"user_email": ..., "steps.week": 3}`
//! can be converted with [Filter::from_document].
//!
//! ```rust
//! use waypoint::doc;
//! use waypoint::filter::{element, field};
//!
//! let roadmap = doc! { user_email: "a@b.com", steps: [{ week: 1 }, { week: 2 }] };
//! let filter = field("user_email").eq("a@b.com").and(element("steps", "week").eq(2));
//! assert_eq!(filter.apply(&roadmap).unwrap().element(), Some(1));
//! ```

mod descriptor;
mod filter;
mod fluent;

pub use filter::*;
pub use fluent::*;
