//! The explicitly-owned data-access object.
//!
//! A [Repository] is built once at process start (see
//! [crate::WaypointBuilder]) and handed to every service that touches
//! users or roadmaps. It owns both persistence tiers, so there are no
//! process-wide fallback lists: two repositories never share data unless
//! they were given the same stores.
//!
//! Every method routes through [crate::tiering::TieredStore::execute] with
//! the [crate::tiering::AccessPath] of the call site:
//!
//! | method              | path   | primary absence falls back? |
//! |---------------------|--------|-----------------------------|
//! | `register_user`     | Write  | n/a                         |
//! | `save_roadmap`      | Write  | n/a                         |
//! | `find_user`         | Read   | yes                         |
//! | `find_user_by_id`   | Read   | yes                         |
//! | `get_roadmap`       | Read   | yes                         |
//! | `update_progress`   | Update | yes (`modified_count == 0`) |

mod repository;

pub use repository::*;
