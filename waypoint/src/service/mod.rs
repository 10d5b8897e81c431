//! Application services over a [crate::repository::Repository].
//!
//! Token signing, password storage format, roadmap text generation and link
//! search are collaborators behind traits ([TokenIssuer], [PasswordHasher],
//! [RoadmapGenerator], [LinkSearch]) so hosts can plug in their own.

mod account;
mod planning;
mod roadmap;
mod security;

pub use account::*;
pub use planning::*;
pub use roadmap::*;
pub use security::{AccessToken, Argon2PasswordHasher, PasswordHasher, TokenIssuer};
