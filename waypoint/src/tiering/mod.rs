//! Primary/secondary persistence tiering.
//!
//! Every data access is attempted on the primary store (an external database
//! or the emulated in-memory one) and, depending on the access path and the
//! outcome, retried on a process-local secondary store. Each attempt yields
//! a [TierOutcome]; [decide] turns it into a [FallbackDecision];
//! [TieredStore::execute] runs the resulting state machine
//! (`TryPrimary -> TrySecondary -> Success | Fail`).

mod outcome;
mod policy;

pub use outcome::TierOutcome;
pub use policy::*;
