use crate::collection::UpdateResult;
use crate::errors::{ErrorKind, WaypointError, WaypointResult};

/// What one tier produced for one operation.
#[derive(Debug)]
pub enum TierOutcome<T> {
    /// The tier satisfied the operation.
    Found(T),
    /// The tier answered, but had nothing: no document for a read, nothing
    /// modified for an update.
    NotFound,
    /// The tier failed while performing the operation.
    Unavailable(WaypointError),
}

/// Separates store failures, which the policy recovers from, from malformed
/// invocations, which are programming errors and must surface immediately.
pub(crate) fn classify(error: WaypointError) -> WaypointResult<WaypointError> {
    if error.kind() == &ErrorKind::MalformedInvocation {
        Err(error)
    } else {
        Ok(error)
    }
}

impl<T> TierOutcome<T> {
    /// Classifies the result of a lookup (`find_one`).
    pub fn lookup(result: WaypointResult<Option<T>>) -> WaypointResult<Self> {
        match result {
            Ok(Some(value)) => Ok(TierOutcome::Found(value)),
            Ok(None) => Ok(TierOutcome::NotFound),
            Err(e) => Ok(TierOutcome::Unavailable(classify(e)?)),
        }
    }

    /// Classifies the result of a write (`insert_one`, `replace_one`).
    pub fn write(result: WaypointResult<T>) -> WaypointResult<Self> {
        match result {
            Ok(value) => Ok(TierOutcome::Found(value)),
            Err(e) => Ok(TierOutcome::Unavailable(classify(e)?)),
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, TierOutcome::Found(_))
    }
}

impl TierOutcome<UpdateResult> {
    /// Classifies the result of an `update_one`; a modified count of `0` is
    /// [TierOutcome::NotFound].
    pub fn update(result: WaypointResult<UpdateResult>) -> WaypointResult<Self> {
        match result {
            Ok(outcome) if outcome.modified_count() > 0 => Ok(TierOutcome::Found(outcome)),
            Ok(_) => Ok(TierOutcome::NotFound),
            Err(e) => Ok(TierOutcome::Unavailable(classify(e)?)),
        }
    }
}
