use super::outcome::classify;
use super::TierOutcome;
use crate::collection::Collection;
use crate::errors::{ErrorKind, WaypointError, WaypointResult};
use crate::store::DocumentStore;
use std::fmt::Display;

/// The kind of data access a call site performs.
///
/// The fallback trigger differs per kind: reads and updates consult the
/// secondary tier when the primary fails *or* has nothing, writes only when
/// the primary fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessPath {
    /// Login, current-user and get-roadmap lookups.
    Read,
    /// Registration and roadmap saves.
    Write,
    /// Progress updates.
    Update,
}

/// Which tier produced an outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tier {
    Primary,
    Secondary,
}

impl Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tier::Primary => write!(f, "primary"),
            Tier::Secondary => write!(f, "secondary"),
        }
    }
}

/// What the policy does with a tier's outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FallbackDecision {
    /// Return the primary tier's result.
    UsePrimary,
    /// Return the secondary tier's result, or go and ask it.
    UseSecondary,
    /// Terminal: surface [ErrorKind::BothTiersExhausted].
    Fail,
}

/// The fallback decision table.
///
/// | tier      | outcome     | Read         | Write        | Update       |
/// |-----------|-------------|--------------|--------------|--------------|
/// | primary   | Found       | UsePrimary   | UsePrimary   | UsePrimary   |
/// | primary   | NotFound    | UseSecondary | Fail         | UseSecondary |
/// | primary   | Unavailable | UseSecondary | UseSecondary | UseSecondary |
/// | secondary | Found       | UseSecondary | UseSecondary | UseSecondary |
/// | secondary | otherwise   | Fail         | Fail         | Fail         |
///
/// A write whose primary answered without writing anything has no
/// fallback: the primary was reachable.
pub fn decide<T>(path: AccessPath, tier: Tier, outcome: &TierOutcome<T>) -> FallbackDecision {
    match (tier, outcome) {
        (Tier::Primary, TierOutcome::Found(_)) => FallbackDecision::UsePrimary,
        (Tier::Primary, TierOutcome::Unavailable(_)) => FallbackDecision::UseSecondary,
        (Tier::Primary, TierOutcome::NotFound) => match path {
            AccessPath::Read | AccessPath::Update => FallbackDecision::UseSecondary,
            AccessPath::Write => FallbackDecision::Fail,
        },
        (Tier::Secondary, TierOutcome::Found(_)) => FallbackDecision::UseSecondary,
        (Tier::Secondary, _) => FallbackDecision::Fail,
    }
}

/// A value together with the tier that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    value: T,
    tier: Tier,
}

impl<T> Resolved<T> {
    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }
}

/// A primary and a secondary [DocumentStore] with the fallback protocol
/// every data access goes through.
///
/// The tiers are never reconciled: a write that landed on the secondary tier
/// while the primary was down stays there (and only there) until the
/// process exits, and a write that landed on the primary is invisible to
/// reads served by the secondary.
#[derive(Clone)]
pub struct TieredStore {
    primary: DocumentStore,
    secondary: DocumentStore,
}

impl TieredStore {
    pub fn new(primary: DocumentStore, secondary: DocumentStore) -> Self {
        TieredStore { primary, secondary }
    }

    pub fn primary(&self) -> &DocumentStore {
        &self.primary
    }

    pub fn secondary(&self) -> &DocumentStore {
        &self.secondary
    }

    /// Runs `op` against the primary tier and, if [decide] says so, against
    /// the secondary tier.
    ///
    /// `op` is invoked with the `namespace` collection of a tier and reports a
    /// [TierOutcome]; an `Err` from `op` (a duplicate, a malformed
    /// invocation) aborts the protocol and is returned unchanged. Failing to
    /// resolve the collection counts as [TierOutcome::Unavailable].
    pub fn execute<T, F>(
        &self,
        path: AccessPath,
        namespace: &str,
        operation: &str,
        op: F,
    ) -> WaypointResult<Resolved<T>>
    where
        F: Fn(&Collection) -> WaypointResult<TierOutcome<T>>,
    {
        let primary_outcome = self.attempt(&self.primary, namespace, &op)?;
        match decide(path, Tier::Primary, &primary_outcome) {
            FallbackDecision::UsePrimary => {
                if let TierOutcome::Found(value) = primary_outcome {
                    return Ok(Resolved {
                        value,
                        tier: Tier::Primary,
                    });
                }
                return Err(exhausted(operation, None));
            }
            FallbackDecision::Fail => return Err(exhausted(operation, None)),
            FallbackDecision::UseSecondary => match &primary_outcome {
                TierOutcome::Unavailable(cause) => log::warn!(
                    "Primary store {} failed during {} ({}). Using secondary store.",
                    self.primary.describe(),
                    operation,
                    cause
                ),
                _ => log::info!(
                    "Primary store {} had no result for {}. Checking secondary store.",
                    self.primary.describe(),
                    operation
                ),
            },
        }

        let secondary_outcome = self.attempt(&self.secondary, namespace, &op)?;
        match (decide(path, Tier::Secondary, &secondary_outcome), secondary_outcome) {
            (FallbackDecision::UseSecondary, TierOutcome::Found(value)) => {
                log::debug!("{} served by the secondary store", operation);
                Ok(Resolved {
                    value,
                    tier: Tier::Secondary,
                })
            }
            (_, TierOutcome::Unavailable(cause)) => Err(exhausted(operation, Some(cause))),
            _ => Err(exhausted(operation, None)),
        }
    }

    fn attempt<T, F>(
        &self,
        store: &DocumentStore,
        namespace: &str,
        op: &F,
    ) -> WaypointResult<TierOutcome<T>>
    where
        F: Fn(&Collection) -> WaypointResult<TierOutcome<T>>,
    {
        match store.collection(namespace) {
            Ok(collection) => op(&collection),
            Err(e) => Ok(TierOutcome::Unavailable(classify(e)?)),
        }
    }
}

fn exhausted(operation: &str, cause: Option<WaypointError>) -> WaypointError {
    let message = format!("{} could not be satisfied by any store", operation);
    log::error!("{}", message);
    match cause {
        Some(cause) => WaypointError::new_with_cause(&message, ErrorKind::BothTiersExhausted, cause),
        None => WaypointError::new(&message, ErrorKind::BothTiersExhausted),
    }
}
