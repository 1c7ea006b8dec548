//! Deterministic fault injection for commit-path tests.

use crate::types::CollectionId;

/// A scripted failure to arm on the store.
///
/// Faults fire at commit time, before any write is applied, so a failed
/// commit leaves the store untouched. Each fault carries a countdown of
/// how many commits it should fail before disarming.
#[derive(Debug, Clone)]
pub enum Fault {
    /// Fail the next `remaining` commit attempts outright.
    CommitUnavailable {
        /// Number of commits left to fail.
        remaining: u32,
    },
    /// Fail commits whose write set touches the given collection.
    CommitTouching {
        /// The collection that triggers the fault.
        collection: CollectionId,
        /// Number of matching commits left to fail.
        remaining: u32,
    },
}

/// The set of armed faults.
#[derive(Debug, Default)]
pub struct FaultPlan {
    faults: Vec<Fault>,
}

impl FaultPlan {
    /// Creates an empty plan.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms a fault.
    pub fn arm(&mut self, fault: Fault) {
        self.faults.push(fault);
    }

    /// Returns `true` if no faults are armed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faults.is_empty()
    }

    /// Checks whether a commit touching `touched` collections should fail,
    /// consuming one count from the first matching fault.
    pub(crate) fn should_fail(&mut self, touched: &[CollectionId]) -> bool {
        let fired = self.faults.iter_mut().position(|fault| {
            let fires = match fault {
                Fault::CommitUnavailable { remaining } => *remaining > 0,
                Fault::CommitTouching {
                    collection,
                    remaining,
                } => *remaining > 0 && touched.contains(collection),
            };
            if fires {
                match fault {
                    Fault::CommitUnavailable { remaining }
                    | Fault::CommitTouching { remaining, .. } => *remaining -= 1,
                }
            }
            fires
        });
        if fired.is_some() {
            self.faults.retain(|f| match f {
                Fault::CommitUnavailable { remaining }
                | Fault::CommitTouching { remaining, .. } => *remaining > 0,
            });
        }
        fired.is_some()
    }
}
