//! Transactional unit execution.

use crate::config::Config;
use crate::error::{CoreError, CoreResult};
use crate::txn::RetryPolicy;
use hatchery_store::{DocumentStore, StoreTxn};
use std::cell::Cell;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

thread_local! {
    static IN_UNIT: Cell<bool> = const { Cell::new(false) };
}

/// Resets the in-flight marker on every exit path, including unwind.
struct UnitGuard;

impl UnitGuard {
    fn enter() -> CoreResult<Self> {
        IN_UNIT.with(|flag| {
            if flag.get() {
                Err(CoreError::invariant(
                    "transactional units cannot be nested",
                ))
            } else {
                flag.set(true);
                Ok(Self)
            }
        })
    }
}

impl Drop for UnitGuard {
    fn drop(&mut self) {
        IN_UNIT.with(|flag| flag.set(false));
    }
}

/// Runs units of work with all-or-nothing semantics.
///
/// [`run`](Self::run) opens a store transaction, hands it to the work
/// closure, commits on `Ok` and aborts on `Err` - no write issued inside
/// the closure is observable outside a successful commit. Retry-eligible
/// failures (transient store errors and commit-time conflicts) re-run the
/// whole closure against fresh state, bounded by the [`RetryPolicy`];
/// everything else aborts and propagates unchanged.
///
/// Units cannot be nested: each workflow operation opens exactly one
/// top-level unit, enforced per thread.
pub struct Coordinator {
    store: Arc<DocumentStore>,
    policy: RetryPolicy,
    unit_timeout: Duration,
}

impl Coordinator {
    /// Creates a coordinator over a store.
    #[must_use]
    pub fn new(store: Arc<DocumentStore>, config: &Config) -> Self {
        Self {
            store,
            policy: RetryPolicy::new(
                config.max_attempts,
                config.base_backoff,
                config.max_backoff,
            ),
            unit_timeout: config.unit_timeout,
        }
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    /// Executes `work` as one transactional unit.
    ///
    /// The closure may run more than once (on retry), each time against a
    /// fresh transaction; operations must therefore derive their writes
    /// from reads made inside the closure, never from state captured
    /// across attempts.
    pub fn run<T, F>(&self, op: &'static str, mut work: F) -> CoreResult<T>
    where
        F: FnMut(&mut StoreTxn) -> CoreResult<T>,
    {
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            let _guard = UnitGuard::enter()?;
            let started = Instant::now();
            let mut txn = self.store.begin();

            let err = match work(&mut txn) {
                Ok(value) => {
                    if started.elapsed() > self.unit_timeout {
                        self.store.abort(&mut txn);
                        CoreError::transient("unit deadline exceeded")
                    } else {
                        match self.store.commit(&mut txn) {
                            Ok(()) => {
                                tracing::debug!(op, attempt, "unit committed");
                                return Ok(value);
                            }
                            Err(e) => e.into(),
                        }
                    }
                }
                Err(e) => {
                    self.store.abort(&mut txn);
                    e
                }
            };
            drop(_guard);

            if err.is_retryable() && self.policy.allows_retry(attempt) {
                let delay = self.policy.delay_for(attempt);
                tracing::debug!(
                    op,
                    attempt,
                    error = %err,
                    delay_ms = delay.as_millis() as u64,
                    "retrying unit"
                );
                if !delay.is_zero() {
                    thread::sleep(delay);
                }
                continue;
            }

            match &err {
                CoreError::Transient { .. } | CoreError::Conflict { .. } => {
                    tracing::warn!(op, attempts = attempt, error = %err, "unit retries exhausted");
                }
                CoreError::InvariantViolation { .. } => {
                    tracing::warn!(op, error = %err, "unit aborted");
                }
                _ => {
                    tracing::debug!(op, error = %err, "unit aborted");
                }
            }
            return Err(err);
        }
    }
}

impl std::fmt::Debug for Coordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coordinator")
            .field("policy", &self.policy)
            .field("unit_timeout", &self.unit_timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hatchery_store::{DocKey, Fault};

    fn fast_config() -> Config {
        Config::new()
            .max_attempts(3)
            .base_backoff(Duration::ZERO)
            .max_backoff(Duration::ZERO)
    }

    fn coordinator() -> Coordinator {
        Coordinator::new(Arc::new(DocumentStore::new()), &fast_config())
    }

    fn key(b: u8) -> DocKey {
        DocKey::from_bytes([b; 16])
    }

    #[test]
    fn success_commits_writes() {
        let coord = coordinator();
        let c = coord.store().collection("items");

        coord
            .run("test", |txn| {
                txn.put(c, key(1), vec![1])?;
                Ok(())
            })
            .unwrap();

        let mut reader = coord.store().begin();
        assert_eq!(
            coord.store().get(&mut reader, c, key(1)).unwrap(),
            Some(vec![1])
        );
    }

    #[test]
    fn work_error_aborts_and_propagates() {
        let coord = coordinator();
        let c = coord.store().collection("items");

        let result: CoreResult<()> = coord.run("test", |txn| {
            txn.put(c, key(1), vec![1])?;
            Err(CoreError::invariant("boom"))
        });
        assert!(matches!(result, Err(CoreError::InvariantViolation { .. })));

        let mut reader = coord.store().begin();
        assert!(coord.store().get(&mut reader, c, key(1)).unwrap().is_none());
    }

    #[test]
    fn transient_commit_failure_is_retried() {
        let coord = coordinator();
        let c = coord.store().collection("items");
        coord
            .store()
            .arm_fault(Fault::CommitUnavailable { remaining: 1 });

        let mut runs = 0;
        coord
            .run("test", |txn| {
                runs += 1;
                txn.put(c, key(1), vec![runs])?;
                Ok(())
            })
            .unwrap();
        assert_eq!(runs, 2);

        let mut reader = coord.store().begin();
        assert_eq!(
            coord.store().get(&mut reader, c, key(1)).unwrap(),
            Some(vec![2])
        );
    }

    #[test]
    fn retries_are_bounded() {
        let coord = coordinator();
        coord
            .store()
            .arm_fault(Fault::CommitUnavailable { remaining: 10 });

        let mut runs = 0;
        let result = coord.run("test", |_txn| {
            runs += 1;
            Ok(())
        });
        assert!(matches!(result, Err(CoreError::Transient { .. })));
        assert_eq!(runs, 3);
    }

    #[test]
    fn terminal_errors_are_not_retried() {
        let coord = coordinator();
        let mut runs = 0;
        let result: CoreResult<()> = coord.run("test", |_txn| {
            runs += 1;
            Err(CoreError::invariant("no"))
        });
        assert!(result.is_err());
        assert_eq!(runs, 1);
    }

    #[test]
    fn commit_conflict_reruns_against_fresh_state() {
        let coord = coordinator();
        let c = coord.store().collection("items");

        // Seed a document.
        let mut setup = coord.store().begin();
        setup.put(c, key(1), vec![0]).unwrap();
        coord.store().commit(&mut setup).unwrap();

        let mut runs = 0;
        let seen = coord
            .run("test", |txn| {
                runs += 1;
                let current = coord.store().get(txn, c, key(1))?.unwrap_or_default();
                if runs == 1 {
                    // Interfere after this unit's read so its commit
                    // validation fails.
                    let mut other = coord.store().begin();
                    coord.store().get(&mut other, c, key(1))?;
                    other.put(c, key(1), vec![9])?;
                    coord.store().commit(&mut other)?;
                }
                txn.put(c, key(1), vec![current[0] + 1])?;
                Ok(current[0])
            })
            .unwrap();

        // Second run saw the interfering write.
        assert_eq!(runs, 2);
        assert_eq!(seen, 9);
    }

    #[test]
    fn nested_units_rejected() {
        let coord = coordinator();
        let result: CoreResult<()> = coord.run("outer", |_txn| {
            coord.run("inner", |_txn| Ok(()))
        });
        assert!(matches!(result, Err(CoreError::InvariantViolation { .. })));
    }

    #[test]
    fn blown_deadline_surfaces_transient() {
        let config = fast_config().max_attempts(1).unit_timeout(Duration::ZERO);
        let coord = Coordinator::new(Arc::new(DocumentStore::new()), &config);
        let result = coord.run("test", |_txn| {
            thread::sleep(Duration::from_millis(2));
            Ok(())
        });
        assert!(matches!(result, Err(CoreError::Transient { .. })));
    }
}
