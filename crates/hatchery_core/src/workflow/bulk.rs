//! Bulk startup status updates.

use crate::error::CoreResult;
use crate::model::{Notification, Startup, StartupStatus};
use crate::types::EntityId;
use crate::workflow::{status_change_notification, NotificationSpec, Workflows};
use serde::{Deserialize, Serialize};

/// One requested status change in a bulk update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartupStatusUpdate {
    /// The startup to update.
    pub startup_id: EntityId,
    /// The status to move it to.
    pub new_status: StartupStatus,
}

/// Why a bulk entry was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// The startup id did not resolve.
    NotFound,
    /// The startup's current status does not admit the transition.
    InvalidTransition,
}

/// A bulk entry that was skipped, with the reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedUpdate {
    /// The startup id from the request.
    pub startup_id: EntityId,
    /// Why it was skipped.
    pub reason: SkipReason,
}

/// Result of a bulk update.
#[derive(Debug, Clone)]
pub struct BulkUpdateOutcome {
    /// Startups that were actually updated, in request order.
    pub updated: Vec<Startup>,
    /// Entries that were skipped, with reasons.
    pub skipped: Vec<SkippedUpdate>,
}

impl Workflows {
    /// Applies a batch of startup status changes with one notification
    /// per updated startup, as a single unit.
    ///
    /// Entries whose startup id does not resolve, or whose transition is
    /// not allowed from the current status, are skipped and reported -
    /// the batch does not fail. Staged notifications are written in one
    /// batched step after the loop. Any store failure mid-batch rolls
    /// back every status change and every staged notification.
    pub fn bulk_update_startups_with_notifications(
        &self,
        updates: &[StartupStatusUpdate],
    ) -> CoreResult<BulkUpdateOutcome> {
        self.coordinator()
            .run("bulk_update_startups_with_notifications", |txn| {
                let mut updated = Vec::new();
                let mut skipped = Vec::new();
                let mut staged: Vec<Notification> = Vec::new();

                for update in updates {
                    let Some(mut startup) =
                        self.repos()
                            .startups
                            .get(self.store(), txn, update.startup_id)?
                    else {
                        tracing::debug!(startup = %update.startup_id, "bulk update skipping unknown startup");
                        skipped.push(SkippedUpdate {
                            startup_id: update.startup_id,
                            reason: SkipReason::NotFound,
                        });
                        continue;
                    };

                    if !startup.status.can_transition_to(update.new_status) {
                        tracing::debug!(
                            startup = %update.startup_id,
                            from = ?startup.status,
                            to = ?update.new_status,
                            "bulk update skipping invalid transition"
                        );
                        skipped.push(SkippedUpdate {
                            startup_id: update.startup_id,
                            reason: SkipReason::InvalidTransition,
                        });
                        continue;
                    }

                    startup.status = update.new_status;
                    self.repos().startups.put(txn, &startup)?;
                    staged.push(status_change_notification(
                        &startup,
                        update.new_status,
                        &NotificationSpec::default(),
                    ));
                    updated.push(startup);
                }

                // Batched insert of everything staged in the loop.
                for notification in &staged {
                    self.repos().notifications.put(txn, notification)?;
                }

                Ok(BulkUpdateOutcome { updated, skipped })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::testutil::{seed_founder, seed_startup, workflows};

    #[test]
    fn updates_all_resolvable_entries() {
        let wf = workflows();
        let founder = seed_founder(&wf);
        let a = seed_startup(&wf, founder.id, StartupStatus::Pending);
        let b = seed_startup(&wf, founder.id, StartupStatus::Pending);

        let outcome = wf
            .bulk_update_startups_with_notifications(&[
                StartupStatusUpdate {
                    startup_id: a.id,
                    new_status: StartupStatus::Approved,
                },
                StartupStatusUpdate {
                    startup_id: b.id,
                    new_status: StartupStatus::Approved,
                },
            ])
            .unwrap();

        assert_eq!(outcome.updated.len(), 2);
        assert!(outcome.skipped.is_empty());

        let mut txn = wf.store().begin();
        let notifications = wf.repos().notifications.scan(wf.store(), &mut txn).unwrap();
        assert_eq!(notifications.len(), 2);
        assert!(notifications.iter().all(|n| n.recipient == founder.id));
    }

    #[test]
    fn missing_ids_are_skipped_not_fatal() {
        let wf = workflows();
        let founder = seed_founder(&wf);
        let a = seed_startup(&wf, founder.id, StartupStatus::Pending);
        let ghost = EntityId::new();
        let c = seed_startup(&wf, founder.id, StartupStatus::Pending);

        let outcome = wf
            .bulk_update_startups_with_notifications(&[
                StartupStatusUpdate {
                    startup_id: a.id,
                    new_status: StartupStatus::Approved,
                },
                StartupStatusUpdate {
                    startup_id: ghost,
                    new_status: StartupStatus::Approved,
                },
                StartupStatusUpdate {
                    startup_id: c.id,
                    new_status: StartupStatus::Approved,
                },
            ])
            .unwrap();

        assert_eq!(outcome.updated.len(), 2);
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].startup_id, ghost);
        assert_eq!(outcome.skipped[0].reason, SkipReason::NotFound);

        let mut txn = wf.store().begin();
        assert_eq!(
            wf.repos()
                .notifications
                .scan(wf.store(), &mut txn)
                .unwrap()
                .len(),
            2
        );
    }

    #[test]
    fn invalid_transitions_are_skipped_with_reason() {
        let wf = workflows();
        let founder = seed_founder(&wf);
        let rejected = seed_startup(&wf, founder.id, StartupStatus::Rejected);

        let outcome = wf
            .bulk_update_startups_with_notifications(&[StartupStatusUpdate {
                startup_id: rejected.id,
                new_status: StartupStatus::Active,
            }])
            .unwrap();

        assert!(outcome.updated.is_empty());
        assert_eq!(outcome.skipped[0].reason, SkipReason::InvalidTransition);
    }

    #[test]
    fn empty_batch_is_a_no_op() {
        let wf = workflows();
        let outcome = wf.bulk_update_startups_with_notifications(&[]).unwrap();
        assert!(outcome.updated.is_empty());
        assert!(outcome.skipped.is_empty());
    }
}
