//! Startup status changes with owner notification.

use crate::error::{CoreError, CoreResult};
use crate::model::{Notification, Startup, StartupStatus};
use crate::types::EntityId;
use crate::workflow::{status_change_notification, NotificationSpec, Workflows};

impl Workflows {
    /// Updates a startup's status and notifies its founder, atomically.
    ///
    /// A startup never changes status without its owner being notified,
    /// and a notification never references a status change that didn't
    /// happen - both writes are in one unit.
    pub fn update_startup_status_with_notification(
        &self,
        startup_id: EntityId,
        new_status: StartupStatus,
        spec: &NotificationSpec,
    ) -> CoreResult<(Startup, Notification)> {
        self.coordinator()
            .run("update_startup_status_with_notification", |txn| {
                let mut startup = self.repos().startups.require(self.store(), txn, startup_id)?;

                if !startup.status.can_transition_to(new_status) {
                    return Err(CoreError::invariant(format!(
                        "startup {startup_id} cannot move from {:?} to {new_status:?}",
                        startup.status
                    )));
                }
                startup.status = new_status;

                let notification = status_change_notification(&startup, new_status, spec);

                self.repos().startups.put(txn, &startup)?;
                self.repos().notifications.put(txn, &notification)?;

                Ok((startup, notification))
            })
    }
}
