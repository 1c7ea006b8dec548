//! Funding application submission.

use crate::error::{CoreError, CoreResult};
use crate::model::{ApplicationStatus, FundingApplication, Startup};
use crate::types::{EntityId, Timestamp};
use crate::workflow::Workflows;
use serde::{Deserialize, Serialize};

/// Caller-supplied application content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationData {
    /// Amount requested, in whole currency units. Must be positive.
    pub amount_requested: u64,
    /// What the funds are for.
    pub purpose: String,
}

impl Workflows {
    /// Submits a funding application for a startup.
    ///
    /// Creates the application as Submitted and increments the startup's
    /// cumulative funding KPI by `amount_requested` in the same unit:
    /// there is never an application marked Submitted whose startup total
    /// doesn't reflect it, or vice versa. A missing startup fails with
    /// `NotFound` and the created application rolls back with everything
    /// else.
    pub fn submit_funding_application(
        &self,
        data: &ApplicationData,
        startup_id: EntityId,
    ) -> CoreResult<(FundingApplication, Startup)> {
        self.coordinator().run("submit_funding_application", |txn| {
            if data.amount_requested == 0 {
                return Err(CoreError::invariant("amount requested must be positive"));
            }

            let application = FundingApplication {
                id: EntityId::new(),
                startup: startup_id,
                amount_requested: data.amount_requested,
                purpose: data.purpose.clone(),
                status: ApplicationStatus::Submitted,
                submitted_at: Some(Timestamp::now()),
            };
            self.repos().applications.put(txn, &application)?;

            let mut startup = self.repos().startups.require(self.store(), txn, startup_id)?;
            startup.kpis.funding = startup
                .kpis
                .funding
                .checked_add(data.amount_requested)
                .ok_or_else(|| CoreError::invariant("cumulative funding overflow"))?;
            self.repos().startups.put(txn, &startup)?;

            Ok((application, startup))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StartupStatus;
    use crate::workflow::testutil::{seed_founder, seed_startup, workflows};

    fn data(amount: u64) -> ApplicationData {
        ApplicationData {
            amount_requested: amount,
            purpose: "runway".to_string(),
        }
    }

    #[test]
    fn submission_increments_funding_exactly() {
        let wf = workflows();
        let founder = seed_founder(&wf);
        let startup = seed_startup(&wf, founder.id, StartupStatus::Active);

        let (application, updated) = wf
            .submit_funding_application(&data(50_000), startup.id)
            .unwrap();

        assert_eq!(application.status, ApplicationStatus::Submitted);
        assert!(application.submitted_at.is_some());
        assert_eq!(updated.kpis.funding, 50_000);

        // A second application accumulates.
        let (_, updated) = wf
            .submit_funding_application(&data(25_000), startup.id)
            .unwrap();
        assert_eq!(updated.kpis.funding, 75_000);
    }

    #[test]
    fn missing_startup_leaves_no_application() {
        let wf = workflows();
        let result = wf.submit_funding_application(&data(10_000), EntityId::new());
        assert!(matches!(result, Err(CoreError::NotFound { .. })));

        let mut txn = wf.store().begin();
        assert!(wf
            .repos()
            .applications
            .scan(wf.store(), &mut txn)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn zero_amount_rejected() {
        let wf = workflows();
        let founder = seed_founder(&wf);
        let startup = seed_startup(&wf, founder.id, StartupStatus::Active);

        let result = wf.submit_funding_application(&data(0), startup.id);
        assert!(matches!(result, Err(CoreError::InvariantViolation { .. })));

        let mut txn = wf.store().begin();
        let stored = wf
            .repos()
            .startups
            .require(wf.store(), &mut txn, startup.id)
            .unwrap();
        assert_eq!(stored.kpis.funding, 0);
    }
}
