//! Funding applications.

use crate::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a funding application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    /// Being drafted, not yet visible to reviewers.
    Draft,
    /// Submitted for review.
    Submitted,
    /// Under active review.
    UnderReview,
    /// Approved (terminal).
    Approved,
    /// Rejected (terminal).
    Rejected,
    /// Withdrawn by the applicant (terminal).
    Withdrawn,
}

impl ApplicationStatus {
    /// Returns `true` if this status admits no further transitions.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected | Self::Withdrawn)
    }

    /// Returns `true` if the transition to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Draft, Self::Submitted)
                | (Self::Draft, Self::Withdrawn)
                | (Self::Submitted, Self::UnderReview)
                | (Self::Submitted, Self::Withdrawn)
                | (Self::UnderReview, Self::Approved)
                | (Self::UnderReview, Self::Rejected)
                | (Self::UnderReview, Self::Withdrawn)
        )
    }
}

/// An application for funding by a startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingApplication {
    /// Entity id.
    pub id: EntityId,
    /// The applying startup.
    pub startup: EntityId,
    /// Amount requested, in whole currency units.
    pub amount_requested: u64,
    /// What the funds are for.
    pub purpose: String,
    /// Lifecycle status.
    pub status: ApplicationStatus,
    /// Set when the application is submitted.
    pub submitted_at: Option<Timestamp>,
}
