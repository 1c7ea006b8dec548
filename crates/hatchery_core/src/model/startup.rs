//! Startup entity.

use crate::types::EntityId;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartupStatus {
    /// Awaiting review.
    Pending,
    /// Approved to join the program.
    Approved,
    /// Actively enrolled.
    Active,
    /// Rejected (terminal).
    Rejected,
}

impl StartupStatus {
    /// Returns `true` if this status admits no further transitions.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Active | Self::Rejected)
    }

    /// Returns `true` if the transition to `next` is allowed.
    ///
    /// Transitions are one-directional: Pending -> Approved -> Active,
    /// with Rejected reachable from any pre-Active state. Admin override
    /// paths are outside the core.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Approved)
                | (Self::Pending, Self::Rejected)
                | (Self::Approved, Self::Active)
                | (Self::Approved, Self::Rejected)
        )
    }
}

/// KPI block for a startup.
///
/// `funding` is monotonically non-decreasing except via explicit
/// correction, which is an administrative action outside the core.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Kpis {
    /// Revenue to date, in whole currency units.
    pub revenue: u64,
    /// Active user count.
    pub users: u64,
    /// Month-over-month growth percentage.
    pub growth_pct: f64,
    /// Cumulative funding raised, in whole currency units.
    pub funding: u64,
}

/// A startup enrolled in (or applying to) the program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Startup {
    /// Entity id.
    pub id: EntityId,
    /// Company name.
    pub name: String,
    /// Lifecycle status.
    pub status: StartupStatus,
    /// Key performance indicators.
    pub kpis: Kpis,
    /// Founder (owner) reference.
    pub founder: EntityId,
}

impl Startup {
    /// Creates a pending startup with zeroed KPIs.
    #[must_use]
    pub fn new(name: impl Into<String>, founder: EntityId) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            status: StartupStatus::Pending,
            kpis: Kpis::default(),
            founder,
        }
    }
}
