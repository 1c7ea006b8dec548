//! Domain entities and their state machines.
//!
//! Entities are plain serde structs with explicit status enums; every
//! allowed transition is encoded in a `can_transition_to` method and
//! validated by the workflow layer before the corresponding write.
//! Entities are mutated only through workflow operations.

mod founder;
mod funding;
mod mentor;
mod notification;
mod request;
mod startup;

pub use founder::Founder;
pub use funding::{ApplicationStatus, FundingApplication};
pub use mentor::Mentor;
pub use notification::{Notification, Priority};
pub use request::{Feedback, MentorshipRequest, RequestStatus, Session, SessionStatus, Urgency};
pub use startup::{Kpis, Startup, StartupStatus};
