//! Mentor assignment.

use crate::error::{CoreError, CoreResult};
use crate::model::{Mentor, MentorshipRequest, RequestStatus, Session, SessionStatus};
use crate::types::{EntityId, Timestamp};
use crate::workflow::Workflows;
use serde::{Deserialize, Serialize};

/// Default session length when the caller leaves it unset.
pub const DEFAULT_SESSION_MINUTES: u32 = 60;

/// Parameters for the session created on assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSpec {
    /// Scheduled start time.
    pub scheduled_at: Timestamp,
    /// Duration in minutes; defaults to [`DEFAULT_SESSION_MINUTES`].
    pub duration_minutes: Option<u32>,
}

/// Result of a successful assignment.
#[derive(Debug, Clone)]
pub struct AssignmentOutcome {
    /// The request, now Scheduled with the new session appended.
    pub request: MentorshipRequest,
    /// The mentor, with one slot consumed.
    pub mentor: Mentor,
}

impl Workflows {
    /// Assigns a mentor to a request and schedules the first session.
    ///
    /// One unit: the request gains `selected_mentor`, moves to Scheduled
    /// and grows a new Scheduled session; the mentor loses one slot and
    /// gains one active mentee. The slot decrement is conditional on
    /// `slots_available > 0` - two racing assignments against the last
    /// slot cannot both succeed, the loser re-runs against fresh state
    /// and fails with `InvariantViolation`.
    pub fn assign_mentor_and_create_session(
        &self,
        request_id: EntityId,
        mentor_id: EntityId,
        spec: &SessionSpec,
    ) -> CoreResult<AssignmentOutcome> {
        self.coordinator()
            .run("assign_mentor_and_create_session", |txn| {
                let mut request = self.repos().requests.require(self.store(), txn, request_id)?;
                let mut mentor = self.repos().mentors.require(self.store(), txn, mentor_id)?;

                if !request.status.can_transition_to(RequestStatus::Scheduled) {
                    return Err(CoreError::invariant(format!(
                        "request {request_id} cannot be scheduled from {:?}",
                        request.status
                    )));
                }
                if let Some(selected) = request.selected_mentor {
                    if selected != mentor_id {
                        return Err(CoreError::invariant(format!(
                            "request {request_id} already has mentor {selected} selected"
                        )));
                    }
                }
                if mentor.slots_available == 0 {
                    return Err(CoreError::invariant("no slots available"));
                }
                if mentor.active_mentees >= mentor.max_mentees {
                    return Err(CoreError::invariant(format!(
                        "mentor {mentor_id} is at max mentees"
                    )));
                }

                request.selected_mentor = Some(mentor_id);
                request.status = RequestStatus::Scheduled;
                request.sessions.push(Session {
                    id: EntityId::new(),
                    mentor: mentor_id,
                    scheduled_at: spec.scheduled_at,
                    duration_minutes: spec.duration_minutes.unwrap_or(DEFAULT_SESSION_MINUTES),
                    status: SessionStatus::Scheduled,
                    founder_feedback: None,
                    mentor_feedback: None,
                });

                mentor.slots_available -= 1;
                mentor.active_mentees += 1;

                self.repos().requests.put(txn, &request)?;
                self.repos().mentors.put(txn, &mentor)?;

                Ok(AssignmentOutcome { request, mentor })
            })
    }
}
