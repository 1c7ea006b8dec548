//! Session completion and mentor rating recompute.

use crate::error::{CoreError, CoreResult};
use crate::model::{Feedback, MentorshipRequest, SessionStatus};
use crate::types::{EntityId, Timestamp};
use crate::workflow::Workflows;
use serde::{Deserialize, Serialize};

/// Caller-supplied feedback for one side of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackInput {
    /// Rating on a 1-5 scale.
    pub rating: u8,
    /// Optional free-form comment.
    pub comment: Option<String>,
}

impl FeedbackInput {
    fn validate(&self, who: &str) -> CoreResult<()> {
        if (1..=5).contains(&self.rating) {
            Ok(())
        } else {
            Err(CoreError::invariant(format!(
                "{who} rating must be between 1 and 5, got {}",
                self.rating
            )))
        }
    }

    fn stamp(&self) -> Feedback {
        Feedback {
            rating: self.rating,
            comment: self.comment.clone(),
            submitted_at: Timestamp::now(),
        }
    }
}

/// Result of a completed session.
#[derive(Debug, Clone)]
pub struct SessionOutcome {
    /// The request with the session completed and feedback attached.
    pub request: MentorshipRequest,
    /// The mentor's recomputed rating, when any rated session exists.
    pub mentor_rating: Option<f64>,
}

impl Workflows {
    /// Marks a session completed, attaches both feedback blocks and
    /// recomputes the mentor's rating.
    ///
    /// The rating is the arithmetic mean of founder ratings over all the
    /// mentor's sessions across all requests, computed from a scan inside
    /// the same unit - never from a stale or partially-committed feedback
    /// set, and never incremented (so a retried call cannot double-count
    /// this session). When no rated session exists for the mentor the
    /// rating write is skipped.
    pub fn complete_session_with_feedback(
        &self,
        request_id: EntityId,
        session_id: EntityId,
        founder_feedback: &FeedbackInput,
        mentor_feedback: &FeedbackInput,
    ) -> CoreResult<SessionOutcome> {
        founder_feedback.validate("founder")?;
        mentor_feedback.validate("mentor")?;

        self.coordinator()
            .run("complete_session_with_feedback", |txn| {
                let mut request = self.repos().requests.require(self.store(), txn, request_id)?;
                let session = request
                    .session_mut(session_id)
                    .ok_or_else(|| CoreError::not_found("sessions", session_id))?;

                if session.status == SessionStatus::Cancelled {
                    return Err(CoreError::invariant(format!(
                        "session {session_id} was cancelled"
                    )));
                }
                session.status = SessionStatus::Completed;
                session.founder_feedback = Some(founder_feedback.stamp());
                session.mentor_feedback = Some(mentor_feedback.stamp());
                let mentor_id = session.mentor;

                self.repos().requests.put(txn, &request)?;

                // Cross-entity aggregate inside the unit; the scan overlay
                // includes the feedback staged above.
                let mentor_rating = self.recompute_rating(txn, mentor_id)?;

                Ok(SessionOutcome {
                    request,
                    mentor_rating,
                })
            })
    }

    fn recompute_rating(
        &self,
        txn: &mut hatchery_store::StoreTxn,
        mentor_id: EntityId,
    ) -> CoreResult<Option<f64>> {
        let requests = self.repos().requests.scan(self.store(), txn)?;
        let ratings: Vec<u8> = requests
            .iter()
            .flat_map(|r| r.sessions.iter())
            .filter(|s| s.mentor == mentor_id)
            .filter_map(|s| s.founder_feedback.as_ref())
            .map(|f| f.rating)
            .collect();

        // Guards against concurrent removal of every rated session;
        // skip the write rather than divide by zero.
        if ratings.is_empty() {
            return Ok(None);
        }
        let mean = f64::from(ratings.iter().map(|&r| u32::from(r)).sum::<u32>())
            / ratings.len() as f64;

        let mut mentor = self.repos().mentors.require(self.store(), txn, mentor_id)?;
        mentor.rating = Some(mean);
        self.repos().mentors.put(txn, &mentor)?;
        Ok(Some(mean))
    }
}
