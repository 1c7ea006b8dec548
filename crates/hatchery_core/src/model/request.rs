//! Mentorship requests and their embedded sessions.

use crate::matching::MatchCandidate;
use crate::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Urgency of a mentorship request, ordered Low < Medium < High < Critical.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    /// No time pressure.
    Low,
    /// Normal priority.
    Medium,
    /// Needs attention soon.
    High,
    /// Blocking the startup.
    Critical,
}

/// Lifecycle status of a mentorship request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Created, no mentor selected.
    Pending,
    /// A mentor has been selected.
    Matched,
    /// A session has been scheduled.
    Scheduled,
    /// Mentorship concluded (terminal).
    Completed,
    /// Cancelled before completion (terminal).
    Cancelled,
}

impl RequestStatus {
    /// Returns `true` if this status admits no further transitions.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    fn rank(self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::Matched => 1,
            Self::Scheduled => 2,
            Self::Completed => 3,
            Self::Cancelled => 4,
        }
    }

    /// Returns `true` if the transition to `next` is allowed.
    ///
    /// The request moves forward through Pending -> Matched -> Scheduled
    /// -> Completed (intermediate states may be skipped, e.g. assignment
    /// takes a Pending request straight to Scheduled); Cancelled is
    /// reachable from any non-terminal state.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        if self.is_terminal() {
            return false;
        }
        if next == Self::Cancelled {
            return true;
        }
        next.rank() > self.rank()
    }
}

/// Status of an individual session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Scheduled to take place.
    Scheduled,
    /// Took place; feedback may be attached.
    Completed,
    /// Cancelled before taking place.
    Cancelled,
}

/// Feedback left on a session, from either party.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    /// Rating on a 1-5 scale.
    pub rating: u8,
    /// Optional free-form comment.
    pub comment: Option<String>,
    /// When the feedback was submitted.
    pub submitted_at: Timestamp,
}

/// A mentoring session embedded in a request.
///
/// Sessions belong to the request aggregate: they are created and mutated
/// only through the request's update path, inside the same transactional
/// unit, and always reference the request's selected mentor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Session id, unique within the request.
    pub id: EntityId,
    /// The mentor conducting the session.
    pub mentor: EntityId,
    /// Scheduled start time.
    pub scheduled_at: Timestamp,
    /// Duration in minutes.
    pub duration_minutes: u32,
    /// Session status.
    pub status: SessionStatus,
    /// Feedback from the founder, once submitted.
    pub founder_feedback: Option<Feedback>,
    /// Feedback from the mentor, once submitted.
    pub mentor_feedback: Option<Feedback>,
}

/// A request by a founder for mentorship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentorshipRequest {
    /// Entity id.
    pub id: EntityId,
    /// The requesting founder.
    pub founder: EntityId,
    /// Short topic line.
    pub topic: String,
    /// Longer description of what is needed.
    pub description: String,
    /// Skills the mentor must cover.
    pub required_skills: BTreeSet<String>,
    /// Domains the mentor should know.
    pub required_domains: BTreeSet<String>,
    /// How urgent the request is.
    pub urgency: Urgency,
    /// Lifecycle status.
    pub status: RequestStatus,
    /// The selected mentor, set once status reaches Matched.
    pub selected_mentor: Option<EntityId>,
    /// Ranked candidate matches computed at creation time.
    pub matches: Vec<MatchCandidate>,
    /// Sessions, in creation order.
    pub sessions: Vec<Session>,
}

impl MentorshipRequest {
    /// Creates a pending request with no matches and no sessions.
    #[must_use]
    pub fn new(founder: EntityId, topic: impl Into<String>, urgency: Urgency) -> Self {
        Self {
            id: EntityId::new(),
            founder,
            topic: topic.into(),
            description: String::new(),
            required_skills: BTreeSet::new(),
            required_domains: BTreeSet::new(),
            urgency,
            status: RequestStatus::Pending,
            selected_mentor: None,
            matches: Vec::new(),
            sessions: Vec::new(),
        }
    }

    /// Finds an embedded session by id.
    #[must_use]
    pub fn session(&self, session_id: EntityId) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == session_id)
    }

    /// Finds an embedded session by id, mutably.
    pub fn session_mut(&mut self, session_id: EntityId) -> Option<&mut Session> {
        self.sessions.iter_mut().find(|s| s.id == session_id)
    }

    /// Returns `true` if at least one session has completed.
    ///
    /// A request may only move to Completed when this holds.
    #[must_use]
    pub fn has_completed_session(&self) -> bool {
        self.sessions
            .iter()
            .any(|s| s.status == SessionStatus::Completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urgency_is_ordered() {
        assert!(Urgency::Low < Urgency::Medium);
        assert!(Urgency::Medium < Urgency::High);
        assert!(Urgency::High < Urgency::Critical);
    }

    #[test]
    fn forward_transitions_allowed() {
        assert!(RequestStatus::Pending.can_transition_to(RequestStatus::Matched));
        assert!(RequestStatus::Matched.can_transition_to(RequestStatus::Scheduled));
        // Assignment may skip Matched.
        assert!(RequestStatus::Pending.can_transition_to(RequestStatus::Scheduled));
    }

    #[test]
    fn cancel_from_any_non_terminal() {
        assert!(RequestStatus::Pending.can_transition_to(RequestStatus::Cancelled));
        assert!(RequestStatus::Scheduled.can_transition_to(RequestStatus::Cancelled));
        assert!(!RequestStatus::Completed.can_transition_to(RequestStatus::Cancelled));
        assert!(!RequestStatus::Cancelled.can_transition_to(RequestStatus::Pending));
    }

    #[test]
    fn backward_transitions_rejected() {
        assert!(!RequestStatus::Scheduled.can_transition_to(RequestStatus::Matched));
        assert!(!RequestStatus::Matched.can_transition_to(RequestStatus::Pending));
    }

    #[test]
    fn session_lookup() {
        let mut request = MentorshipRequest::new(EntityId::new(), "t", Urgency::Medium);
        let session = Session {
            id: EntityId::new(),
            mentor: EntityId::new(),
            scheduled_at: Timestamp::from_millis(1),
            duration_minutes: 60,
            status: SessionStatus::Scheduled,
            founder_feedback: None,
            mentor_feedback: None,
        };
        let sid = session.id;
        request.sessions.push(session);

        assert!(request.session(sid).is_some());
        assert!(request.session(EntityId::new()).is_none());
        assert!(!request.has_completed_session());

        request.session_mut(sid).unwrap().status = SessionStatus::Completed;
        assert!(request.has_completed_session());
    }
}
