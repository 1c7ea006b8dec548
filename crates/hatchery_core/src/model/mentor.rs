//! Mentor profile.

use crate::types::EntityId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A mentor profile.
///
/// `slots_available` is the mentor's remaining mentoring capacity; it is
/// decremented conditionally by the assignment workflow and must never go
/// negative (the type enforces that; the workflow rejects the decrement at
/// zero rather than clamping). `rating` is derived from session feedback
/// and recomputed by the session-completion workflow; it is never edited
/// directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mentor {
    /// Entity id.
    pub id: EntityId,
    /// Display name.
    pub name: String,
    /// Expertise tags (skill strings).
    pub expertise: BTreeSet<String>,
    /// Remaining mentoring capacity, in slots.
    pub slots_available: u32,
    /// Maximum concurrent mentees.
    pub max_mentees: u32,
    /// Current mentee count.
    pub active_mentees: u32,
    /// Rolling average rating on a 1-5 scale, when any feedback exists.
    pub rating: Option<f64>,
}

impl Mentor {
    /// Creates a mentor with no expertise, no capacity and no rating.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            expertise: BTreeSet::new(),
            slots_available: 0,
            max_mentees: 0,
            active_mentees: 0,
            rating: None,
        }
    }

    /// Returns `true` if the mentor can accept a new assignment.
    #[must_use]
    pub fn has_capacity(&self) -> bool {
        self.slots_available > 0 && self.active_mentees < self.max_mentees
    }

    /// Case-insensitive expertise lookup.
    #[must_use]
    pub fn has_skill(&self, skill: &str) -> bool {
        self.expertise
            .iter()
            .any(|s| s.eq_ignore_ascii_case(skill))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_requires_slots_and_mentee_headroom() {
        let mut mentor = Mentor::new("M");
        assert!(!mentor.has_capacity());

        mentor.slots_available = 1;
        mentor.max_mentees = 1;
        assert!(mentor.has_capacity());

        mentor.active_mentees = 1;
        assert!(!mentor.has_capacity());
    }

    #[test]
    fn skill_lookup_is_case_insensitive() {
        let mut mentor = Mentor::new("M");
        mentor.expertise.insert("Fundraising".to_string());
        assert!(mentor.has_skill("fundraising"));
        assert!(mentor.has_skill("FUNDRAISING"));
        assert!(!mentor.has_skill("sales"));
    }
}
