//! Mentor-matching engine.
//!
//! [`rank_mentors`] is a pure function over a request and a mentor pool:
//! no state is touched, no errors are raised, and identical inputs always
//! produce identical output - the ranking is shown to end users as the
//! rationale for a match, so every sub-score must be reproducible.

use crate::model::{Mentor, MentorshipRequest};
use crate::types::EntityId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Weights for combining sub-scores into a total.
///
/// The semantic weight applies only to mentors that carry a semantic
/// signal; for the rest it is redistributed proportionally over the other
/// three weights, so the weight mass is the same for every mentor and
/// totals remain comparable across the pool.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchWeights {
    /// Weight of the skill-coverage sub-score.
    pub skill: f64,
    /// Weight of the availability sub-score.
    pub availability: f64,
    /// Weight of the rating sub-score.
    pub rating: f64,
    /// Weight of the semantic-similarity sub-score, when present.
    pub semantic: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            skill: 0.4,
            availability: 0.2,
            rating: 0.2,
            semantic: 0.2,
        }
    }
}

impl MatchWeights {
    fn mass(&self) -> f64 {
        self.skill + self.availability + self.rating + self.semantic
    }
}

/// The explainable sub-score breakdown for one mentor, each on a 0-100
/// scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Subscores {
    /// Share of the request's required skills covered by the mentor.
    pub skill: f64,
    /// 100 when the mentor can take a new mentee, 0 otherwise.
    pub availability: f64,
    /// Stored average rating rescaled from 1-5 to 0-100; 0 when unrated.
    pub rating: f64,
    /// Semantic similarity, when a signal was supplied for this mentor.
    pub semantic: Option<f64>,
}

/// One entry in a ranked match list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCandidate {
    /// The scored mentor.
    pub mentor: EntityId,
    /// Weighted total on a 0-100 scale.
    pub total: f64,
    /// Per-component breakdown.
    pub subscores: Subscores,
}

impl MatchCandidate {
    /// Returns `true` if the mentor is at capacity ("currently full").
    ///
    /// Full mentors stay in the ranked list so callers can display or
    /// filter them; this flag is how they are told apart.
    #[must_use]
    pub fn is_currently_full(&self) -> bool {
        self.subscores.availability == 0.0
    }
}

/// Ranks a mentor pool against a request.
///
/// `semantic` optionally carries a per-mentor similarity signal in
/// `[0, 1]` from an external embedding service; mentors without a signal
/// are scored with the semantic weight redistributed (never penalized for
/// the signal's absence, and never an error).
///
/// Ordering: descending total, then descending rating sub-score, then
/// ascending mentor id - fully deterministic, including on exact ties.
#[must_use]
pub fn rank_mentors(
    request: &MentorshipRequest,
    pool: &[Mentor],
    weights: &MatchWeights,
    semantic: Option<&BTreeMap<EntityId, f64>>,
) -> Vec<MatchCandidate> {
    let mut ranked: Vec<MatchCandidate> = pool
        .iter()
        .map(|mentor| score_mentor(request, mentor, weights, semantic))
        .collect();

    ranked.sort_by(|a, b| {
        b.total
            .total_cmp(&a.total)
            .then(b.subscores.rating.total_cmp(&a.subscores.rating))
            .then(a.mentor.cmp(&b.mentor))
    });
    ranked
}

fn score_mentor(
    request: &MentorshipRequest,
    mentor: &Mentor,
    weights: &MatchWeights,
    semantic: Option<&BTreeMap<EntityId, f64>>,
) -> MatchCandidate {
    let skill = skill_score(request, mentor);
    let availability = if mentor.has_capacity() { 100.0 } else { 0.0 };
    let rating = rating_score(mentor);
    let semantic_score = semantic
        .and_then(|signals| signals.get(&mentor.id))
        .map(|similarity| (similarity.clamp(0.0, 1.0)) * 100.0);

    let total = match semantic_score {
        Some(sem) => {
            weights.skill * skill
                + weights.availability * availability
                + weights.rating * rating
                + weights.semantic * sem
        }
        None => {
            // Redistribute the semantic weight so the mass is unchanged.
            let base = weights.skill + weights.availability + weights.rating;
            let factor = if base > 0.0 { weights.mass() / base } else { 0.0 };
            factor
                * (weights.skill * skill
                    + weights.availability * availability
                    + weights.rating * rating)
        }
    };

    MatchCandidate {
        mentor: mentor.id,
        total,
        subscores: Subscores {
            skill,
            availability,
            rating,
            semantic: semantic_score,
        },
    }
}

/// Share of required skills found in the mentor's expertise
/// (case-insensitive exact match), scaled to 100. A request with no
/// required skills is vacuously covered by every mentor.
fn skill_score(request: &MentorshipRequest, mentor: &Mentor) -> f64 {
    if request.required_skills.is_empty() {
        return 100.0;
    }
    let covered = request
        .required_skills
        .iter()
        .filter(|skill| mentor.has_skill(skill))
        .count();
    covered as f64 / request.required_skills.len() as f64 * 100.0
}

/// Stored 1-5 rating rescaled linearly to 0-100; unrated mentors score 0.
fn rating_score(mentor: &Mentor) -> f64 {
    match mentor.rating {
        Some(rating) => ((rating.clamp(1.0, 5.0) - 1.0) / 4.0) * 100.0,
        None => 0.0,
    }
}
