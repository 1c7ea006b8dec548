//! Founder user records.

use crate::types::EntityId;
use serde::{Deserialize, Serialize};

/// A founder: the user who owns startups and receives their
/// notifications. Authentication and profile management live outside the
/// core; this is the slice the workflows need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Founder {
    /// Entity id.
    pub id: EntityId,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
}

impl Founder {
    /// Creates a founder.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            email: email.into(),
        }
    }
}
