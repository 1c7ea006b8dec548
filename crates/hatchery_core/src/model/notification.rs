//! Notification records.

use crate::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};

/// Delivery priority of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Batched delivery is fine.
    Low,
    /// Normal delivery.
    Medium,
    /// Deliver promptly.
    High,
}

/// A notification to a platform user.
///
/// Notifications are created only as a side effect of a workflow
/// operation, in the same transactional unit as the state change they
/// describe, and are never mutated by the core afterwards. Delivery is
/// the notification emitter's concern, outside the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Entity id.
    pub id: EntityId,
    /// The user this notification addresses.
    pub recipient: EntityId,
    /// Machine-readable kind, e.g. `startup_status_changed`.
    pub kind: String,
    /// Short title.
    pub title: String,
    /// Message body.
    pub message: String,
    /// The entity this notification is about.
    pub related_entity: EntityId,
    /// The model name of the related entity, e.g. `"Startup"`.
    pub related_model: String,
    /// Delivery priority.
    pub priority: Priority,
    /// Creation time.
    pub created_at: Timestamp,
}
