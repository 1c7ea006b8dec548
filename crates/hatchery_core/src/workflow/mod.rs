//! Workflow operations.
//!
//! Each operation is a fixed recipe of reads and writes executed inside
//! exactly one transactional unit: any mid-recipe failure aborts the
//! whole unit and nothing becomes visible. Operations are
//! idempotent-on-retry because every write is derived from reads made
//! inside the unit and validated against current state, never from blind
//! increments.

mod assign;
mod bulk;
mod funding;
mod session;
mod startup_status;

pub use assign::{AssignmentOutcome, SessionSpec, DEFAULT_SESSION_MINUTES};
pub use bulk::{BulkUpdateOutcome, SkipReason, SkippedUpdate, StartupStatusUpdate};
pub use funding::ApplicationData;
pub use session::{FeedbackInput, SessionOutcome};

use crate::config::Config;
use crate::model::{Notification, Priority, Startup, StartupStatus};
use crate::repo::Repositories;
use crate::txn::Coordinator;
use crate::types::{EntityId, Timestamp};
use hatchery_store::DocumentStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The workflow API: one method per business transaction.
///
/// Holds the typed repositories and the coordinator; the surrounding HTTP
/// layer (out of scope) calls these methods with plain data and maps the
/// error taxonomy onto responses.
pub struct Workflows {
    store: Arc<DocumentStore>,
    repos: Repositories,
    coordinator: Coordinator,
}

impl Workflows {
    /// Creates the workflow API over a store.
    #[must_use]
    pub fn new(store: Arc<DocumentStore>, config: Config) -> Self {
        let repos = Repositories::attach(&store);
        let coordinator = Coordinator::new(Arc::clone(&store), &config);
        Self {
            store,
            repos,
            coordinator,
        }
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    /// Returns the typed repositories.
    #[must_use]
    pub fn repos(&self) -> &Repositories {
        &self.repos
    }

    pub(crate) fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }
}

impl std::fmt::Debug for Workflows {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workflows")
            .field("coordinator", &self.coordinator)
            .finish_non_exhaustive()
    }
}

/// Caller-supplied notification content; unset fields take workflow
/// defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationSpec {
    /// Short title; defaults to a status-derived one.
    pub title: Option<String>,
    /// Message body; defaults to a status-derived one.
    pub message: Option<String>,
    /// Machine-readable kind; defaults to `startup_status_changed`.
    pub kind: Option<String>,
    /// Delivery priority; defaults to medium.
    pub priority: Option<Priority>,
}

/// Builds the notification for a startup status change, addressed to the
/// startup's founder.
pub(crate) fn status_change_notification(
    startup: &Startup,
    new_status: StartupStatus,
    spec: &NotificationSpec,
) -> Notification {
    Notification {
        id: EntityId::new(),
        recipient: startup.founder,
        kind: spec
            .kind
            .clone()
            .unwrap_or_else(|| "startup_status_changed".to_string()),
        title: spec
            .title
            .clone()
            .unwrap_or_else(|| format!("{} status updated", startup.name)),
        message: spec
            .message
            .clone()
            .unwrap_or_else(|| format!("{} is now {new_status:?}", startup.name)),
        related_entity: startup.id,
        related_model: "Startup".to_string(),
        priority: spec.priority.unwrap_or(Priority::Medium),
        created_at: Timestamp::now(),
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    //! Seed helpers shared by workflow unit tests.

    use super::*;
    use crate::model::{Founder, Mentor, MentorshipRequest, Urgency};
    use crate::repo::Record;
    use std::collections::BTreeSet;
    use std::time::Duration;

    pub fn workflows() -> Workflows {
        let config = Config::new()
            .max_attempts(3)
            .base_backoff(Duration::ZERO)
            .max_backoff(Duration::ZERO);
        Workflows::new(Arc::new(DocumentStore::new()), config)
    }

    /// Commits a record outside any workflow, for test setup.
    pub fn seed<T: Record>(wf: &Workflows, record: &T) {
        let store = wf.store();
        let collection = store.collection(T::COLLECTION);
        let mut txn = store.begin();
        let mut bytes = Vec::new();
        ciborium::ser::into_writer(record, &mut bytes).unwrap();
        txn.put(collection, record.record_id().to_key(), bytes)
            .unwrap();
        store.commit(&mut txn).unwrap();
    }

    pub fn seed_founder(wf: &Workflows) -> Founder {
        let founder = Founder::new("Dana", "dana@example.com");
        seed(wf, &founder);
        founder
    }

    pub fn seed_startup(wf: &Workflows, founder: EntityId, status: StartupStatus) -> Startup {
        let mut startup = Startup::new("Acme", founder);
        startup.status = status;
        seed(wf, &startup);
        startup
    }

    pub fn seed_mentor(wf: &Workflows, skills: &[&str], slots: u32) -> Mentor {
        let mut mentor = Mentor::new("Morgan");
        mentor.expertise = skills.iter().map(|s| s.to_string()).collect();
        mentor.slots_available = slots;
        mentor.max_mentees = 5;
        seed(wf, &mentor);
        mentor
    }

    pub fn seed_request(wf: &Workflows, founder: EntityId, skills: &[&str]) -> MentorshipRequest {
        let mut request = MentorshipRequest::new(founder, "go-to-market", Urgency::High);
        request.required_skills = skills.iter().map(|s| s.to_string()).collect::<BTreeSet<_>>();
        seed(wf, &request);
        request
    }
}
