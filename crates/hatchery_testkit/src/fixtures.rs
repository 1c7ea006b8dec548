//! Test fixtures and platform helpers.
//!
//! Provides a preconfigured workflow harness and entity builders for
//! common test scenarios.

use hatchery_core::model::{Founder, Mentor, MentorshipRequest, Startup, StartupStatus, Urgency};
use hatchery_core::repo::Record;
use hatchery_core::{Config, EntityId, Workflows};
use hatchery_store::DocumentStore;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

/// Initializes tracing for test debugging; safe to call repeatedly.
///
/// Honors `RUST_LOG`; silent by default.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A workflow harness over a fresh in-memory store, tuned for tests
/// (zero backoff so retry paths run instantly).
pub struct TestPlatform {
    /// The backing store; arm faults on it directly.
    pub store: Arc<DocumentStore>,
    /// The workflow API under test.
    pub workflows: Workflows,
}

impl TestPlatform {
    /// Creates a platform with the default test configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(
            Config::new()
                .max_attempts(3)
                .base_backoff(Duration::ZERO)
                .max_backoff(Duration::ZERO),
        )
    }

    /// Creates a platform with a custom coordinator configuration.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        let store = Arc::new(DocumentStore::new());
        let workflows = Workflows::new(Arc::clone(&store), config);
        Self { store, workflows }
    }

    /// Commits a record outside any workflow, for test setup.
    pub fn seed<T: Record>(&self, record: &T) {
        let collection = self.store.collection(T::COLLECTION);
        let mut bytes = Vec::new();
        ciborium::ser::into_writer(record, &mut bytes).expect("fixture encodes");
        let mut txn = self.store.begin();
        txn.put(collection, record.record_id().to_key(), bytes)
            .expect("fixture write buffers");
        self.store.commit(&mut txn).expect("fixture commit");
    }

    /// Reads a record back, outside any workflow.
    #[must_use]
    pub fn fetch<T: Record>(&self, id: EntityId) -> Option<T> {
        let mut txn = self.store.begin();
        hatchery_core::Collection::<T>::attach(&self.store)
            .get(&self.store, &mut txn, id)
            .expect("fixture read")
    }

    /// Seeds a founder.
    pub fn seed_founder(&self, name: &str) -> Founder {
        let founder = Founder::new(name, format!("{}@example.com", name.to_lowercase()));
        self.seed(&founder);
        founder
    }

    /// Seeds a startup owned by `founder` in the given status.
    pub fn seed_startup(&self, founder: EntityId, status: StartupStatus) -> Startup {
        let mut startup = Startup::new("Acme Robotics", founder);
        startup.status = status;
        self.seed(&startup);
        startup
    }

    /// Seeds a pending mentorship request requiring `skills`.
    pub fn seed_request(&self, founder: EntityId, skills: &[&str]) -> MentorshipRequest {
        let mut request = MentorshipRequest::new(founder, "go-to-market", Urgency::High);
        request.required_skills = skills.iter().map(|s| s.to_string()).collect::<BTreeSet<_>>();
        self.seed(&request);
        request
    }
}

impl Default for TestPlatform {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for mentor fixtures.
pub struct MentorBuilder {
    mentor: Mentor,
}

impl MentorBuilder {
    /// Starts a mentor with sensible defaults: five slots, five mentee
    /// capacity, no expertise, unrated.
    #[must_use]
    pub fn named(name: &str) -> Self {
        let mut mentor = Mentor::new(name);
        mentor.slots_available = 5;
        mentor.max_mentees = 5;
        Self { mentor }
    }

    /// Sets expertise tags.
    #[must_use]
    pub fn skills(mut self, skills: &[&str]) -> Self {
        self.mentor.expertise = skills.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Sets remaining slots.
    #[must_use]
    pub fn slots(mut self, slots: u32) -> Self {
        self.mentor.slots_available = slots;
        self
    }

    /// Sets max mentees.
    #[must_use]
    pub fn max_mentees(mut self, max: u32) -> Self {
        self.mentor.max_mentees = max;
        self
    }

    /// Sets the stored rating.
    #[must_use]
    pub fn rating(mut self, rating: f64) -> Self {
        self.mentor.rating = Some(rating);
        self
    }

    /// Builds the mentor without persisting it.
    #[must_use]
    pub fn build(self) -> Mentor {
        self.mentor
    }

    /// Builds and seeds the mentor on a platform.
    pub fn seed(self, platform: &TestPlatform) -> Mentor {
        platform.seed(&self.mentor);
        self.mentor
    }
}
