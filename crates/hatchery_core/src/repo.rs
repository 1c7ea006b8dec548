//! Typed collections over the document store.
//!
//! Each entity type maps to one named store collection via the [`Record`]
//! trait; [`Collection`] handles CBOR encoding/decoding and the
//! not-found mapping. The [`Repositories`] bundle is what workflows get
//! injected with - entity access is fully typed, with no runtime lookup
//! of models by name.
//!
//! There is deliberately no query DSL: filtering and aggregation are done
//! with host-language iterators over [`Collection::scan`].

use crate::error::{CoreError, CoreResult};
use crate::model::{
    Founder, FundingApplication, Mentor, MentorshipRequest, Notification, Startup,
};
use crate::types::EntityId;
use hatchery_store::{CollectionId, DocumentStore, StoreTxn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;

/// Trait for entities stored in a typed collection.
pub trait Record: Serialize + DeserializeOwned {
    /// Name of the backing store collection.
    const COLLECTION: &'static str;

    /// The entity's stable, immutable identifier.
    fn record_id(&self) -> EntityId;
}

impl Record for Mentor {
    const COLLECTION: &'static str = "mentors";
    fn record_id(&self) -> EntityId {
        self.id
    }
}

impl Record for Startup {
    const COLLECTION: &'static str = "startups";
    fn record_id(&self) -> EntityId {
        self.id
    }
}

impl Record for Founder {
    const COLLECTION: &'static str = "founders";
    fn record_id(&self) -> EntityId {
        self.id
    }
}

impl Record for MentorshipRequest {
    const COLLECTION: &'static str = "mentorship_requests";
    fn record_id(&self) -> EntityId {
        self.id
    }
}

impl Record for FundingApplication {
    const COLLECTION: &'static str = "funding_applications";
    fn record_id(&self) -> EntityId {
        self.id
    }
}

impl Record for Notification {
    const COLLECTION: &'static str = "notifications";
    fn record_id(&self) -> EntityId {
        self.id
    }
}

/// A typed collection of entities of type `T`.
#[derive(Debug)]
pub struct Collection<T: Record> {
    collection_id: CollectionId,
    _marker: PhantomData<T>,
}

impl<T: Record> Clone for Collection<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Record> Copy for Collection<T> {}

impl<T: Record> Collection<T> {
    /// Binds the collection to its store-side counterpart, registering it
    /// if needed.
    #[must_use]
    pub fn attach(store: &DocumentStore) -> Self {
        Self {
            collection_id: store.collection(T::COLLECTION),
            _marker: PhantomData,
        }
    }

    /// Returns the backing store collection id.
    #[must_use]
    pub fn id(&self) -> CollectionId {
        self.collection_id
    }

    /// Gets an entity by id within a transaction.
    ///
    /// Sees the transaction's own uncommitted writes.
    pub fn get(
        &self,
        store: &DocumentStore,
        txn: &mut StoreTxn,
        id: EntityId,
    ) -> CoreResult<Option<T>> {
        match store.get(txn, self.collection_id, id.to_key())? {
            Some(bytes) => Ok(Some(decode(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Gets an entity by id, failing with `NotFound` if absent.
    pub fn require(
        &self,
        store: &DocumentStore,
        txn: &mut StoreTxn,
        id: EntityId,
    ) -> CoreResult<T> {
        self.get(store, txn, id)?
            .ok_or_else(|| CoreError::not_found(T::COLLECTION, id))
    }

    /// Buffers an insert or update of an entity in the transaction.
    pub fn put(&self, txn: &mut StoreTxn, record: &T) -> CoreResult<()> {
        let bytes = encode(record)?;
        txn.put(self.collection_id, record.record_id().to_key(), bytes)?;
        Ok(())
    }

    /// Scans all entities in the collection within a transaction.
    ///
    /// **Warning**: full scan; the transaction's own pending writes are
    /// overlaid, so aggregates computed from the result include this
    /// unit's uncommitted changes.
    pub fn scan(&self, store: &DocumentStore, txn: &mut StoreTxn) -> CoreResult<Vec<T>> {
        let raw = store.scan(txn, self.collection_id)?;
        let mut result = Vec::with_capacity(raw.len());
        for (_, bytes) in raw {
            result.push(decode(&bytes)?);
        }
        Ok(result)
    }
}

fn encode<T: Serialize>(record: &T) -> CoreResult<Vec<u8>> {
    let mut bytes = Vec::new();
    ciborium::ser::into_writer(record, &mut bytes)
        .map_err(|e| CoreError::codec(e.to_string()))?;
    Ok(bytes)
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> CoreResult<T> {
    ciborium::de::from_reader(bytes).map_err(|e| CoreError::codec(e.to_string()))
}

/// The typed collections the workflow layer operates on.
///
/// Injected into workflows at construction; one instance per store.
#[derive(Debug, Clone, Copy)]
pub struct Repositories {
    /// Mentor profiles.
    pub mentors: Collection<Mentor>,
    /// Startups.
    pub startups: Collection<Startup>,
    /// Founder user records.
    pub founders: Collection<Founder>,
    /// Mentorship requests (with embedded sessions).
    pub requests: Collection<MentorshipRequest>,
    /// Funding applications.
    pub applications: Collection<FundingApplication>,
    /// Notification records.
    pub notifications: Collection<Notification>,
}

impl Repositories {
    /// Binds all collections against a store.
    #[must_use]
    pub fn attach(store: &DocumentStore) -> Self {
        Self {
            mentors: Collection::attach(store),
            startups: Collection::attach(store),
            founders: Collection::attach(store),
            requests: Collection::attach(store),
            applications: Collection::attach(store),
            notifications: Collection::attach(store),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StartupStatus;

    #[test]
    fn put_get_roundtrip() {
        let store = DocumentStore::new();
        let repos = Repositories::attach(&store);
        let startup = Startup::new("Acme", EntityId::new());

        let mut txn = store.begin();
        repos.startups.put(&mut txn, &startup).unwrap();
        store.commit(&mut txn).unwrap();

        let mut txn = store.begin();
        let found = repos.startups.get(&store, &mut txn, startup.id).unwrap();
        assert_eq!(found, Some(startup));
    }

    #[test]
    fn require_maps_to_not_found() {
        let store = DocumentStore::new();
        let repos = Repositories::attach(&store);
        let missing = EntityId::new();

        let mut txn = store.begin();
        let result = repos.startups.require(&store, &mut txn, missing);
        match result {
            Err(CoreError::NotFound { entity, id }) => {
                assert_eq!(entity, "startups");
                assert_eq!(id, missing);
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn scan_sees_pending_writes() {
        let store = DocumentStore::new();
        let repos = Repositories::attach(&store);

        let committed = Startup::new("A", EntityId::new());
        let mut txn = store.begin();
        repos.startups.put(&mut txn, &committed).unwrap();
        store.commit(&mut txn).unwrap();

        let mut txn = store.begin();
        let mut updated = committed.clone();
        updated.status = StartupStatus::Approved;
        repos.startups.put(&mut txn, &updated).unwrap();
        let pending = Startup::new("B", EntityId::new());
        repos.startups.put(&mut txn, &pending).unwrap();

        let scanned = repos.startups.scan(&store, &mut txn).unwrap();
        assert_eq!(scanned.len(), 2);
        assert!(scanned
            .iter()
            .any(|s| s.id == committed.id && s.status == StartupStatus::Approved));
        assert!(scanned.iter().any(|s| s.id == pending.id));
    }

    #[test]
    fn collections_are_distinct() {
        let store = DocumentStore::new();
        let repos = Repositories::attach(&store);
        assert_ne!(repos.mentors.id(), repos.startups.id());
        assert_ne!(repos.requests.id(), repos.notifications.id());
    }
}
