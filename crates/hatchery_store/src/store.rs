//! The document store.

use crate::error::{StoreError, StoreResult};
use crate::faults::{Fault, FaultPlan};
use crate::txn::{PendingWrite, StoreTxn};
use crate::types::{CollectionId, DocKey, Version};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

/// A committed document: payload bytes plus its current version.
#[derive(Debug, Clone)]
pub struct VersionedDoc {
    /// Document payload (CBOR bytes).
    pub payload: Vec<u8>,
    /// Current version, bumped on every committed write.
    pub version: Version,
}

/// In-memory store of named, versioned document collections.
///
/// The store provides multi-document atomicity through buffered
/// transactions validated at commit time:
///
/// - [`begin`](Self::begin) hands out a [`StoreTxn`] that buffers writes
///   and records the version of every document it reads.
/// - [`commit`](Self::commit) takes a single commit lock, re-checks every
///   observed version, and either applies the whole write set or none of
///   it. A version mismatch fails with [`StoreError::WriteConflict`].
///
/// No lock is held between begin and commit; concurrent transactions
/// proceed freely and conflicts surface only at commit. This is the
/// conditional-write primitive the workflow layer builds on.
pub struct DocumentStore {
    /// Collection name -> id registry.
    collections: RwLock<HashMap<String, CollectionId>>,
    /// Next collection id.
    next_collection: AtomicU32,
    /// Committed documents.
    docs: RwLock<HashMap<(CollectionId, DocKey), VersionedDoc>>,
    /// Commit lock - validation and apply are a single critical section.
    commit_lock: Mutex<()>,
    /// Armed faults for commit-path tests.
    faults: Mutex<FaultPlan>,
}

impl DocumentStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            next_collection: AtomicU32::new(1),
            docs: RwLock::new(HashMap::new()),
            commit_lock: Mutex::new(()),
            faults: Mutex::new(FaultPlan::new()),
        }
    }

    /// Returns the id for a named collection, registering it if needed.
    pub fn collection(&self, name: &str) -> CollectionId {
        if let Some(id) = self.collections.read().get(name) {
            return *id;
        }
        let mut collections = self.collections.write();
        *collections.entry(name.to_string()).or_insert_with(|| {
            CollectionId::new(self.next_collection.fetch_add(1, Ordering::SeqCst))
        })
    }

    /// Begins a new transaction.
    #[must_use]
    pub fn begin(&self) -> StoreTxn {
        StoreTxn::new()
    }

    /// Gets a document within a transaction.
    ///
    /// Pending writes in the transaction shadow committed state. Reads of
    /// committed state record the observed version for commit validation.
    pub fn get(
        &self,
        txn: &mut StoreTxn,
        collection: CollectionId,
        key: DocKey,
    ) -> StoreResult<Option<Vec<u8>>> {
        if !txn.is_active() {
            return Err(StoreError::TxnInactive);
        }
        if let Some(pending) = txn.pending_write(collection, key) {
            return Ok(match pending {
                PendingWrite::Put { payload } => Some(payload.clone()),
                PendingWrite::Delete => None,
            });
        }
        let docs = self.docs.read();
        let found = docs.get(&(collection, key));
        txn.record_read(collection, key, found.map(|d| d.version));
        Ok(found.map(|d| d.payload.clone()))
    }

    /// Scans all documents in a collection within a transaction.
    ///
    /// Committed documents are overlaid with the transaction's pending
    /// writes, so a scan sees the transaction's own inserts, updates and
    /// deletes. Results are ordered by key for deterministic iteration.
    /// Every committed document seen is recorded in the read set.
    pub fn scan(
        &self,
        txn: &mut StoreTxn,
        collection: CollectionId,
    ) -> StoreResult<Vec<(DocKey, Vec<u8>)>> {
        if !txn.is_active() {
            return Err(StoreError::TxnInactive);
        }
        let mut merged: HashMap<DocKey, Vec<u8>> = HashMap::new();
        {
            let docs = self.docs.read();
            for ((c, key), doc) in docs.iter() {
                if *c == collection {
                    txn.record_read(collection, *key, Some(doc.version));
                    merged.insert(*key, doc.payload.clone());
                }
            }
        }
        // Overlay this transaction's own writes.
        for ((c, key), write) in txn.writes_in_order() {
            if *c != collection {
                continue;
            }
            match write {
                PendingWrite::Put { payload } => {
                    merged.insert(*key, payload.clone());
                }
                PendingWrite::Delete => {
                    merged.remove(key);
                }
            }
        }
        let mut result: Vec<(DocKey, Vec<u8>)> = merged.into_iter().collect();
        result.sort_by_key(|(key, _)| *key);
        Ok(result)
    }

    /// Commits a transaction.
    ///
    /// Under the commit lock, every read's observed version is validated
    /// against the current state; on any mismatch the commit fails with
    /// [`StoreError::WriteConflict`] and nothing is applied. On success
    /// all buffered writes apply atomically and versions advance.
    pub fn commit(&self, txn: &mut StoreTxn) -> StoreResult<()> {
        if !txn.is_active() {
            return Err(StoreError::TxnInactive);
        }
        let _guard = self.commit_lock.lock();

        // Armed faults fire before anything is applied.
        let touched: Vec<CollectionId> = {
            let mut seen = Vec::new();
            for (&(c, _), _) in txn.writes_in_order() {
                if !seen.contains(&c) {
                    seen.push(c);
                }
            }
            seen
        };
        if self.faults.lock().should_fail(&touched) {
            txn.mark_aborted();
            tracing::debug!(writes = txn.write_count(), "commit failed by armed fault");
            return Err(StoreError::unavailable("injected commit failure"));
        }

        let mut docs = self.docs.write();

        // Validate the read set.
        for (&(collection, key), &observed) in txn.reads() {
            let current = docs.get(&(collection, key)).map(|d| d.version);
            if current != observed {
                txn.mark_aborted();
                tracing::debug!(%collection, ?key, "commit validation failed");
                return Err(StoreError::WriteConflict { collection, key });
            }
        }

        // Apply in issue order.
        for (&(collection, key), write) in txn.writes_in_order() {
            let next_version = docs
                .get(&(collection, key))
                .map(|d| d.version.next())
                .unwrap_or(Version::new(1));
            match write {
                PendingWrite::Put { payload } => {
                    docs.insert(
                        (collection, key),
                        VersionedDoc {
                            payload: payload.clone(),
                            version: next_version,
                        },
                    );
                }
                PendingWrite::Delete => {
                    docs.remove(&(collection, key));
                }
            }
        }

        txn.mark_committed();
        Ok(())
    }

    /// Aborts a transaction, discarding all buffered writes.
    pub fn abort(&self, txn: &mut StoreTxn) {
        if txn.is_active() {
            txn.mark_aborted();
        }
    }

    /// Arms a fault for commit-path tests.
    pub fn arm_fault(&self, fault: Fault) {
        self.faults.lock().arm(fault);
    }

    /// Returns the current version of a document, if present.
    ///
    /// Bypasses any transaction; intended for test assertions.
    #[must_use]
    pub fn version_of(&self, collection: CollectionId, key: DocKey) -> Option<Version> {
        self.docs.read().get(&(collection, key)).map(|d| d.version)
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStore")
            .field("collections", &self.collections.read().len())
            .field("documents", &self.docs.read().len())
            .finish_non_exhaustive()
    }
}
