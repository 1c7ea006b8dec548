//! Transaction state and write buffering.

use crate::error::{StoreError, StoreResult};
use crate::types::{CollectionId, DocKey, Version};
use std::collections::HashMap;

/// State of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxnState {
    /// Transaction is active and can perform operations.
    Active,
    /// Transaction has been committed.
    Committed,
    /// Transaction has been aborted.
    Aborted,
}

/// Represents a pending write in a transaction.
#[derive(Debug, Clone)]
pub enum PendingWrite {
    /// Insert or update a document.
    Put {
        /// Document payload (CBOR bytes).
        payload: Vec<u8>,
    },
    /// Delete a document.
    Delete,
}

/// A buffered store transaction.
///
/// All writes are buffered until commit; nothing issued through a
/// transaction is observable outside a successful commit. Reads record
/// the version they observed so commit validation can detect concurrent
/// modification. Dropping an uncommitted transaction discards the buffer,
/// which is equivalent to an abort - no lock is held between begin and
/// commit.
#[derive(Debug)]
pub struct StoreTxn {
    /// Current state.
    state: TxnState,
    /// Pending writes, keyed by (collection, key).
    writes: HashMap<(CollectionId, DocKey), PendingWrite>,
    /// Write issue order; commit applies writes in this order.
    write_order: Vec<(CollectionId, DocKey)>,
    /// Read set: (collection, key) -> observed version (`None` = absent).
    reads: HashMap<(CollectionId, DocKey), Option<Version>>,
}

impl StoreTxn {
    pub(crate) fn new() -> Self {
        Self {
            state: TxnState::Active,
            writes: HashMap::new(),
            write_order: Vec::new(),
            reads: HashMap::new(),
        }
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> TxnState {
        self.state
    }

    /// Checks if the transaction is still active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state == TxnState::Active
    }

    /// Buffers a put (insert or update).
    pub fn put(
        &mut self,
        collection: CollectionId,
        key: DocKey,
        payload: Vec<u8>,
    ) -> StoreResult<()> {
        self.ensure_active()?;
        let slot = (collection, key);
        if self.writes.insert(slot, PendingWrite::Put { payload }).is_none() {
            self.write_order.push(slot);
        }
        Ok(())
    }

    /// Buffers a delete.
    pub fn delete(&mut self, collection: CollectionId, key: DocKey) -> StoreResult<()> {
        self.ensure_active()?;
        let slot = (collection, key);
        if self.writes.insert(slot, PendingWrite::Delete).is_none() {
            self.write_order.push(slot);
        }
        Ok(())
    }

    /// Records a read for conflict detection.
    ///
    /// Reads of documents this transaction has already written are not
    /// recorded - the pending write shadows the committed version.
    pub(crate) fn record_read(
        &mut self,
        collection: CollectionId,
        key: DocKey,
        observed: Option<Version>,
    ) {
        let slot = (collection, key);
        if !self.writes.contains_key(&slot) {
            self.reads.entry(slot).or_insert(observed);
        }
    }

    /// Gets a pending write for a document, if any.
    #[must_use]
    pub fn pending_write(&self, collection: CollectionId, key: DocKey) -> Option<&PendingWrite> {
        self.writes.get(&(collection, key))
    }

    /// Returns `true` if the write set touches the given collection.
    #[must_use]
    pub fn touches(&self, collection: CollectionId) -> bool {
        self.write_order.iter().any(|(c, _)| *c == collection)
    }

    /// Returns the number of buffered writes.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.write_order.len()
    }

    pub(crate) fn writes_in_order(
        &self,
    ) -> impl Iterator<Item = (&(CollectionId, DocKey), &PendingWrite)> {
        self.write_order.iter().map(move |slot| {
            // Every slot in write_order has an entry in writes.
            (slot, &self.writes[slot])
        })
    }

    pub(crate) fn reads(&self) -> &HashMap<(CollectionId, DocKey), Option<Version>> {
        &self.reads
    }

    pub(crate) fn mark_committed(&mut self) {
        self.state = TxnState::Committed;
    }

    pub(crate) fn mark_aborted(&mut self) {
        self.state = TxnState::Aborted;
    }

    fn ensure_active(&self) -> StoreResult<()> {
        if self.is_active() {
            Ok(())
        } else {
            Err(StoreError::TxnInactive)
        }
    }
}
