//! Error types for the store.

use crate::types::{CollectionId, DocKey};
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Commit validation found a document modified since this transaction
    /// observed it.
    #[error("write conflict on document {key:?} in collection {collection}")]
    WriteConflict {
        /// The collection where the conflict occurred.
        collection: CollectionId,
        /// The document that conflicted.
        key: DocKey,
    },

    /// The store was transiently unavailable; the operation may be retried.
    #[error("store unavailable: {message}")]
    Unavailable {
        /// Description of the failure.
        message: String,
    },

    /// Operation attempted on a transaction that is no longer active.
    #[error("transaction not active")]
    TxnInactive,
}

impl StoreError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Returns `true` if the error is transient and retry-eligible.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}
