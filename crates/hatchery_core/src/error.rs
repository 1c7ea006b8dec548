//! Error types for the Hatchery core.

use crate::types::EntityId;
use hatchery_store::StoreError;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors surfaced by workflow operations and the transaction coordinator.
///
/// The taxonomy is fixed: [`Transient`](CoreError::Transient) and
/// [`Conflict`](CoreError::Conflict) are retry-eligible inside the
/// coordinator; everything else is terminal and propagates to the caller
/// unchanged.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity kind (collection name).
        entity: &'static str,
        /// The id that failed to resolve.
        id: EntityId,
    },

    /// A domain invariant would be violated by the requested write.
    #[error("invariant violation: {message}")]
    InvariantViolation {
        /// Description of the violated invariant.
        message: String,
    },

    /// Concurrent modification detected at commit.
    #[error("conflict: {message}")]
    Conflict {
        /// Description of the conflict.
        message: String,
    },

    /// Transient failure; the unit may be retried.
    #[error("transient failure: {message}")]
    Transient {
        /// Description of the failure.
        message: String,
    },

    /// Entity payload failed to encode or decode.
    #[error("codec error: {message}")]
    Codec {
        /// Description of the failure.
        message: String,
    },
}

impl CoreError {
    /// Creates a not-found error.
    pub fn not_found(entity: &'static str, id: EntityId) -> Self {
        Self::NotFound { entity, id }
    }

    /// Creates an invariant-violation error.
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation {
            message: message.into(),
        }
    }

    /// Creates a transient error.
    pub fn transient(message: impl Into<String>) -> Self {
        Self::Transient {
            message: message.into(),
        }
    }

    /// Creates a codec error.
    pub fn codec(message: impl Into<String>) -> Self {
        Self::Codec {
            message: message.into(),
        }
    }

    /// Returns `true` if the coordinator may retry the unit.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transient { .. } | Self::Conflict { .. })
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::WriteConflict { collection, key } => Self::Conflict {
                message: format!("concurrent modification of {key:?} in {collection}"),
            },
            StoreError::Unavailable { message } => Self::Transient { message },
            StoreError::TxnInactive => Self::InvariantViolation {
                message: "write issued outside an active transactional unit".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_kinds() {
        assert!(CoreError::transient("x").is_retryable());
        assert!(CoreError::Conflict {
            message: "x".into()
        }
        .is_retryable());
        assert!(!CoreError::invariant("x").is_retryable());
        assert!(!CoreError::not_found("mentor", EntityId::new()).is_retryable());
    }

    #[test]
    fn store_error_mapping() {
        let err: CoreError = StoreError::unavailable("down").into();
        assert!(matches!(err, CoreError::Transient { .. }));
    }
}
