//! Core type definitions for the store.

use std::fmt;

/// Identifier for a collection (entity type container).
///
/// Collection IDs are stable for the lifetime of a [`DocumentStore`] and
/// are assigned when collections are first registered.
///
/// [`DocumentStore`]: crate::DocumentStore
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CollectionId(pub u32);

impl CollectionId {
    /// Creates a new collection ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "coll:{}", self.0)
    }
}

/// Per-document version, bumped on every committed write.
///
/// Versions provide the conflict-detection currency for optimistic
/// transactions: a transaction records the version it observed for every
/// document it read, and commit validation rejects the transaction when
/// any observed version no longer matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(pub u64);

impl Version {
    /// Creates a version from a raw value.
    #[must_use]
    pub const fn new(v: u64) -> Self {
        Self(v)
    }

    /// Returns the raw version value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Returns the next version.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Document key within a collection.
///
/// Keys are 128-bit values, immutable once assigned and never reused.
/// Higher layers typically derive them from UUIDs.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocKey([u8; 16]);

impl DocKey {
    /// Creates a key from raw bytes.
    #[inline]
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Returns the raw bytes.
    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Creates a key from a slice.
    ///
    /// Returns `None` if the slice is not exactly 16 bytes.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        if slice.len() == 16 {
            let mut bytes = [0u8; 16];
            bytes.copy_from_slice(slice);
            Some(Self(bytes))
        } else {
            None
        }
    }
}

impl fmt::Debug for DocKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocKey(")?;
        for b in &self.0 {
            write!(f, "{b:02x}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_ordering() {
        assert!(Version::new(2) > Version::new(1));
        assert_eq!(Version::new(1).next(), Version::new(2));
    }

    #[test]
    fn dockey_from_slice() {
        assert!(DocKey::from_slice(&[0u8; 16]).is_some());
        assert!(DocKey::from_slice(&[0u8; 15]).is_none());
        assert!(DocKey::from_slice(&[0u8; 17]).is_none());
    }

    #[test]
    fn dockey_roundtrip() {
        let bytes = [7u8; 16];
        let key = DocKey::from_bytes(bytes);
        assert_eq!(key.as_bytes(), &bytes);
    }
}
