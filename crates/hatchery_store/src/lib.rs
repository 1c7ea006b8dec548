//! # Hatchery Store
//!
//! In-memory entity store for the Hatchery platform core.
//!
//! This crate provides:
//! - Named collections of versioned CBOR payloads
//! - Multi-document transactions with optimistic concurrency control
//! - All-or-nothing commit under a single commit lock
//! - Deterministic fault injection for atomicity tests
//!
//! The store is deliberately byte-oriented: typed encoding/decoding lives
//! in `hatchery_core`, which layers typed collections on top of this crate.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod faults;
mod store;
mod txn;
mod types;

pub use error::{StoreError, StoreResult};
pub use faults::{Fault, FaultPlan};
pub use store::{DocumentStore, VersionedDoc};
pub use txn::{PendingWrite, StoreTxn, TxnState};
pub use types::{CollectionId, DocKey, Version};
