//! # Hatchery Core
//!
//! Transactional core of the Hatchery incubator-management platform.
//!
//! This crate provides:
//! - Domain entities with explicit status state machines
//! - Typed collections over the versioned document store
//! - A transaction coordinator with bounded retry and backoff
//! - The five workflow operations (mentor assignment, startup status
//!   change, funding submission, session completion, bulk updates)
//! - The pure, deterministic mentor-matching engine
//!
//! Page rendering, routing, authentication and delivery of notifications
//! live outside this crate; they consume the workflow and matching APIs
//! re-exported from the crate root.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod matching;
pub mod model;
pub mod repo;
pub mod txn;
pub mod types;
pub mod workflow;

pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use matching::{rank_mentors, MatchCandidate, MatchWeights, Subscores};
pub use repo::{Collection, Record, Repositories};
pub use txn::{Coordinator, RetryPolicy};
pub use types::{EntityId, Timestamp};
pub use workflow::Workflows;
