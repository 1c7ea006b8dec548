//! # Hatchery Testkit
//!
//! Test utilities for Hatchery.
//!
//! This crate provides:
//! - A preconfigured platform harness ([`TestPlatform`])
//! - Entity builders and seeding helpers for common scenarios
//! - Tracing initialization for test debugging
//!
//! ## Usage
//!
//! ```rust,ignore
//! use hatchery_testkit::TestPlatform;
//!
//! #[test]
//! fn test_with_platform() {
//!     let platform = TestPlatform::new();
//!     let founder = platform.seed_founder("Dana");
//!     // ... workflow operations
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;

pub use fixtures::{init_tracing, MentorBuilder, TestPlatform};
