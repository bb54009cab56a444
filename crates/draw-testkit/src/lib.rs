//! Draw Testing Infrastructure
//!
//! Fixtures and effect handlers shared by the test suites of the draw crates.
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! draw-testkit = { path = "../draw-testkit" }
//! ```

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

/// Participant, roster and catalog fixtures
pub mod fixtures;
/// Seeded random handler
pub mod random;
/// Fault-injecting storage handlers
pub mod storage;
/// Proptest strategies
pub mod strategies;

pub use fixtures::*;
pub use random::DeterministicRandomHandler;
pub use storage::{DelayedStorageHandler, FlakyStorageHandler, StallingStorageHandler};
