//! # Draw Effects - Production Handlers
//!
//! Stateless implementations of the effect traits defined in `draw-core`.
//!
//! **Constraint**: no fault-injecting or seeded handlers here. Those live in
//! `draw-testkit`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Randomness handlers
pub mod random;

/// Storage handlers
pub mod storage;

pub use random::RealRandomHandler;
pub use storage::{FilesystemStorageHandler, MemoryStorageHandler};
