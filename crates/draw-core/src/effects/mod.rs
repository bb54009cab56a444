//! Effect trait definitions
//!
//! # Effect Classification
//!
//! - **Category**: Infrastructure Effect
//! - **Implementation**: `draw-effects` (production), `draw-testkit` (deterministic and faulty)
//! - **Usage**: the session crate receives handlers as `Arc<dyn ...>` and never touches
//!   the filesystem or a random source directly

/// Randomness effects
pub mod random;

/// Key/value storage effects
pub mod storage;

pub use random::RandomEffects;
pub use storage::{StorageEffects, StorageError};
