//! # Draw Session - State Machine Crate
//!
//! **Purpose**: Keep the authoritative record of a live prize draw: who won
//! which tier, who was marked absent, and who is still eligible.
//!
//! # Architecture Constraints
//!
//! - YES Session lifecycle, mutation and derivation logic
//! - YES Typed record persistence through injected `StorageEffects`
//! - YES Export matrix formatting
//! - NO direct filesystem or RNG access (handlers come from `draw-effects`)
//! - NO transport (the [`service`] facade is what a transport mounts)
//! - NO winner selection: winners are inputs, never drawn here
//!
//! ## Invariants
//!
//! - The eligible pool is always the roster minus every winner and absentee,
//!   in roster order, recomputed after each mutation
//! - Winners and absentees are append-only until an explicit reset
//! - A mutation whose record write fails leaves the session unchanged

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Export matrix formatting
pub mod export;

/// Typed record persistence
pub mod gateway;

/// Eligible pool derivation
pub mod pool;

/// Roster source parsing
pub mod roster;

/// Service facade and payload contracts
pub mod service;

/// Random order generator
pub mod shuffle;

/// The session state machine
pub mod store;

pub use export::{build_export_matrix, ExportMatrix, NAME_HEADER};
pub use gateway::RecordGateway;
pub use pool::derive_eligible_pool;
pub use roster::{load_roster, parse_roster, RosterRow};
pub use service::{
    DrawService, ExportResponse, OneOrMany, RecordAbsentRequest, RecordWinnersRequest,
    StateResponse, Status, StatusResponse,
};
pub use shuffle::shuffle;
pub use store::{MutationReceipt, SessionState, SessionStore};
