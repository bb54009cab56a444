//! # Draw Core - Foundation Crate
//!
//! **Purpose**: Define the domain vocabulary shared by every draw crate.
//!
//! # Architecture Constraints
//!
//! **This crate depends on no other draw crate.**
//! - YES Participant, prize tier and ledger types
//! - YES Unified error type
//! - YES Configuration model and validation
//! - YES Effect trait definitions (storage, randomness)
//! - NO effect handler implementations (use `draw-effects`)
//! - NO session state machine (that's `draw-session`)
//!
//! ## Core Concepts
//!
//! - **Participants**: identified by a stable business id, independent of display order
//! - **Prize tiers**: a fixed catalog where type `0` is the reserved placeholder tier
//! - **Winner ledger**: append-only winners per prize type
//! - **Effects**: storage and randomness are injected through async traits

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Configuration model for draw events
pub mod config;

/// Effect trait definitions
pub mod effects;

/// Unified draw error type
pub mod errors;

/// Participant, prize and ledger types
pub mod types;

pub use config::{ConfigError, DrawConfig, RecordNames, SessionConfig};
pub use effects::{RandomEffects, StorageEffects, StorageError};
pub use errors::{DrawError, ErrorKind, Result};
pub use types::{
    DuplicateFlag, DuplicateReason, Participant, ParticipantId, PrizeTier, PrizeType, WinnerLedger,
};
