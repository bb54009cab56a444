//! Unified error system for draw sessions
//!
//! A single error type with three kinds, mirroring the coarse success/failure
//! contract callers rely on while keeping the kind around for diagnostics.

use crate::effects::StorageError;
use serde::{Deserialize, Serialize};

/// Unified error type for all draw operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum DrawError {
    /// Malformed mutation payload or configuration
    #[error("Invalid: {message}")]
    Validation {
        /// Error message describing the invalid input
        message: String,
    },

    /// Durable read or write failed, or timed out
    #[error("Persistence error: {message}")]
    Persistence {
        /// Error message describing the persistence failure
        message: String,
    },

    /// Session not initialized or record missing
    #[error("Not found: {message}")]
    NotFound {
        /// Error message describing what was not found
        message: String,
    },
}

/// Coarse error classification surfaced to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// See [`DrawError::Validation`]
    Validation,
    /// See [`DrawError::Persistence`]
    Persistence,
    /// See [`DrawError::NotFound`]
    NotFound,
}

impl DrawError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a persistence error
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Error returned by every session access made before `initialize`
    pub fn not_initialized() -> Self {
        Self::not_found("draw session has not been initialized")
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Persistence { .. } => ErrorKind::Persistence,
            Self::NotFound { .. } => ErrorKind::NotFound,
        }
    }

    /// The human-readable message without the kind prefix
    pub fn message(&self) -> &str {
        match self {
            Self::Validation { message }
            | Self::Persistence { message }
            | Self::NotFound { message } => message,
        }
    }
}

/// Standard Result type for draw operations
pub type Result<T> = std::result::Result<T, DrawError>;

impl From<StorageError> for DrawError {
    fn from(err: StorageError) -> Self {
        Self::persistence(err.to_string())
    }
}

impl From<serde_json::Error> for DrawError {
    fn from(err: serde_json::Error) -> Self {
        Self::persistence(format!("record encoding failed: {err}"))
    }
}
