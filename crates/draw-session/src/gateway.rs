//! Persistence gateway
//!
//! Typed, whole-record JSON persistence on top of a [`StorageEffects`] handler.
//! Every call is bounded by the configured timeout; expiry is reported as a
//! persistence error, like any other storage failure.

use draw_core::{DrawError, Result, StorageEffects};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

/// Named-record persistence with default-empty loads
#[derive(Clone)]
pub struct RecordGateway {
    storage: Arc<dyn StorageEffects>,
    timeout: Duration,
}

impl std::fmt::Debug for RecordGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordGateway")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl RecordGateway {
    /// Create a gateway over `storage` with a per-call timeout
    pub fn new(storage: Arc<dyn StorageEffects>, timeout: Duration) -> Self {
        Self { storage, timeout }
    }

    /// Replace the record `name` with `data`
    pub async fn save<T: Serialize + ?Sized>(&self, name: &str, data: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(data)?;
        match timeout(self.timeout, self.storage.store(name, bytes)).await {
            Ok(result) => {
                result?;
                tracing::debug!(record = name, "record saved");
                Ok(())
            }
            Err(_) => Err(DrawError::persistence(format!(
                "writing record {name} timed out after {}ms",
                self.timeout.as_millis()
            ))),
        }
    }

    /// Load the record `name`, or `T::default()` if it was never saved
    pub async fn load<T: DeserializeOwned + Default>(&self, name: &str) -> Result<T> {
        Ok(self.load_optional(name).await?.unwrap_or_default())
    }

    /// Load the record `name`, `None` if it was never saved
    pub async fn load_optional<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        let bytes = match timeout(self.timeout, self.storage.retrieve(name)).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(DrawError::persistence(format!(
                    "reading record {name} timed out after {}ms",
                    self.timeout.as_millis()
                )))
            }
        };
        match bytes {
            Some(bytes) => {
                let value = serde_json::from_slice(&bytes).map_err(|e| {
                    DrawError::persistence(format!("record {name} is not readable: {e}"))
                })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Where the record `name` lives, for reporting to callers
    pub fn locate(&self, name: &str) -> String {
        self.storage.locate(name)
    }
}
