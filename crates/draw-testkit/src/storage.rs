//! Fault-injecting storage handlers
//!
//! Every handler wraps a [`MemoryStorageHandler`] so tests can inspect what
//! actually reached storage.

use async_trait::async_trait;
use draw_core::effects::{StorageEffects, StorageError};
use draw_effects::MemoryStorageHandler;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Storage whose writes can be made to fail on demand
#[derive(Debug, Clone, Default)]
pub struct FlakyStorageHandler {
    inner: MemoryStorageHandler,
    fail_all_writes: Arc<AtomicBool>,
    failing_keys: Arc<Mutex<HashSet<String>>>,
    write_attempts: Arc<AtomicUsize>,
}

impl FlakyStorageHandler {
    /// Create a handler that succeeds until told otherwise
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail (or succeed again)
    pub fn fail_writes(&self, fail: bool) {
        self.fail_all_writes.store(fail, Ordering::SeqCst);
    }

    /// Make writes to one key fail
    pub fn fail_key(&self, key: impl Into<String>) {
        self.failing_keys.lock().insert(key.into());
    }

    /// Clear every injected failure
    pub fn heal(&self) {
        self.fail_writes(false);
        self.failing_keys.lock().clear();
    }

    /// Number of writes attempted so far, failed ones included
    pub fn write_attempts(&self) -> usize {
        self.write_attempts.load(Ordering::SeqCst)
    }

    /// The healthy backend underneath
    pub fn inner(&self) -> &MemoryStorageHandler {
        &self.inner
    }
}

#[async_trait]
impl StorageEffects for FlakyStorageHandler {
    async fn store(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        self.write_attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_all_writes.load(Ordering::SeqCst) || self.failing_keys.lock().contains(key)
        {
            return Err(StorageError::WriteFailed(format!(
                "injected failure writing {key}"
            )));
        }
        self.inner.store(key, value).await
    }

    async fn retrieve(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        self.inner.retrieve(key).await
    }
}

/// Storage whose writes never complete while stalled
///
/// A committing handler lands each write in the backend before hanging, like a
/// file rename that finishes after its caller gave up waiting.
#[derive(Debug, Clone, Default)]
pub struct StallingStorageHandler {
    inner: MemoryStorageHandler,
    stalled: Arc<AtomicBool>,
    commit_first: bool,
}

impl StallingStorageHandler {
    /// Create a handler that stalls every write before it lands
    pub fn stalled() -> Self {
        let handler = Self::default();
        handler.stall(true);
        handler
    }

    /// Create a handler whose writes land, then stall
    pub fn committing() -> Self {
        let handler = Self {
            commit_first: true,
            ..Self::default()
        };
        handler.stall(true);
        handler
    }

    /// Toggle stalling
    pub fn stall(&self, stalled: bool) {
        self.stalled.store(stalled, Ordering::SeqCst);
    }

    /// The backend underneath
    pub fn inner(&self) -> &MemoryStorageHandler {
        &self.inner
    }
}

#[async_trait]
impl StorageEffects for StallingStorageHandler {
    async fn store(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        if !self.stalled.load(Ordering::SeqCst) {
            return self.inner.store(key, value).await;
        }
        if self.commit_first {
            self.inner.store(key, value).await?;
        }
        std::future::pending::<()>().await;
        Ok(())
    }

    async fn retrieve(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        self.inner.retrieve(key).await
    }
}

/// Storage whose writes suspend for a fixed delay before landing
///
/// Every write yields to the runtime, so concurrent callers really interleave
/// unless something above serializes them.
#[derive(Debug, Clone)]
pub struct DelayedStorageHandler {
    inner: MemoryStorageHandler,
    delay: Duration,
}

impl DelayedStorageHandler {
    /// Create a handler that sleeps `delay` inside every write
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: MemoryStorageHandler::new(),
            delay,
        }
    }

    /// The backend underneath
    pub fn inner(&self) -> &MemoryStorageHandler {
        &self.inner
    }
}

#[async_trait]
impl StorageEffects for DelayedStorageHandler {
    async fn store(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        tokio::time::sleep(self.delay).await;
        self.inner.store(key, value).await
    }

    async fn retrieve(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        self.inner.retrieve(key).await
    }
}
