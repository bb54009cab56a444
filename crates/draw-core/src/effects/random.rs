//! Randomness effect trait.

use async_trait::async_trait;
use std::sync::Arc;

/// Source of uniform random numbers.
#[async_trait]
pub trait RandomEffects: Send + Sync {
    /// A uniformly distributed index in `[0, upper]`, without modulo bias.
    async fn random_index(&self, upper: usize) -> usize;
}

/// Blanket implementation for Arc<T> where T: RandomEffects
#[async_trait]
impl<T: RandomEffects + ?Sized> RandomEffects for Arc<T> {
    async fn random_index(&self, upper: usize) -> usize {
        (**self).random_index(upper).await
    }
}
