//! Random effect handlers
//!
//! This is the only place the draw crates reach for `rand::thread_rng()`.

use async_trait::async_trait;
use draw_core::effects::RandomEffects;
use rand::Rng;

/// Real random handler backed by the thread-local RNG
#[derive(Debug, Clone, Default)]
pub struct RealRandomHandler;

impl RealRandomHandler {
    /// Create a new real random handler
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RandomEffects for RealRandomHandler {
    async fn random_index(&self, upper: usize) -> usize {
        rand::thread_rng().gen_range(0..=upper)
    }
}
