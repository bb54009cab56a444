use async_trait::async_trait;
use draw_core::effects::RandomEffects;
use parking_lot::Mutex;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded random handler: the same seed replays the same sequence.
#[derive(Debug)]
pub struct DeterministicRandomHandler {
    rng: Mutex<ChaCha8Rng>,
}

impl DeterministicRandomHandler {
    /// Create a handler from a seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }
}

#[async_trait]
impl RandomEffects for DeterministicRandomHandler {
    async fn random_index(&self, upper: usize) -> usize {
        self.rng.lock().gen_range(0..=upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn same_seed_same_sequence() {
        let a = DeterministicRandomHandler::new(7);
        let b = DeterministicRandomHandler::new(7);
        for _ in 0..16 {
            assert_eq!(a.random_index(99).await, b.random_index(99).await);
        }
    }
}
