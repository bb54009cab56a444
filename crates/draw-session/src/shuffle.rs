//! Random order generator

use draw_core::RandomEffects;

/// Shuffle `items` in place with a uniform random permutation.
///
/// Fisher–Yates from the last element down: at step `i` an index is drawn
/// uniformly from `[0, i]` and swapped into position `i`.
pub async fn shuffle<T, R>(random: &R, items: &mut [T])
where
    T: Send,
    R: RandomEffects + ?Sized,
{
    for i in (1..items.len()).rev() {
        let j = random.random_index(i).await;
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use draw_testkit::DeterministicRandomHandler;

    #[tokio::test]
    async fn empty_and_single_are_untouched() {
        let random = DeterministicRandomHandler::new(1);
        let mut empty: Vec<u8> = Vec::new();
        shuffle(&random, &mut empty).await;
        assert!(empty.is_empty());

        let mut single = vec![42];
        shuffle(&random, &mut single).await;
        assert_eq!(single, [42]);
    }

    #[tokio::test]
    async fn same_seed_same_order() {
        let mut a: Vec<u32> = (0..50).collect();
        let mut b = a.clone();
        shuffle(&DeterministicRandomHandler::new(9), &mut a).await;
        shuffle(&DeterministicRandomHandler::new(9), &mut b).await;
        assert_eq!(a, b);
    }
}
