//! Random order generator tests
//!
//! Permutation property plus a basic positional uniformity check.

use draw_effects::RealRandomHandler;
use draw_session::shuffle;
use draw_testkit::DeterministicRandomHandler;

#[tokio::test]
async fn shuffle_is_a_permutation() {
    let random = RealRandomHandler::new();
    for len in [2usize, 3, 10, 101] {
        let original: Vec<usize> = (0..len).collect();
        let mut shuffled = original.clone();
        shuffle(&random, &mut shuffled).await;

        let mut sorted = shuffled.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, original, "length {len}");
    }
}

#[tokio::test]
async fn every_position_is_equally_likely() {
    const LEN: usize = 5;
    const TRIALS: usize = 20_000;

    let random = DeterministicRandomHandler::new(2024);
    // counts[item][position]
    let mut counts = [[0usize; LEN]; LEN];
    for _ in 0..TRIALS {
        let mut items: Vec<usize> = (0..LEN).collect();
        shuffle(&random, &mut items).await;
        for (position, item) in items.into_iter().enumerate() {
            counts[item][position] += 1;
        }
    }

    // expected 4000 per cell, standard deviation about 57
    let expected = TRIALS / LEN;
    let tolerance = expected / 10;
    for (item, row) in counts.iter().enumerate() {
        for (position, &count) in row.iter().enumerate() {
            assert!(
                count.abs_diff(expected) <= tolerance,
                "item {item} landed in position {position} {count} times, expected about {expected}"
            );
        }
    }
}

#[tokio::test]
async fn all_orderings_of_three_appear() {
    let random = DeterministicRandomHandler::new(5);
    let mut seen = std::collections::HashSet::new();
    for _ in 0..600 {
        let mut items = ['a', 'b', 'c'];
        shuffle(&random, &mut items).await;
        seen.insert(items);
    }
    assert_eq!(seen.len(), 6);
}
