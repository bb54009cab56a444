use crate::fixtures::participant;
use draw_core::{Participant, PrizeType};
use proptest::prelude::*;

/// One mutating session call, generated for property tests
#[derive(Debug, Clone)]
pub enum MutationStep {
    /// `record_winners(prize_type, winners)`
    Winners(PrizeType, Vec<Participant>),
    /// `record_absent(participants)`
    Absent(Vec<Participant>),
}

/// Non-empty participant batches drawn from ids `1..=max_id`
pub fn arb_batch(max_id: usize) -> impl Strategy<Value = Vec<Participant>> {
    prop::collection::vec(1..=max_id, 1..4)
        .prop_map(|ids| ids.into_iter().map(participant).collect())
}

/// Mutations against tiers 0..=3, occasionally naming ids beyond the roster
pub fn arb_mutation(roster_size: usize) -> impl Strategy<Value = MutationStep> {
    let max_id = roster_size + 2;
    prop_oneof![
        3 => (0i64..=3, arb_batch(max_id))
            .prop_map(|(ty, batch)| MutationStep::Winners(PrizeType::new(ty), batch)),
        1 => arb_batch(max_id).prop_map(MutationStep::Absent),
    ]
}

/// Sequences of up to `max_len` mutations
pub fn arb_mutations(
    roster_size: usize,
    max_len: usize,
) -> impl Strategy<Value = Vec<MutationStep>> {
    prop::collection::vec(arb_mutation(roster_size), 0..=max_len)
}
