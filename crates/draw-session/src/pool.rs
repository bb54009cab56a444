//! Eligible pool derivation

use draw_core::{Participant, ParticipantId, WinnerLedger};
use std::collections::HashSet;

/// Ids excluded from further draws: every winner of every tier and every absentee.
pub fn excluded_ids<'a>(
    ledger: &'a WinnerLedger,
    absentees: &'a [Participant],
) -> HashSet<&'a ParticipantId> {
    ledger
        .all_winners()
        .chain(absentees)
        .map(|p| &p.id)
        .collect()
}

/// Roster minus winners and absentees, in roster order.
///
/// Linear in roster, ledger and absentee sizes.
pub fn derive_eligible_pool(
    roster: &[Participant],
    ledger: &WinnerLedger,
    absentees: &[Participant],
) -> Vec<Participant> {
    let excluded = excluded_ids(ledger, absentees);
    roster
        .iter()
        .filter(|p| !excluded.contains(&p.id))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use draw_core::PrizeType;
    use draw_testkit::{participant, participants};

    #[test]
    fn empty_exclusions_keep_roster() {
        let roster = participants(4);
        let pool = derive_eligible_pool(&roster, &WinnerLedger::new(), &[]);
        assert_eq!(pool, roster);
    }

    #[test]
    fn excludes_winners_and_absentees_in_roster_order() {
        let roster = participants(5);
        let mut ledger = WinnerLedger::new();
        ledger.append(PrizeType::new(2), [participant(4)]);
        ledger.append(PrizeType::new(1), [participant(1)]);

        let pool = derive_eligible_pool(&roster, &ledger, &[participant(3)]);
        let ids: Vec<_> = pool.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["2", "5"]);
    }

    #[test]
    fn unknown_ids_do_not_affect_pool() {
        let roster = participants(2);
        let pool = derive_eligible_pool(&roster, &WinnerLedger::new(), &[participant(99)]);
        assert_eq!(pool, roster);
    }
}
