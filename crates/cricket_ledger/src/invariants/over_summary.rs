//! Over summaries agree with the ball ledger.

use super::super::MatchState;
use super::Invariant;

/// Invariant: the over summaries, read in order, replay the ledger.
///
/// Concatenated deliveries equal the ledger's action tags and the per-over
/// totals add up to the ledger's runs.
pub struct OversMatchLedgerInvariant;

impl Invariant<MatchState> for OversMatchLedgerInvariant {
    fn holds(state: &MatchState) -> bool {
        let ledger = state.ledger();

        let from_overs = ledger.overs().iter().flat_map(|o| o.deliveries().iter().copied());
        let from_events = ledger.events().iter().map(|e| e.action());
        let tags_match = from_overs.eq(from_events);

        let over_runs: u32 = ledger.overs().iter().map(|o| *o.total_runs()).sum();
        let event_runs: u32 = ledger.events().iter().map(|e| e.runs()).sum();

        let numbered = ledger
            .overs()
            .iter()
            .enumerate()
            .all(|(i, o)| *o.over_number() as usize == i + 1);

        tags_match && over_runs == event_runs && numbered
    }

    fn description() -> &'static str {
        "Over summaries replay the ball ledger"
    }
}
