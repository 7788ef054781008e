//! Score counters agree with the ball ledger.

use super::super::MatchState;
use super::Invariant;

/// Invariant: `runs` equals the sum of runs over every recorded event.
pub struct RunsMatchLedgerInvariant;

impl Invariant<MatchState> for RunsMatchLedgerInvariant {
    fn holds(state: &MatchState) -> bool {
        let ledger_runs: u32 = state.ledger().events().iter().map(|e| e.runs()).sum();
        ledger_runs == state.runs()
    }

    fn description() -> &'static str {
        "Runs equal the sum of recorded event runs"
    }
}

/// Invariant: `wickets` equals the number of wicket events.
pub struct WicketsMatchLedgerInvariant;

impl Invariant<MatchState> for WicketsMatchLedgerInvariant {
    fn holds(state: &MatchState) -> bool {
        let ledger_wickets = state
            .ledger()
            .events()
            .iter()
            .filter(|e| e.is_wicket())
            .count();
        ledger_wickets == state.wickets() as usize
    }

    fn description() -> &'static str {
        "Wickets equal the number of wicket events"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Command, MatchState};

    #[test]
    fn test_runs_hold_through_extras() {
        let state = MatchState::replay(
            2,
            &[
                Command::AddRun(3),
                Command::AddExtra(crate::ExtraKind::NoBall, 5),
                Command::AddRun(1),
            ],
        );
        assert!(RunsMatchLedgerInvariant::holds(&state));
        assert_eq!(state.runs(), 9);
    }

    #[test]
    fn test_wickets_hold_after_undo() {
        let state = MatchState::replay(
            2,
            &[Command::FallWicket, Command::FallWicket, Command::Undo],
        );
        assert!(WicketsMatchLedgerInvariant::holds(&state));
        assert_eq!(state.wickets(), 1);
    }

    #[test]
    fn test_corrupted_runs_violate() {
        let mut state = MatchState::replay(2, &[Command::AddRun(4)]);
        state.corrupt_runs(1);
        assert!(!RunsMatchLedgerInvariant::holds(&state));
    }
}
