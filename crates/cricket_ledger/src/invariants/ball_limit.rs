//! Legal ball count invariant.

use super::super::MatchState;
use super::Invariant;

/// Invariant: the legal ball counter matches the ledger and never passes
/// the innings limit.
pub struct BallsWithinLimitInvariant;

impl Invariant<MatchState> for BallsWithinLimitInvariant {
    fn holds(state: &MatchState) -> bool {
        let legal_events = state
            .ledger()
            .events()
            .iter()
            .filter(|e| e.is_legal())
            .count();
        legal_events == state.legal_balls() as usize
            && state.legal_balls() <= state.max_legal_balls()
    }

    fn description() -> &'static str {
        "Legal balls match the ledger and stay within the innings limit"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Command, ExtraKind, MatchState};

    #[test]
    fn test_full_over_holds() {
        let state = MatchState::replay(1, &[Command::AddRun(1); 6]);
        assert!(BallsWithinLimitInvariant::holds(&state));
        assert_eq!(state.legal_balls(), 6);
    }

    #[test]
    fn test_extras_past_limit_hold() {
        let mut commands = vec![Command::AddRun(0); 6];
        commands.push(Command::AddExtra(ExtraKind::Wide, 1));
        commands.push(Command::AddExtra(ExtraKind::Wide, 1));
        let state = MatchState::replay(1, &commands);

        assert!(BallsWithinLimitInvariant::holds(&state));
        assert_eq!(state.ledger().len(), 8);
    }
}
