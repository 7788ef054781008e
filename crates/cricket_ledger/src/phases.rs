//! Match phases and terminal outcomes.

use super::types::{Side, TeamNames};
use serde::{Deserialize, Serialize};

/// Where the match is in its lifecycle.
///
/// `Setup → FirstInnings → SecondInnings → Complete`, with `Tossing`
/// reachable only from a tied `Complete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for `start_match`.
    #[default]
    Setup,
    /// First side batting.
    FirstInnings,
    /// Second side chasing the target.
    SecondInnings,
    /// Result decided.
    Complete,
    /// Tie being settled by a coin toss.
    Tossing,
}

impl Phase {
    /// Returns true while deliveries can be scored.
    pub fn is_in_play(self) -> bool {
        matches!(self, Phase::FirstInnings | Phase::SecondInnings)
    }

    /// Returns true once a result exists.
    pub fn is_finished(self) -> bool {
        matches!(self, Phase::Complete | Phase::Tossing)
    }
}

/// Outcome of a finished match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchResult {
    /// The chasing side reached the target.
    ChasingWon {
        /// Wickets the chasing side still had.
        wickets_in_hand: u32,
    },
    /// The chasing side fell short.
    DefendingWon {
        /// Runs the chase fell short by, less the tie run.
        margin_runs: u32,
    },
    /// Scores level.
    Tied,
    /// Tie settled by a coin toss.
    TossWon(Side),
}

impl MatchResult {
    /// Returns the winning side, if any.
    pub fn winner(&self) -> Option<Side> {
        match self {
            MatchResult::ChasingWon { .. } => Some(Side::Chasing),
            MatchResult::DefendingWon { .. } => Some(Side::BattingFirst),
            MatchResult::Tied => None,
            MatchResult::TossWon(side) => Some(*side),
        }
    }

    /// Returns true if the match is tied and awaiting a tie-break.
    pub fn is_tie(&self) -> bool {
        matches!(self, MatchResult::Tied)
    }

    /// Renders the result using the given team names.
    pub fn describe(&self, teams: &TeamNames) -> String {
        match self {
            MatchResult::ChasingWon { wickets_in_hand } => format!(
                "{} WON by {} wickets",
                teams.name(Side::Chasing),
                wickets_in_hand
            ),
            MatchResult::DefendingWon { margin_runs } => format!(
                "{} WON by {} runs",
                teams.name(Side::BattingFirst),
                margin_runs
            ),
            MatchResult::Tied => "MATCH TIED".to_string(),
            MatchResult::TossWon(side) => format!("{} WON by Coin Toss", teams.name(*side)),
        }
    }
}

impl std::fmt::Display for MatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.describe(&TeamNames::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_messages() {
        assert_eq!(
            MatchResult::ChasingWon { wickets_in_hand: 7 }.to_string(),
            "Team B WON by 7 wickets"
        );
        assert_eq!(
            MatchResult::DefendingWon { margin_runs: 12 }.to_string(),
            "Team A WON by 12 runs"
        );
        assert_eq!(MatchResult::Tied.to_string(), "MATCH TIED");
        assert_eq!(
            MatchResult::TossWon(Side::Chasing).to_string(),
            "Team B WON by Coin Toss"
        );
    }

    #[test]
    fn test_custom_team_names() {
        let teams = TeamNames::new("Lions", "Tigers");
        assert_eq!(
            MatchResult::DefendingWon { margin_runs: 1 }.describe(&teams),
            "Lions WON by 1 runs"
        );
    }

    #[test]
    fn test_tie_has_no_winner() {
        assert_eq!(MatchResult::Tied.winner(), None);
        assert_eq!(
            MatchResult::TossWon(Side::BattingFirst).winner(),
            Some(Side::BattingFirst)
        );
    }
}
