//! Result derivation for the second innings.

use super::super::phases::MatchResult;
use super::super::types::MAX_WICKETS;
use tracing::instrument;

/// Counters that decide a chase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chase {
    /// Runs needed to win.
    pub target: u32,
    /// Runs scored so far.
    pub runs: u32,
    /// Wickets lost so far.
    pub wickets: u32,
    /// Legal balls bowled so far.
    pub legal_balls: u32,
    /// Legal balls in the innings.
    pub max_legal_balls: u32,
}

impl Chase {
    /// Result if the chase is decided, `None` while it is still live.
    ///
    /// Reaching the target wins immediately. Otherwise the match is only
    /// decided once every legal ball has been bowled.
    #[instrument]
    pub fn result(&self) -> Option<MatchResult> {
        if self.runs >= self.target {
            return Some(self.chasing_won());
        }
        if self.legal_balls == self.max_legal_balls {
            return Some(self.short_of_target());
        }
        None
    }

    /// Result when the innings is closed early by the scorer.
    #[instrument]
    pub fn closing_result(&self) -> MatchResult {
        if self.runs >= self.target {
            self.chasing_won()
        } else {
            self.short_of_target()
        }
    }

    fn chasing_won(&self) -> MatchResult {
        MatchResult::ChasingWon {
            wickets_in_hand: MAX_WICKETS.saturating_sub(self.wickets),
        }
    }

    fn short_of_target(&self) -> MatchResult {
        let level = self.target.saturating_sub(1);
        if self.runs == level {
            MatchResult::Tied
        } else {
            MatchResult::DefendingWon {
                margin_runs: level - self.runs,
            }
        }
    }
}
