//! Single-owner command surface over the match reducer.

use super::action::{Command, Rejection};
use super::phases::{MatchResult, Phase};
use super::state::MatchState;
use super::toss::toss;
use super::types::{BallEvent, ExtraKind, InningsSnapshot, OverSummary, Side, TeamNames};
use rand::Rng;
use std::sync::Arc;
use tracing::{debug, instrument};

/// What happened to a dispatched command.
///
/// Ignored commands are part of normal play (a button pressed after the
/// last ball, an undo with nothing to undo), so this is not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// The state moved on.
    Applied,
    /// The state is unchanged.
    Ignored(Rejection),
}

impl Dispatch {
    /// Returns true if the command changed the match.
    pub fn is_applied(&self) -> bool {
        matches!(self, Dispatch::Applied)
    }
}

/// The scorer: owns the current `MatchState` and the team names.
///
/// Team names survive resets and super overs; only the match state is
/// replaced.
#[derive(Debug, Clone)]
pub struct Scorer {
    state: MatchState,
    teams: TeamNames,
}

impl Scorer {
    /// Creates a scorer in setup with the given overs count.
    #[instrument(skip(teams))]
    pub fn new(total_overs: u32, teams: TeamNames) -> Self {
        Self {
            state: MatchState::new(total_overs),
            teams,
        }
    }

    /// Resumes scoring from an existing state.
    pub fn from_state(state: MatchState, teams: TeamNames) -> Self {
        Self { state, teams }
    }

    /// Runs a command through the reducer, keeping the old state on rejection.
    #[instrument(skip(self), fields(phase = ?self.state.phase()))]
    pub fn dispatch(&mut self, command: Command) -> Dispatch {
        match self.state.apply(command) {
            Ok(next) => {
                self.state = next;
                Dispatch::Applied
            }
            Err(rejection) => {
                debug!(%command, %rejection, "Command ignored");
                Dispatch::Ignored(rejection)
            }
        }
    }

    /// Starts the match with `total_overs` per innings.
    pub fn start_match(&mut self, total_overs: u32) -> Dispatch {
        self.dispatch(Command::StartMatch(total_overs))
    }

    /// Scores runs off the bat: 0, 1, 2, 3, 4 or 6.
    pub fn add_run(&mut self, runs: u8) -> Dispatch {
        self.dispatch(Command::AddRun(runs))
    }

    /// Scores a wide or no-ball.
    pub fn add_extra(&mut self, kind: ExtraKind, runs: u8) -> Dispatch {
        self.dispatch(Command::AddExtra(kind, runs))
    }

    /// Records a dismissal.
    pub fn fall_wicket(&mut self) -> Dispatch {
        self.dispatch(Command::FallWicket)
    }

    /// Reverses the most recent ball.
    pub fn undo(&mut self) -> Dispatch {
        self.dispatch(Command::Undo)
    }

    /// Closes the current innings.
    pub fn end_innings(&mut self) -> Dispatch {
        self.dispatch(Command::EndInnings)
    }

    /// Returns to setup, keeping the overs count and team names.
    pub fn reset_match(&mut self) -> Dispatch {
        self.dispatch(Command::ResetMatch)
    }

    /// Replays a tied match as a one-over match.
    pub fn start_super_over(&mut self) -> Dispatch {
        self.dispatch(Command::StartSuperOver)
    }

    /// Puts the coin in the air for a tied match.
    pub fn resolve_by_toss(&mut self) -> Dispatch {
        self.dispatch(Command::ResolveByToss)
    }

    /// Lands the coin in favour of `side`.
    pub fn complete_toss(&mut self, side: Side) -> Dispatch {
        self.dispatch(Command::CompleteToss(side))
    }

    /// Lands the coin using `rng`, if a toss is in the air.
    #[instrument(skip(self, rng))]
    pub fn complete_toss_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Dispatch {
        if self.state.phase() != Phase::Tossing {
            return Dispatch::Ignored(Rejection::NoTossInProgress);
        }
        let side = toss(rng);
        self.complete_toss(side)
    }

    /// Current match state.
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Team names.
    pub fn teams(&self) -> &TeamNames {
        &self.teams
    }

    /// Runs in the current innings.
    pub fn runs(&self) -> u32 {
        self.state.runs()
    }

    /// Wickets in the current innings.
    pub fn wickets(&self) -> u32 {
        self.state.wickets()
    }

    /// Overs bowled in cricket notation, e.g. `"3.4"`.
    pub fn overs_string(&self) -> String {
        self.state.overs_bowled().to_string()
    }

    /// Target, during and after the second innings.
    pub fn target(&self) -> Option<u32> {
        self.state.target()
    }

    /// Terminal result.
    pub fn result(&self) -> Option<MatchResult> {
        self.state.result()
    }

    /// Terminal result in words, using the team names.
    pub fn result_text(&self) -> Option<String> {
        self.state.result().map(|r| r.describe(&self.teams))
    }

    /// Snapshot of the over summaries that later commands will not change.
    pub fn overs(&self) -> Arc<Vec<OverSummary>> {
        self.state.ledger().overs_snapshot()
    }

    /// Snapshot of the ball ledger that later commands will not change.
    pub fn ball_history(&self) -> Arc<Vec<BallEvent>> {
        self.state.ledger().events_snapshot()
    }

    /// First innings score.
    pub fn innings1(&self) -> Option<InningsSnapshot> {
        self.state.innings1()
    }

    /// Second innings score.
    pub fn innings2(&self) -> Option<InningsSnapshot> {
        self.state.innings2()
    }

    /// Number of balls recorded this innings.
    pub fn ledger_len(&self) -> usize {
        self.state.ledger().len()
    }

    /// Whether an undo would do anything.
    pub fn can_undo(&self) -> bool {
        self.state.phase().is_in_play() && !self.state.ledger().is_empty()
    }

    /// Lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Current innings.
    pub fn innings(&self) -> u8 {
        self.state.innings()
    }

    /// Legal balls left in the innings.
    pub fn balls_remaining(&self) -> u32 {
        self.state.balls_remaining()
    }

    /// Runs still needed in a live chase.
    pub fn runs_needed(&self) -> Option<u32> {
        self.state.runs_needed()
    }
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new(5, TeamNames::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_command_reports_reason_and_keeps_state() {
        let mut scorer = Scorer::default();
        let before = scorer.state().clone();

        assert_eq!(scorer.add_run(4), Dispatch::Ignored(Rejection::NotStarted));
        assert_eq!(scorer.state(), &before);
    }

    #[test]
    fn test_overs_snapshot_survives_later_commands() {
        let mut scorer = Scorer::default();
        scorer.start_match(2);
        scorer.add_run(4);
        let snapshot = scorer.overs();

        scorer.add_run(6);
        scorer.undo();
        scorer.undo();

        assert_eq!(*snapshot[0].total_runs(), 4);
        assert_eq!(snapshot[0].deliveries().len(), 1);
    }

    #[test]
    fn test_complete_toss_with_needs_toss() {
        let mut scorer = Scorer::default();
        let mut rng = rand::thread_rng();
        assert_eq!(
            scorer.complete_toss_with(&mut rng),
            Dispatch::Ignored(Rejection::NoTossInProgress)
        );
    }
}
