//! The match aggregate and its reducer.
//!
//! `MatchState` is a value. Every command produces a new value through
//! [`MatchState::apply`]; the previous one, and any ledger snapshot taken
//! from it, is left as it was.

use super::action::{Command, Rejection};
use super::contracts::{assert_invariants, CommandContract, Contract};
use super::ledger::BallLedger;
use super::phases::{MatchResult, Phase};
use super::rules::{balls_remaining, Chase};
use super::types::{BallEvent, InningsSnapshot, Overs, Side, BALLS_PER_OVER};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Complete state of one match.
///
/// Serializes as one flat record: every field, including the ledger and
/// over summaries, is a top-level key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    phase: Phase,
    innings: u8,
    total_overs: u32,
    runs: u32,
    wickets: u32,
    legal_balls: u32,
    #[serde(flatten)]
    ledger: BallLedger,
    target: Option<u32>,
    result: Option<MatchResult>,
    innings1: Option<InningsSnapshot>,
    innings2: Option<InningsSnapshot>,
}

impl MatchState {
    /// A match in setup, waiting to be started.
    #[instrument]
    pub fn new(total_overs: u32) -> Self {
        Self {
            phase: Phase::Setup,
            innings: 1,
            total_overs,
            runs: 0,
            wickets: 0,
            legal_balls: 0,
            ledger: BallLedger::new(),
            target: None,
            result: None,
            innings1: None,
            innings2: None,
        }
    }

    /// Applies a command, returning the next state.
    ///
    /// The receiver is untouched. A failed precondition comes back as the
    /// `Rejection`; callers that want silent no-ops keep the old state.
    #[instrument(skip(self), fields(phase = ?self.phase))]
    pub fn apply(&self, command: Command) -> Result<MatchState, Rejection> {
        CommandContract::pre(self, &command)?;

        let mut next = self.clone();
        match command {
            Command::StartMatch(total_overs) => next.start(total_overs),
            Command::AddRun(runs) => {
                next.runs += u32::from(runs);
                next.record_ball(BallEvent::off_bat(runs));
                next.legal_balls += 1;
            }
            Command::AddExtra(kind, runs) => {
                next.runs += u32::from(runs);
                next.record_ball(BallEvent::extra(kind, runs));
            }
            Command::FallWicket => {
                next.wickets += 1;
                next.record_ball(BallEvent::wicket());
                next.legal_balls += 1;
            }
            Command::Undo => next.undo(),
            Command::EndInnings => next.end_innings(),
            Command::ResetMatch => next = MatchState::new(self.total_overs),
            Command::StartSuperOver => {
                info!("Tie to be decided by super over");
                next = MatchState::new(1);
                next.start(1);
            }
            Command::ResolveByToss => {
                info!("Tie to be decided by coin toss");
                next.phase = Phase::Tossing;
            }
            Command::CompleteToss(side) => next.complete_toss(side),
        }

        next.settle();

        #[cfg(debug_assertions)]
        CommandContract::post(self, &next)?;

        assert_invariants(&next);

        debug!(%command, runs = next.runs, wickets = next.wickets, overs = %next.overs_bowled(), "Command applied");
        Ok(next)
    }

    /// Starts a match and applies `commands` in order, skipping rejected ones.
    #[instrument]
    pub fn replay(total_overs: u32, commands: &[Command]) -> Self {
        let start = MatchState::new(total_overs);
        let state = start.apply(Command::StartMatch(total_overs)).unwrap_or(start);
        commands
            .iter()
            .fold(state, |state, command| state.apply(*command).unwrap_or(state))
    }

    fn start(&mut self, total_overs: u32) {
        self.total_overs = total_overs;
        self.phase = Phase::FirstInnings;
        info!(total_overs, "Match started");
    }

    fn record_ball(&mut self, event: BallEvent) {
        self.ledger.record_ball(event, self.legal_balls);
    }

    fn undo(&mut self) {
        if let Some(event) = self.ledger.undo() {
            self.runs -= event.runs();
            if event.is_wicket() {
                self.wickets -= 1;
            }
            if event.is_legal() {
                self.legal_balls -= 1;
            }
        }
    }

    fn end_innings(&mut self) {
        match self.phase {
            Phase::FirstInnings => {
                let snapshot = self.snapshot();
                self.innings1 = Some(snapshot);
                self.target = Some(self.runs + 1);
                self.innings = 2;
                self.phase = Phase::SecondInnings;
                self.runs = 0;
                self.wickets = 0;
                self.legal_balls = 0;
                self.ledger.clear();
                info!(%snapshot, target = ?self.target, "First innings closed");
            }
            Phase::SecondInnings => {
                if let Some(chase) = self.chase() {
                    self.finish(chase.closing_result());
                }
            }
            Phase::Setup | Phase::Complete | Phase::Tossing => {}
        }
    }

    fn complete_toss(&mut self, side: Side) {
        self.result = Some(MatchResult::TossWon(side));
        self.phase = Phase::Complete;
        info!(?side, "Coin toss decided the tie");
    }

    /// Decides the chase if the latest change settled it.
    fn settle(&mut self) {
        if self.phase != Phase::SecondInnings {
            return;
        }
        if let Some(result) = self.chase().and_then(|chase| chase.result()) {
            self.finish(result);
        }
    }

    fn finish(&mut self, result: MatchResult) {
        let snapshot = self.snapshot();
        self.innings2 = Some(snapshot);
        self.result = Some(result);
        self.phase = Phase::Complete;
        info!(%snapshot, %result, "Match complete");
    }

    fn chase(&self) -> Option<Chase> {
        self.target.map(|target| Chase {
            target,
            runs: self.runs,
            wickets: self.wickets,
            legal_balls: self.legal_balls,
            max_legal_balls: self.max_legal_balls(),
        })
    }

    fn snapshot(&self) -> InningsSnapshot {
        InningsSnapshot::new(self.runs, self.wickets, self.overs_bowled())
    }

    /// Lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current innings, 1 or 2.
    pub fn innings(&self) -> u8 {
        self.innings
    }

    /// Overs per innings.
    pub fn total_overs(&self) -> u32 {
        self.total_overs
    }

    /// Legal balls per innings.
    pub fn max_legal_balls(&self) -> u32 {
        self.total_overs.saturating_mul(BALLS_PER_OVER)
    }

    /// Runs in the current innings.
    pub fn runs(&self) -> u32 {
        self.runs
    }

    /// Wickets in the current innings.
    pub fn wickets(&self) -> u32 {
        self.wickets
    }

    /// Legal balls bowled in the current innings.
    pub fn legal_balls(&self) -> u32 {
        self.legal_balls
    }

    /// Legal balls bowled, as overs.
    pub fn overs_bowled(&self) -> Overs {
        Overs::from_balls(self.legal_balls)
    }

    /// Legal balls left in the current innings.
    pub fn balls_remaining(&self) -> u32 {
        balls_remaining(self.legal_balls, self.max_legal_balls())
    }

    /// Ball history and over summaries for the current innings.
    pub fn ledger(&self) -> &BallLedger {
        &self.ledger
    }

    /// Runs the chasing side needs, set once the first innings closes.
    pub fn target(&self) -> Option<u32> {
        self.target
    }

    /// Runs still needed during a live chase.
    pub fn runs_needed(&self) -> Option<u32> {
        match self.phase {
            Phase::SecondInnings => self.target.map(|t| t.saturating_sub(self.runs)),
            _ => None,
        }
    }

    /// Terminal result, once set.
    pub fn result(&self) -> Option<MatchResult> {
        self.result
    }

    /// First innings score, once closed.
    pub fn innings1(&self) -> Option<InningsSnapshot> {
        self.innings1
    }

    /// Second innings score, once closed.
    pub fn innings2(&self) -> Option<InningsSnapshot> {
        self.innings2
    }

    #[cfg(test)]
    pub(crate) fn corrupt_runs(&mut self, extra: u32) {
        self.runs += extra;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ExtraKind;

    #[test]
    fn test_new_match_is_in_setup() {
        let state = MatchState::new(5);
        assert_eq!(state.phase(), Phase::Setup);
        assert_eq!(state.innings(), 1);
        assert_eq!(state.max_legal_balls(), 30);
        assert_eq!(state.target(), None);
    }

    #[test]
    fn test_ball_limit_saturates() {
        assert_eq!(MatchState::new(u32::MAX).max_legal_balls(), u32::MAX);
        assert_eq!(MatchState::new(2).max_legal_balls(), 12);
    }

    #[test]
    fn test_apply_leaves_receiver_untouched() {
        let before = MatchState::replay(2, &[Command::AddRun(4)]);
        let after = before.apply(Command::AddRun(6)).unwrap();

        assert_eq!(before.runs(), 4);
        assert_eq!(before.ledger().len(), 1);
        assert_eq!(*before.ledger().overs()[0].total_runs(), 4);
        assert_eq!(after.runs(), 10);
    }

    #[test]
    fn test_undo_reverses_each_counter() {
        let base = MatchState::replay(2, &[Command::AddRun(2), Command::AddRun(3)]);
        for command in [
            Command::AddRun(6),
            Command::FallWicket,
            Command::AddExtra(ExtraKind::Wide, 2),
        ] {
            let undone = base.apply(command).unwrap().apply(Command::Undo).unwrap();
            assert_eq!(undone.runs(), base.runs());
            assert_eq!(undone.wickets(), base.wickets());
            assert_eq!(undone.legal_balls(), base.legal_balls());
            assert_eq!(undone.ledger().len(), base.ledger().len());
        }
    }

    #[test]
    fn test_end_first_innings_sets_target_and_clears_score() {
        let state = MatchState::replay(
            2,
            &[Command::AddRun(4), Command::FallWicket, Command::EndInnings],
        );

        assert_eq!(state.phase(), Phase::SecondInnings);
        assert_eq!(state.innings(), 2);
        assert_eq!(state.target(), Some(5));
        assert_eq!(
            state.innings1(),
            Some(InningsSnapshot::new(4, 1, Overs::from_balls(2)))
        );
        assert_eq!(state.runs(), 0);
        assert_eq!(state.wickets(), 0);
        assert!(state.ledger().is_empty());
        assert!(state.ledger().overs().is_empty());
        assert_eq!(state.total_overs(), 2);
        assert_eq!(state.runs_needed(), Some(5));
    }

    #[test]
    fn test_reset_keeps_overs() {
        let state = MatchState::replay(3, &[Command::AddRun(1), Command::ResetMatch]);
        assert_eq!(state, MatchState::new(3));
    }

    #[test]
    fn test_flat_serialization() {
        let state = MatchState::replay(1, &[Command::AddRun(4)]);
        let value = serde_json::to_value(&state).unwrap();

        assert_eq!(value["runs"], 4);
        assert_eq!(value["ledger"][0]["action"], "4");
        assert_eq!(value["overs"][0]["deliveries"][0], "4");

        let back: MatchState = serde_json::from_value(value).unwrap();
        assert_eq!(back, state);
    }
}
