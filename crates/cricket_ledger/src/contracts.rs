//! Contract-based validation for match commands.
//!
//! Contracts define correctness through preconditions and postconditions:
//! {P(state, command)} transition {Q(before, after)}. A failed
//! precondition is the `Rejection` the command surface swallows.

use super::action::{Command, Rejection, SCORING_SHOTS};
use super::invariants::{InvariantSet, MatchInvariants};
use super::phases::Phase;
use super::rules::can_bowl;
use super::state::MatchState;
use super::types::BALLS_PER_OVER;
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), Rejection>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), Rejection>;
}

// ─────────────────────────────────────────────────────────────
//  Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: an innings is being played and no result is set.
pub struct InPlay;

impl InPlay {
    /// Checks the precondition.
    #[instrument(skip(state))]
    pub fn check(state: &MatchState) -> Result<(), Rejection> {
        match Rejection::for_phase(state.phase()) {
            Some(rejection) => Err(rejection),
            None => Ok(()),
        }
    }
}

/// Precondition: at least one legal ball is left in the innings.
pub struct BallsRemaining;

impl BallsRemaining {
    /// Checks the precondition.
    #[instrument(skip(state))]
    pub fn check(state: &MatchState) -> Result<(), Rejection> {
        if can_bowl(state.legal_balls(), state.max_legal_balls()) {
            Ok(())
        } else {
            Err(Rejection::BallLimitReached)
        }
    }
}

/// Precondition: runs off the bat are a recognised scoring shot.
pub struct ScoringShot;

impl ScoringShot {
    /// Checks the precondition.
    #[instrument]
    pub fn check(runs: u8) -> Result<(), Rejection> {
        if SCORING_SHOTS.contains(&runs) {
            Ok(())
        } else {
            Err(Rejection::InvalidRuns(runs))
        }
    }
}

/// Precondition: there is a ball to undo.
pub struct HasHistory;

impl HasHistory {
    /// Checks the precondition.
    #[instrument(skip(state))]
    pub fn check(state: &MatchState) -> Result<(), Rejection> {
        if state.ledger().is_empty() {
            Err(Rejection::EmptyLedger)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the match is waiting to be started with a usable overs count.
pub struct ReadyToStart;

impl ReadyToStart {
    /// Checks the precondition.
    #[instrument(skip(state))]
    pub fn check(state: &MatchState, total_overs: u32) -> Result<(), Rejection> {
        match state.phase() {
            Phase::Setup => {}
            Phase::Tossing => return Err(Rejection::TossInProgress),
            _ => return Err(Rejection::AlreadyStarted),
        }
        if total_overs == 0 || total_overs.checked_mul(BALLS_PER_OVER).is_none() {
            return Err(Rejection::InvalidOvers);
        }
        Ok(())
    }
}

/// Precondition: the match ended level and no toss is in the air.
pub struct AwaitingTieBreak;

impl AwaitingTieBreak {
    /// Checks the precondition.
    #[instrument(skip(state))]
    pub fn check(state: &MatchState) -> Result<(), Rejection> {
        match (state.phase(), state.result()) {
            (Phase::Tossing, _) => Err(Rejection::TossInProgress),
            (Phase::Complete, Some(result)) if result.is_tie() => Ok(()),
            _ => Err(Rejection::NotTied),
        }
    }
}

/// Precondition: a coin toss is in the air.
pub struct TossPending;

impl TossPending {
    /// Checks the precondition.
    #[instrument(skip(state))]
    pub fn check(state: &MatchState) -> Result<(), Rejection> {
        if state.phase() == Phase::Tossing {
            Ok(())
        } else {
            Err(Rejection::NoTossInProgress)
        }
    }
}

/// Precondition: no coin toss is in the air.
pub struct NotTossing;

impl NotTossing {
    /// Checks the precondition.
    #[instrument(skip(state))]
    pub fn check(state: &MatchState) -> Result<(), Rejection> {
        if state.phase() == Phase::Tossing {
            Err(Rejection::TossInProgress)
        } else {
            Ok(())
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Command Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for every ledger command.
///
/// Preconditions follow the command table: scoring needs an innings in
/// play, and legal balls also need balls remaining. Extras ignore the
/// ball limit.
///
/// Postconditions: every invariant in [`MatchInvariants`] holds.
pub struct CommandContract;

impl Contract<MatchState, Command> for CommandContract {
    fn pre(state: &MatchState, command: &Command) -> Result<(), Rejection> {
        match *command {
            Command::StartMatch(total_overs) => ReadyToStart::check(state, total_overs),
            Command::AddRun(runs) => {
                InPlay::check(state)?;
                BallsRemaining::check(state)?;
                ScoringShot::check(runs)
            }
            Command::AddExtra(..) => InPlay::check(state),
            Command::FallWicket => {
                InPlay::check(state)?;
                BallsRemaining::check(state)
            }
            Command::Undo => {
                InPlay::check(state)?;
                HasHistory::check(state)
            }
            Command::EndInnings => InPlay::check(state),
            Command::ResetMatch => NotTossing::check(state),
            Command::StartSuperOver | Command::ResolveByToss => AwaitingTieBreak::check(state),
            Command::CompleteToss(_) => TossPending::check(state),
        }
    }

    fn post(_before: &MatchState, after: &MatchState) -> Result<(), Rejection> {
        MatchInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            warn!(%descriptions, "Postcondition failed");
            Rejection::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}

/// Asserts that all match invariants hold (panics on violation in debug builds).
#[instrument(skip(state))]
pub fn assert_invariants(state: &MatchState) {
    debug_assert!(
        MatchInvariants::check_all(state).is_ok(),
        "Match invariants violated"
    );
}
