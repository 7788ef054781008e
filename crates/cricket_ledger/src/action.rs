//! First-class command types for the match ledger.
//!
//! Commands are the scorer's intent. They can be parsed, validated
//! against the current state, and replayed, independently of execution.

use super::phases::Phase;
use super::types::{ExtraKind, Side};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Run values a batter can score off a single legal ball.
pub const SCORING_SHOTS: [u8; 6] = [0, 1, 2, 3, 4, 6];

/// Runs credited for an extra when none are given.
pub const DEFAULT_EXTRA_RUNS: u8 = 1;

/// A command fed into the ledger by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Begin innings one with the given number of overs.
    StartMatch(u32),
    /// Runs off the bat.
    AddRun(u8),
    /// A wide or no-ball.
    AddExtra(ExtraKind, u8),
    /// A dismissal.
    FallWicket,
    /// Reverse the most recent ball.
    Undo,
    /// Close the current innings.
    EndInnings,
    /// Return to setup, keeping the overs count.
    ResetMatch,
    /// Replay a tie as a one-over match.
    StartSuperOver,
    /// Begin settling a tie by coin toss.
    ResolveByToss,
    /// Land the coin in favour of a side.
    CompleteToss(Side),
}

impl Command {
    /// Returns true for commands that record a ball.
    pub fn is_scoring(&self) -> bool {
        matches!(
            self,
            Command::AddRun(_) | Command::AddExtra(..) | Command::FallWicket
        )
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::StartMatch(overs) => write!(f, "start:{}", overs),
            Command::AddRun(runs) => write!(f, "{}", runs),
            Command::AddExtra(kind, runs) => write!(f, "{}:{}", kind, runs),
            Command::FallWicket => write!(f, "w"),
            Command::Undo => write!(f, "undo"),
            Command::EndInnings => write!(f, "end"),
            Command::ResetMatch => write!(f, "reset"),
            Command::StartSuperOver => write!(f, "super"),
            Command::ResolveByToss => write!(f, "toss"),
            Command::CompleteToss(side) => write!(f, "toss-won:{:?}", side),
        }
    }
}

/// A command token that could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Unrecognised command: {:?}", token)]
pub struct ParseCommandError {
    /// The offending input.
    pub token: String,
}

impl ParseCommandError {
    fn new(token: &str) -> Self {
        Self {
            token: token.to_string(),
        }
    }
}

impl FromStr for Command {
    type Err = ParseCommandError;

    /// Parses a scorer token: `0`-`6`, `wd[:N]`, `nb[:N]`, `w`, `undo`,
    /// `end`, `reset`, `start:N`, `super` or `toss`.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let token = input.trim().to_ascii_lowercase();
        let (head, arg) = match token.split_once(':') {
            Some((head, arg)) => (head, Some(arg)),
            None => (token.as_str(), None),
        };

        let command = match (head, arg) {
            ("w" | "wicket", None) => Command::FallWicket,
            ("undo" | "u", None) => Command::Undo,
            ("end", None) => Command::EndInnings,
            ("reset", None) => Command::ResetMatch,
            ("super", None) => Command::StartSuperOver,
            ("toss", None) => Command::ResolveByToss,
            ("start", Some(overs)) => Command::StartMatch(
                overs.parse().map_err(|_| ParseCommandError::new(input))?,
            ),
            (runs, None) if runs.chars().all(|c| c.is_ascii_digit()) => {
                Command::AddRun(runs.parse().map_err(|_| ParseCommandError::new(input))?)
            }
            (kind, arg) => {
                let kind: ExtraKind = kind.parse().map_err(|_| ParseCommandError::new(input))?;
                let runs = match arg {
                    Some(runs) => runs.parse().map_err(|_| ParseCommandError::new(input))?,
                    None => DEFAULT_EXTRA_RUNS,
                };
                Command::AddExtra(kind, runs)
            }
        };

        Ok(command)
    }
}

/// Why a command left the match untouched.
///
/// Rejections are not failures: the command surface ignores them, and
/// they exist so callers and tests can see which guard fired.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Rejection {
    /// The match has not been started.
    #[display("Match has not started")]
    NotStarted,

    /// A result is already set.
    #[display("Match is already over")]
    MatchOver,

    /// Every legal ball of the innings has been bowled.
    #[display("No legal balls remaining")]
    BallLimitReached,

    /// Runs outside the allowed scoring shots.
    #[display("{} is not a scoring shot", _0)]
    InvalidRuns(u8),

    /// A match needs at least one over.
    #[display("A match needs at least one over")]
    InvalidOvers,

    /// Nothing to undo.
    #[display("Nothing to undo")]
    EmptyLedger,

    /// Command only valid during setup.
    #[display("Match already in progress")]
    AlreadyStarted,

    /// Tie-break requested without a tie.
    #[display("Match is not tied")]
    NotTied,

    /// A coin toss is already in the air.
    #[display("Coin toss in progress")]
    TossInProgress,

    /// Toss completion without a toss.
    #[display("No coin toss in progress")]
    NoTossInProgress,

    /// A transition broke a ledger invariant (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for Rejection {}

impl Rejection {
    /// The rejection a finished or unstarted match gives to play commands.
    pub fn for_phase(phase: Phase) -> Option<Self> {
        match phase {
            Phase::Setup => Some(Rejection::NotStarted),
            Phase::Complete | Phase::Tossing => Some(Rejection::MatchOver),
            Phase::FirstInnings | Phase::SecondInnings => None,
        }
    }
}
