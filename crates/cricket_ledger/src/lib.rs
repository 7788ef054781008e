//! Cricket ledger - the match state machine behind a two-innings scorer.
//!
//! A [`MatchState`] is a value advanced by [`MatchState::apply`], one
//! [`Command`] at a time. The [`Scorer`] owns the current state and turns
//! rejected commands into silent no-ops.
//!
//! # Example
//!
//! ```
//! use cricket_ledger::{Scorer, TeamNames};
//!
//! let mut scorer = Scorer::new(1, TeamNames::default());
//! scorer.start_match(1);
//! for _ in 0..6 {
//!     scorer.add_run(1);
//! }
//! assert_eq!(scorer.runs(), 6);
//! assert_eq!(scorer.overs_string(), "1.0");
//! assert!(!scorer.add_run(1).is_applied());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod contracts;
mod invariants;
mod ledger;
mod phases;
mod rules;
mod scorer;
mod state;
mod toss;
mod types;

pub use action::{Command, ParseCommandError, Rejection, DEFAULT_EXTRA_RUNS, SCORING_SHOTS};
pub use contracts::{assert_invariants, CommandContract, Contract};
pub use invariants::{
    BallsWithinLimitInvariant, Invariant, InvariantSet, InvariantViolation, MatchInvariants,
    OversMatchLedgerInvariant, RunsMatchLedgerInvariant, WellFormedEventsInvariant,
    WicketsMatchLedgerInvariant,
};
pub use ledger::BallLedger;
pub use phases::{MatchResult, Phase};
pub use rules::Chase;
pub use scorer::{Dispatch, Scorer};
pub use state::MatchState;
pub use toss::toss;
pub use types::{
    BallEvent, Delivery, ExtraKind, InningsSnapshot, OverSummary, Overs, Side, TeamNames,
    BALLS_PER_OVER, MAX_WICKETS,
};
