//! First-class invariants for the match ledger.
//!
//! Invariants are properties that must hold after every transition.
//! They are checked as reducer postconditions in debug builds and when a
//! stored snapshot is loaded back into memory.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description)
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of invariants, so sets compose by type.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set.
    ///
    /// Returns Ok(()) if all invariants hold, or Err with every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

macro_rules! impl_invariant_set {
    ($($inv:ident),+) => {
        impl<S, $($inv),+> InvariantSet<S> for ($($inv,)+)
        where
            $($inv: Invariant<S>,)+
        {
            fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
                let mut violations = Vec::new();
                $(
                    if !$inv::holds(state) {
                        violations.push(InvariantViolation::new($inv::description()));
                    }
                )+
                if violations.is_empty() {
                    Ok(())
                } else {
                    Err(violations)
                }
            }
        }
    };
}

impl_invariant_set!(I1, I2);
impl_invariant_set!(I1, I2, I3);
impl_invariant_set!(I1, I2, I3, I4);
impl_invariant_set!(I1, I2, I3, I4, I5);

pub mod ball_limit;
pub mod ledger_totals;
pub mod over_summary;
pub mod well_formed;

pub use ball_limit::BallsWithinLimitInvariant;
pub use ledger_totals::{RunsMatchLedgerInvariant, WicketsMatchLedgerInvariant};
pub use over_summary::OversMatchLedgerInvariant;
pub use well_formed::WellFormedEventsInvariant;

/// All match invariants as a composable set.
pub type MatchInvariants = (
    WellFormedEventsInvariant,
    RunsMatchLedgerInvariant,
    WicketsMatchLedgerInvariant,
    BallsWithinLimitInvariant,
    OversMatchLedgerInvariant,
);
