//! Ball event shape invariant.

use super::super::types::{BallEvent, Delivery};
use super::super::MatchState;
use super::Invariant;

/// Invariant: every event's tag, runs and legality agree.
///
/// Constructors guarantee this in memory; a deserialized ledger may not.
pub struct WellFormedEventsInvariant;

impl WellFormedEventsInvariant {
    /// Checks a single event.
    pub fn event_holds(event: &BallEvent) -> bool {
        match event.action() {
            Delivery::Runs(n) => event.is_legal() && event.runs() == u32::from(n),
            Delivery::Wicket => event.is_legal() && event.runs() == 0,
            Delivery::Wide | Delivery::NoBall => !event.is_legal(),
        }
    }
}

impl Invariant<MatchState> for WellFormedEventsInvariant {
    fn holds(state: &MatchState) -> bool {
        state.ledger().events().iter().all(Self::event_holds)
    }

    fn description() -> &'static str {
        "Ball events carry consistent tag, runs and legality"
    }
}
