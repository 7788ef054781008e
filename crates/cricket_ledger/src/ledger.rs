//! Ball-by-ball history and the over summaries derived from it.
//!
//! Both sequences live behind `Arc` and are mutated through
//! `Arc::make_mut`. A snapshot handed out before a mutation keeps its
//! contents; the ledger copies on the next write instead.

use super::rules::over_index;
use super::types::{BallEvent, OverSummary};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Ordered ball events for the current innings plus their per-over view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallLedger {
    /// Every ball and extra, oldest first.
    ledger: Arc<Vec<BallEvent>>,
    /// Summaries indexed by over.
    overs: Arc<Vec<OverSummary>>,
}

impl BallLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event and folds it into its over.
    ///
    /// `legal_balls_before` is the innings' legal ball count before this
    /// delivery is counted.
    #[instrument(skip(self))]
    pub fn record_ball(&mut self, event: BallEvent, legal_balls_before: u32) {
        let index = over_index(legal_balls_before);
        let overs = Arc::make_mut(&mut self.overs);
        while overs.len() <= index {
            let over_number = overs.len() as u32 + 1;
            overs.push(OverSummary::new(over_number));
        }
        overs[index].push(&event);
        Arc::make_mut(&mut self.ledger).push(event);
        debug!(over = index + 1, action = %event.action(), "Ball recorded");
    }

    /// Removes the most recent event and its entry in the over summary.
    ///
    /// An over emptied by the undo is dropped unless it is the first one.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> Option<BallEvent> {
        let event = Arc::make_mut(&mut self.ledger).pop()?;

        let overs = Arc::make_mut(&mut self.overs);
        if let Some(index) = overs.iter().rposition(|over| !over.is_empty()) {
            let over = &mut overs[index];
            over.pop(event.runs());
            if over.is_empty() && *over.total_runs() == 0 && index > 0 {
                overs.remove(index);
                debug!(over = index + 1, "Pruned emptied over");
            }
        }

        debug!(action = %event.action(), "Ball undone");
        Some(event)
    }

    /// Drops all history for a fresh innings.
    pub fn clear(&mut self) {
        self.ledger = Arc::default();
        self.overs = Arc::default();
    }

    /// Recorded events, oldest first.
    pub fn events(&self) -> &[BallEvent] {
        &self.ledger
    }

    /// Over summaries, first over first.
    pub fn overs(&self) -> &[OverSummary] {
        &self.overs
    }

    /// Shared snapshot of the events that later mutations will not touch.
    pub fn events_snapshot(&self) -> Arc<Vec<BallEvent>> {
        Arc::clone(&self.ledger)
    }

    /// Shared snapshot of the over summaries that later mutations will not touch.
    pub fn overs_snapshot(&self) -> Arc<Vec<OverSummary>> {
        Arc::clone(&self.overs)
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.ledger.len()
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.ledger.is_empty()
    }

    /// The most recent event.
    pub fn last(&self) -> Option<&BallEvent> {
        self.ledger.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Delivery, ExtraKind};

    /// Records `events` the way the reducer does, tracking legal balls.
    fn record_all(ledger: &mut BallLedger, events: &[BallEvent]) -> u32 {
        let mut legal = 0;
        for event in events {
            ledger.record_ball(*event, legal);
            if event.is_legal() {
                legal += 1;
            }
        }
        legal
    }

    #[test]
    fn test_first_ball_opens_over_one() {
        let mut ledger = BallLedger::new();
        ledger.record_ball(BallEvent::off_bat(4), 0);

        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.overs().len(), 1);
        assert_eq!(*ledger.overs()[0].over_number(), 1);
        assert_eq!(*ledger.overs()[0].total_runs(), 4);
    }

    #[test]
    fn test_extras_share_over_with_completing_ball() {
        let mut ledger = BallLedger::new();
        let mut events = vec![BallEvent::off_bat(1); 5];
        events.push(BallEvent::extra(ExtraKind::Wide, 1));
        events.push(BallEvent::extra(ExtraKind::NoBall, 1));
        events.push(BallEvent::off_bat(6));
        events.push(BallEvent::off_bat(2));
        record_all(&mut ledger, &events);

        let overs = ledger.overs();
        assert_eq!(overs.len(), 2);
        assert_eq!(overs[0].deliveries().len(), 8);
        assert_eq!(*overs[0].total_runs(), 13);
        assert_eq!(overs[1].deliveries(), &vec![Delivery::Runs(2)]);
    }

    #[test]
    fn test_undo_prunes_speculative_over() {
        let mut ledger = BallLedger::new();
        let legal = record_all(&mut ledger, &[BallEvent::off_bat(0); 6]);
        ledger.record_ball(BallEvent::off_bat(0), legal);
        assert_eq!(ledger.overs().len(), 2);

        let undone = ledger.undo();
        assert_eq!(undone, Some(BallEvent::off_bat(0)));
        assert_eq!(ledger.overs().len(), 1);
        assert_eq!(ledger.overs()[0].deliveries().len(), 6);
    }

    #[test]
    fn test_undo_keeps_first_over_even_when_empty() {
        let mut ledger = BallLedger::new();
        ledger.record_ball(BallEvent::wicket(), 0);
        ledger.undo();

        assert!(ledger.is_empty());
        assert_eq!(ledger.overs().len(), 1);
        assert!(ledger.overs()[0].is_empty());
    }

    #[test]
    fn test_undo_on_empty_ledger_is_none() {
        let mut ledger = BallLedger::new();
        assert_eq!(ledger.undo(), None);
        assert!(ledger.overs().is_empty());
    }

    #[test]
    fn test_snapshots_do_not_change_after_mutation() {
        let mut ledger = BallLedger::new();
        ledger.record_ball(BallEvent::off_bat(4), 0);
        let overs_before = ledger.overs_snapshot();
        let events_before = ledger.events_snapshot();

        ledger.record_ball(BallEvent::off_bat(6), 1);
        ledger.undo();
        ledger.undo();

        assert_eq!(events_before.len(), 1);
        assert_eq!(*overs_before[0].total_runs(), 4);
        assert_eq!(overs_before[0].deliveries(), &vec![Delivery::Runs(4)]);
        assert!(ledger.is_empty());
    }
}
