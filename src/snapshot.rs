//! JSON snapshot store for resuming a match.
//!
//! The document is flat: every match field is a top-level key next to the
//! team names and the save time. Nothing ties the fields together on disk;
//! consistency is checked when a snapshot is loaded back into memory.

use chrono::{DateTime, Utc};
use cricket_ledger::{InvariantSet, MatchInvariants, MatchState, Scorer, TeamNames};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// A saved match.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct MatchSnapshot {
    /// When the snapshot was taken.
    saved_at: DateTime<Utc>,
    /// Team names in use.
    teams: TeamNames,
    /// The match itself.
    #[serde(flatten)]
    state: MatchState,
}

impl MatchSnapshot {
    /// Captures the scorer's current match.
    #[instrument(skip(scorer))]
    pub fn capture(scorer: &Scorer) -> Self {
        Self {
            saved_at: Utc::now(),
            teams: scorer.teams().clone(),
            state: scorer.state().clone(),
        }
    }

    /// Writes the snapshot as pretty JSON.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| SnapshotError::new(format!("Failed to encode snapshot: {}", e)))?;
        std::fs::write(path.as_ref(), json)
            .map_err(|e| SnapshotError::new(format!("Failed to write snapshot: {}", e)))?;
        debug!("Snapshot saved");
        Ok(())
    }

    /// Reads a snapshot and checks the match invariants.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let json = std::fs::read_to_string(path.as_ref())
            .map_err(|e| SnapshotError::new(format!("Failed to read snapshot: {}", e)))?;
        let snapshot = Self::from_json(&json)?;
        info!(saved_at = %snapshot.saved_at, phase = ?snapshot.state.phase(), "Snapshot loaded");
        Ok(snapshot)
    }

    /// Decodes a snapshot and checks the match invariants.
    #[instrument(skip(json))]
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)
            .map_err(|e| SnapshotError::new(format!("Failed to decode snapshot: {}", e)))?;

        if let Err(violations) = MatchInvariants::check_all(&snapshot.state) {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            warn!(%descriptions, "Snapshot violates match invariants");
            return Err(SnapshotError::new(format!(
                "Inconsistent snapshot: {}",
                descriptions
            )));
        }

        Ok(snapshot)
    }

    /// Turns the snapshot back into a scorer.
    pub fn into_scorer(self) -> Scorer {
        Scorer::from_state(self.state, self.teams)
    }
}

/// Snapshot error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Snapshot error: {} at {}:{}", message, file, line)]
pub struct SnapshotError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SnapshotError {
    /// Creates a new snapshot error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> Scorer {
        let mut scorer = Scorer::new(2, TeamNames::new("Lions", "Tigers"));
        scorer.start_match(2);
        scorer.add_run(4);
        scorer.fall_wicket();
        scorer
    }

    #[test]
    fn test_snapshot_is_flat() {
        let snapshot = MatchSnapshot::capture(&scorer());
        let value = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(value["runs"], 4);
        assert_eq!(value["wickets"], 1);
        assert_eq!(value["total_overs"], 2);
        assert_eq!(value["teams"]["batting_first"], "Lions");
        assert!(value["ledger"].is_array());
        assert!(value["saved_at"].is_string());
    }

    #[test]
    fn test_inconsistent_snapshot_refused() {
        let snapshot = MatchSnapshot::capture(&scorer());
        let mut value = serde_json::to_value(&snapshot).unwrap();
        value["runs"] = serde_json::json!(40);

        let err = MatchSnapshot::from_json(&value.to_string()).unwrap_err();
        assert!(err.message.contains("Inconsistent snapshot"));
    }

    #[test]
    fn test_garbage_refused() {
        assert!(MatchSnapshot::from_json("{\"runs\": \"lots\"}").is_err());
    }
}
