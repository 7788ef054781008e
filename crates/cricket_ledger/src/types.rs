//! Core domain types for the match ledger.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Legal deliveries that make up one over.
pub const BALLS_PER_OVER: u32 = 6;

/// Wickets a side can lose in an innings.
pub const MAX_WICKETS: u32 = 10;

/// What happened on a single ball.
///
/// Serialized as the scorebook tag: `"0"`..`"6"`, `"Wd"`, `"NB"` or `"W"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Delivery {
    /// Runs scored off the bat.
    Runs(u8),
    /// Wide ball.
    Wide,
    /// No-ball.
    NoBall,
    /// Batter dismissed.
    Wicket,
}

impl Delivery {
    /// Returns true if this delivery counts toward the six-ball quota.
    pub fn is_legal(self) -> bool {
        matches!(self, Delivery::Runs(_) | Delivery::Wicket)
    }

    /// Returns true for wides and no-balls.
    pub fn is_extra(self) -> bool {
        matches!(self, Delivery::Wide | Delivery::NoBall)
    }
}

impl std::fmt::Display for Delivery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Delivery::Runs(n) => write!(f, "{}", n),
            Delivery::Wide => write!(f, "Wd"),
            Delivery::NoBall => write!(f, "NB"),
            Delivery::Wicket => write!(f, "W"),
        }
    }
}

impl From<Delivery> for String {
    fn from(delivery: Delivery) -> Self {
        delivery.to_string()
    }
}

impl TryFrom<String> for Delivery {
    type Error = String;

    fn try_from(tag: String) -> Result<Self, Self::Error> {
        match tag.as_str() {
            "Wd" => Ok(Delivery::Wide),
            "NB" => Ok(Delivery::NoBall),
            "W" => Ok(Delivery::Wicket),
            other => match other.parse::<u8>() {
                Ok(n) if n <= 6 => Ok(Delivery::Runs(n)),
                _ => Err(format!("Unknown delivery tag: {}", other)),
            },
        }
    }
}

/// One recorded delivery or extra.
///
/// Constructors keep the tag, run count and legality consistent:
/// a wicket is always a legal ball worth nothing, an extra is never legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BallEvent {
    action: Delivery,
    runs: u32,
    is_legal: bool,
}

impl BallEvent {
    /// Runs off the bat from a legal delivery.
    pub fn off_bat(runs: u8) -> Self {
        Self {
            action: Delivery::Runs(runs),
            runs: u32::from(runs),
            is_legal: true,
        }
    }

    /// A wide or no-ball worth `runs`.
    pub fn extra(kind: ExtraKind, runs: u8) -> Self {
        Self {
            action: kind.into(),
            runs: u32::from(runs),
            is_legal: false,
        }
    }

    /// A dismissal.
    pub fn wicket() -> Self {
        Self {
            action: Delivery::Wicket,
            runs: 0,
            is_legal: true,
        }
    }

    /// The scorebook tag.
    pub fn action(&self) -> Delivery {
        self.action
    }

    /// Runs credited to the batting side.
    pub fn runs(&self) -> u32 {
        self.runs
    }

    /// Whether the ball counts toward the over.
    pub fn is_legal(&self) -> bool {
        self.is_legal
    }

    /// Whether the ball dismissed a batter.
    pub fn is_wicket(&self) -> bool {
        self.action == Delivery::Wicket
    }
}

/// Kind of extra a bowler can concede.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum ExtraKind {
    /// Wide ball.
    #[strum(to_string = "Wd", serialize = "wide")]
    Wide,
    /// No-ball.
    #[strum(to_string = "NB", serialize = "noball")]
    NoBall,
}

impl From<ExtraKind> for Delivery {
    fn from(kind: ExtraKind) -> Self {
        match kind {
            ExtraKind::Wide => Delivery::Wide,
            ExtraKind::NoBall => Delivery::NoBall,
        }
    }
}

/// Aggregated view of one over.
///
/// `deliveries` includes extras, so it can hold more than six entries.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct OverSummary {
    /// 1-based over number.
    over_number: u32,
    /// Runs conceded in the over, extras included.
    total_runs: u32,
    /// Tags in the order they were bowled.
    deliveries: Vec<Delivery>,
}

impl OverSummary {
    /// Creates an empty summary for the given 1-based over.
    pub fn new(over_number: u32) -> Self {
        Self {
            over_number,
            total_runs: 0,
            deliveries: Vec::new(),
        }
    }

    /// Returns true if nothing has been bowled in this over.
    pub fn is_empty(&self) -> bool {
        self.deliveries.is_empty()
    }

    pub(crate) fn push(&mut self, event: &BallEvent) {
        self.deliveries.push(event.action());
        self.total_runs += event.runs();
    }

    pub(crate) fn pop(&mut self, runs: u32) -> Option<Delivery> {
        let popped = self.deliveries.pop()?;
        self.total_runs = self.total_runs.saturating_sub(runs);
        Some(popped)
    }
}

/// Count of legal balls displayed in cricket notation (`"7.3"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Overs(u32);

impl Overs {
    /// Wraps a legal ball count.
    pub fn from_balls(legal_balls: u32) -> Self {
        Self(legal_balls)
    }

    /// Total legal balls.
    pub fn balls(self) -> u32 {
        self.0
    }

    /// Completed overs.
    pub fn completed(self) -> u32 {
        self.0 / BALLS_PER_OVER
    }

    /// Balls bowled in the current, incomplete over.
    pub fn balls_into_over(self) -> u32 {
        self.0 % BALLS_PER_OVER
    }
}

impl std::fmt::Display for Overs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.completed(), self.balls_into_over())
    }
}

/// Frozen score of a completed innings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct InningsSnapshot {
    /// Runs scored.
    runs: u32,
    /// Wickets lost.
    wickets: u32,
    /// Legal balls faced.
    overs: Overs,
}

impl InningsSnapshot {
    /// Captures a score.
    pub fn new(runs: u32, wickets: u32, overs: Overs) -> Self {
        Self {
            runs,
            wickets,
            overs,
        }
    }
}

impl std::fmt::Display for InningsSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{} ({})", self.runs, self.wickets, self.overs)
    }
}

/// One of the two sides in a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
pub enum Side {
    /// Bats in the first innings and defends the total.
    BattingFirst,
    /// Bats in the second innings and chases the target.
    Chasing,
}

impl Side {
    /// Returns the other side.
    pub fn opponent(self) -> Self {
        match self {
            Side::BattingFirst => Side::Chasing,
            Side::Chasing => Side::BattingFirst,
        }
    }
}

/// Display names for both sides.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct TeamNames {
    /// Side batting first.
    batting_first: String,
    /// Side chasing.
    chasing: String,
}

impl TeamNames {
    /// Creates a name pair.
    #[instrument(skip(batting_first, chasing))]
    pub fn new(batting_first: impl Into<String>, chasing: impl Into<String>) -> Self {
        Self {
            batting_first: batting_first.into(),
            chasing: chasing.into(),
        }
    }

    /// Name of the given side.
    pub fn name(&self, side: Side) -> &str {
        match side {
            Side::BattingFirst => &self.batting_first,
            Side::Chasing => &self.chasing,
        }
    }
}

impl Default for TeamNames {
    fn default() -> Self {
        Self::new("Team A", "Team B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_tags() {
        assert_eq!(Delivery::Runs(4).to_string(), "4");
        assert_eq!(Delivery::Wide.to_string(), "Wd");
        assert_eq!(Delivery::NoBall.to_string(), "NB");
        assert_eq!(Delivery::Wicket.to_string(), "W");
    }

    #[test]
    fn test_delivery_rejects_unknown_tag() {
        assert!(Delivery::try_from("7".to_string()).is_err());
        assert!(Delivery::try_from("LB".to_string()).is_err());
        assert_eq!(Delivery::try_from("NB".to_string()), Ok(Delivery::NoBall));
    }

    #[test]
    fn test_wicket_event_is_legal_and_scoreless() {
        let event = BallEvent::wicket();
        assert!(event.is_legal());
        assert_eq!(event.runs(), 0);
        assert!(event.is_wicket());
    }

    #[test]
    fn test_extras_are_never_legal() {
        for kind in [ExtraKind::Wide, ExtraKind::NoBall] {
            let event = BallEvent::extra(kind, 1);
            assert!(!event.is_legal());
            assert!(event.action().is_extra());
        }
    }

    #[test]
    fn test_extra_kind_parses_case_insensitively() {
        assert_eq!("wd".parse::<ExtraKind>(), Ok(ExtraKind::Wide));
        assert_eq!("NB".parse::<ExtraKind>(), Ok(ExtraKind::NoBall));
        assert_eq!("Wide".parse::<ExtraKind>(), Ok(ExtraKind::Wide));
        assert_eq!(ExtraKind::NoBall.to_string(), "NB");
    }

    #[test]
    fn test_overs_notation() {
        assert_eq!(Overs::from_balls(0).to_string(), "0.0");
        assert_eq!(Overs::from_balls(6).to_string(), "1.0");
        assert_eq!(Overs::from_balls(45).to_string(), "7.3");
    }

    #[test]
    fn test_default_team_names() {
        let names = TeamNames::default();
        assert_eq!(names.name(Side::BattingFirst), "Team A");
        assert_eq!(names.name(Side::Chasing), "Team B");
        assert_eq!(Side::Chasing.opponent(), Side::BattingFirst);
    }
}
