//! Cricket Score - a two-innings scorer around the cricket ledger.
//!
//! # Architecture
//!
//! - **Ledger**: the match state machine lives in `cricket_ledger`
//! - **Session**: runs commands, the coin toss timer and autosave
//! - **Snapshot**: flat JSON save files
//! - **Scoreboard**: plain-text rendering for the terminal
//!
//! # Example
//!
//! ```no_run
//! use cricket_score::{ScorerConfig, Session};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ScorerConfig::load(None)?;
//! let mut session = Session::new(&config);
//! let start = session.parse("start")?;
//! session.execute(start).await?;
//! println!("{}", cricket_score::render(session.scorer()));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod scoreboard;
mod session;
mod snapshot;

pub use config::{ConfigError, ScorerConfig, DEFAULT_CONFIG_FILE};
pub use scoreboard::render;
pub use session::Session;
pub use snapshot::{MatchSnapshot, SnapshotError};

pub use cricket_ledger::{
    Command, Dispatch, ExtraKind, MatchResult, MatchState, Phase, Rejection, Scorer, Side,
    TeamNames,
};
