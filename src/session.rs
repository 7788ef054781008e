//! A scoring session: one scorer, the toss timer and the snapshot file.

use crate::config::ScorerConfig;
use crate::snapshot::{MatchSnapshot, SnapshotError};
use cricket_ledger::{Command, Dispatch, ParseCommandError, Scorer};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Drives a [`Scorer`] from commands, running the coin toss on a timer
/// and saving after every applied command when a snapshot path is set.
#[derive(Debug)]
pub struct Session {
    scorer: Scorer,
    toss_delay: Duration,
    snapshot_path: Option<PathBuf>,
    rng: StdRng,
}

impl Session {
    /// Creates a session in match setup from configuration.
    #[instrument(skip(config))]
    pub fn new(config: &ScorerConfig) -> Self {
        Self::with_scorer(
            Scorer::new(*config.default_overs(), config.teams()),
            config,
        )
    }

    /// Creates a session around an existing scorer.
    #[instrument(skip(scorer, config))]
    pub fn with_scorer(scorer: Scorer, config: &ScorerConfig) -> Self {
        Self {
            scorer,
            toss_delay: config.toss_delay(),
            snapshot_path: config.snapshot_path().clone(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Resumes from the configured snapshot if it exists.
    #[instrument(skip(config))]
    pub fn resume(config: &ScorerConfig) -> Result<Self, SnapshotError> {
        match config.snapshot_path() {
            Some(path) if path.exists() => {
                let scorer = MatchSnapshot::load(path)?.into_scorer();
                info!(path = %path.display(), "Resumed saved match");
                Ok(Self::with_scorer(scorer, config))
            }
            _ => Ok(Self::new(config)),
        }
    }

    /// Replaces the random source, for repeatable tosses.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Parses a scorer token.
    ///
    /// A bare `start` starts with the overs count already on the scorer.
    pub fn parse(&self, token: &str) -> Result<Command, ParseCommandError> {
        if token.trim().eq_ignore_ascii_case("start") {
            return Ok(Command::StartMatch(self.scorer.state().total_overs()));
        }
        token.parse()
    }

    /// Executes one command.
    ///
    /// A toss request waits out the toss delay and lands the coin before
    /// returning; nothing else can run in between.
    #[instrument(skip(self), fields(phase = ?self.scorer.phase()))]
    pub async fn execute(&mut self, command: Command) -> Result<Dispatch, SnapshotError> {
        let dispatch = match command {
            Command::ResolveByToss => self.toss().await,
            command => self.scorer.dispatch(command),
        };

        if dispatch.is_applied() {
            self.save()?;
        }
        Ok(dispatch)
    }

    async fn toss(&mut self) -> Dispatch {
        let dispatch = self.scorer.resolve_by_toss();
        if !dispatch.is_applied() {
            return dispatch;
        }
        debug!(delay_ms = self.toss_delay.as_millis() as u64, "Coin in the air");
        tokio::time::sleep(self.toss_delay).await;

        self.scorer.complete_toss_with(&mut self.rng)
    }

    fn save(&self) -> Result<(), SnapshotError> {
        if let Some(path) = &self.snapshot_path {
            MatchSnapshot::capture(&self.scorer).save(path)?;
        }
        Ok(())
    }

    /// The scorer.
    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }
}
