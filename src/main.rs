//! Cricket Score - unified CLI.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use cricket_score::{render, MatchSnapshot, Phase, ScorerConfig, Session};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

const HELP: &str = "Commands: 0 1 2 3 4 6 | wd[:N] nb[:N] | w | undo | end | reset | start[:N] | super | toss | quit";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ScorerConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Play { overs, snapshot } => run_play(config, overs, snapshot).await,
        Command::Score { overs, tokens } => run_score(config, overs, tokens).await,
        Command::Show { snapshot } => run_show(snapshot),
    }
}

/// Applies CLI overrides on top of the file config.
fn configure(config: ScorerConfig, overs: Option<u32>, snapshot: Option<PathBuf>) -> ScorerConfig {
    let config = match overs {
        Some(overs) => config.with_overs(overs),
        None => config,
    };
    match snapshot {
        Some(path) => config.with_snapshot_path(path),
        None => config,
    }
}

/// Interactive scoring on stdin.
#[instrument(skip(config))]
async fn run_play(
    config: ScorerConfig,
    overs: Option<u32>,
    snapshot: Option<PathBuf>,
) -> Result<()> {
    let config = configure(config, overs, snapshot);
    let mut session = Session::resume(&config)?;

    if session.scorer().phase() == Phase::Setup {
        let start = session.parse("start")?;
        session.execute(start).await?;
    }

    println!("{}", HELP);
    println!("{}", render(session.scorer()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "quit" | "exit" | "q") {
            break;
        }

        match session.parse(line) {
            Ok(command) => {
                if command == cricket_score::Command::ResolveByToss {
                    println!("Tossing coin...");
                }
                let dispatch = session.execute(command).await?;
                if let cricket_score::Dispatch::Ignored(reason) = dispatch {
                    info!(%reason, "Command ignored");
                }
            }
            Err(e) => {
                warn!(error = %e, "Bad command");
                println!("{}\n{}", e, HELP);
                continue;
            }
        }

        println!("{}", render(session.scorer()));
    }

    Ok(())
}

/// Scripted scoring from the command line.
#[instrument(skip(config))]
async fn run_score(config: ScorerConfig, overs: Option<u32>, tokens: Vec<String>) -> Result<()> {
    let config = configure(config, overs, None);
    let mut session = Session::new(&config);
    let start = session.parse("start")?;
    session.execute(start).await?;

    for token in &tokens {
        let command = session
            .parse(token)
            .with_context(|| format!("in command list at {:?}", token))?;
        session.execute(command).await?;
    }

    print!("{}", render(session.scorer()));
    Ok(())
}

/// Prints a saved match.
#[instrument]
fn run_show(snapshot: PathBuf) -> Result<()> {
    let scorer = MatchSnapshot::load(&snapshot)
        .with_context(|| format!("loading {}", snapshot.display()))?
        .into_scorer();
    print!("{}", render(&scorer));
    Ok(())
}
