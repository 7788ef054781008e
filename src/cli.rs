//! Command-line interface for cricket_score.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Cricket Score - two-innings scorer with undo and tie-breaks
#[derive(Parser, Debug)]
#[command(name = "cricket_score")]
#[command(about = "Score a two-innings cricket match", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file (defaults to cricket_score.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Score interactively, one command per line on stdin
    Play {
        /// Overs per innings (overrides the config)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        overs: Option<u32>,

        /// Save the match here after every command, resuming it if present
        #[arg(short, long)]
        snapshot: Option<PathBuf>,
    },

    /// Apply a scripted list of commands and print the final scoreboard
    Score {
        /// Overs per innings (overrides the config)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        overs: Option<u32>,

        /// Commands: 0-6, wd[:N], nb[:N], w, undo, end, reset, start[:N], super, toss
        #[arg(required = true)]
        tokens: Vec<String>,
    },

    /// Print the scoreboard of a saved match
    Show {
        /// Snapshot file
        snapshot: PathBuf,
    },
}
