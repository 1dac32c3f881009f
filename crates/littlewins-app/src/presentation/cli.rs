//! Command-line interface definition for Little Wins

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Little Wins - record one small win a day and keep the streak going
#[derive(Parser, Debug, Clone)]
#[command(name = "littlewins")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Sign in as this user (overrides the configured user)
    #[arg(short, long, env = "LITTLEWINS_USER")]
    pub user: Option<String>,

    /// SQLite database file (overrides the configured path)
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Keep wins in memory only; nothing is written to disk
    #[arg(long, conflicts_with = "db")]
    pub memory: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Record a win for today
    Add {
        /// What went well
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Show all wins, most recent first
    List,

    /// Delete a win by id
    Delete {
        /// Win id as shown by `list`
        id: String,
    },

    /// Show the current streak and statistics
    Streak,

    /// Interactive session: every line typed is recorded as a win
    Session,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
