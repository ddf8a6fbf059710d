//! Command-line interface definitions.
//!
//! Defines the CLI structure for the tokenwatch application using `clap`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Telegram bot that watches ERC-20 token balances
#[derive(Parser, Debug)]
#[command(name = "tokenwatch")]
#[command(version, about)]
pub struct Cli {
    /// Path to the configuration file (defaults apply when it is absent).
    #[arg(short, long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the tokenwatch CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the bot and the reconciliation schedule (foreground)
    Run,

    /// Run a single reconciliation pass and exit
    Tick(TickArgs),

    /// Print the persisted watch list
    Show,

    /// Validate the configuration and required secrets
    CheckConfig,
}

/// Arguments for the `tick` subcommand.
#[derive(Parser, Debug)]
pub struct TickArgs {
    /// Fetch and report, but neither save the state nor message users.
    #[arg(long)]
    pub dry_run: bool,
}
