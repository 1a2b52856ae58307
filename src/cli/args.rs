//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `sync`: Scan source files and reconcile the catalog
//! - `status`: Show the current catalog state
//! - `purge`: Permanently delete long-unused keys
//! - `init`: Initialize a lingot configuration file
//! - `serve`: Start MCP server for AI integration

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Sync(cmd)) => cmd.args.common.verbose,
            Some(Command::Status(cmd)) => cmd.args.common.verbose,
            Some(Command::Purge(cmd)) => cmd.args.common.verbose,
            Some(Command::Init) | Some(Command::Serve) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project root directory (where .lingotrc.json is searched)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Catalog file path (overrides config file)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Parser)]
pub struct SyncArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct SyncCommand {
    #[command(flatten)]
    pub args: SyncArgs,
}

#[derive(Debug, Parser)]
pub struct StatusArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Languages to display (default: all configured langs)
    /// Can be specified multiple times: --lang fr-FR --lang de-DE
    #[arg(long = "lang")]
    pub langs: Vec<String>,

    /// Only show keys currently marked unused
    #[arg(long)]
    pub unused_only: bool,
}

#[derive(Debug, Args)]
pub struct StatusCommand {
    #[command(flatten)]
    pub args: StatusArgs,
}

#[derive(Debug, Parser)]
pub struct PurgeArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Actually delete keys (default is dry-run)
    #[arg(long)]
    pub apply: bool,

    /// Only delete keys unused for at least this many days
    #[arg(long, default_value_t = 30)]
    pub before: u32,
}

#[derive(Debug, Args)]
pub struct PurgeCommand {
    #[command(flatten)]
    pub args: PurgeArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scan source files and reconcile the translation catalog
    Sync(SyncCommand),
    /// Show the catalog: keys, staleness, and translations per language
    Status(StatusCommand),
    /// Permanently delete keys that have been unused for a while
    Purge(PurgeCommand),
    /// Initialize a new .lingotrc.json configuration file
    Init,
    /// Start MCP server for AI coding agents
    Serve,
}
