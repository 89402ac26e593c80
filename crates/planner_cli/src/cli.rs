//! Command-line surface.

use clap::{Args, Parser, Subcommand};
use planner_core::{Accent, BgMode, SettingsPatch};
use std::path::PathBuf;

/// Personal task list with a daily streak and quote.
#[derive(Debug, Parser)]
#[command(name = "planner", version, long_about = None)]
pub struct Cli {
    /// Override database path (default: $PLANNER_DB_PATH or the user data dir)
    #[arg(global = true, long = "db")]
    pub db: Option<PathBuf>,

    /// Override log level (trace|debug|info|warn|error)
    #[arg(global = true, long = "log-level")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show all tasks and progress
    List,
    /// Add a task
    Add {
        /// Task text; blank text is ignored
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Mark a task complete, or reopen it
    Toggle {
        /// 1-based task position
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        position: u64,
    },
    /// Replace a task's text; blank text deletes the task
    Edit {
        /// 1-based task position
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        position: u64,
        #[arg(num_args = 0..)]
        text: Vec<String>,
    },
    /// Delete a task
    Remove {
        /// 1-based task position
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        position: u64,
    },
    /// Show completion percentage
    Progress,
    /// Show the current streak
    Streak,
    /// Show today's quote
    Quote,
    /// Reopen every task completed today
    ResetDay,
    /// Show or change appearance settings
    #[command(subcommand)]
    Settings(SettingsCommand),
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Print current settings
    Show,
    /// Update one or more settings
    Set(SettingsArgs),
    /// Restore default settings
    Reset,
}

#[derive(Debug, Args)]
pub struct SettingsArgs {
    /// Background mode (image|solid)
    #[arg(long = "bg-mode")]
    pub bg_mode: Option<BgMode>,

    /// Reduce motion (true|false)
    #[arg(long = "reduced-motion", action = clap::ArgAction::Set)]
    pub reduced_motion: Option<bool>,

    /// Accent color (blue|green|orange|pink)
    #[arg(long)]
    pub accent: Option<Accent>,
}

impl From<&SettingsArgs> for SettingsPatch {
    fn from(args: &SettingsArgs) -> Self {
        SettingsPatch {
            bg_mode: args.bg_mode,
            reduced_motion: args.reduced_motion,
            accent: args.accent,
        }
    }
}

/// Converts a 1-based position from the command line to a list index.
pub fn to_index(position: u64) -> usize {
    position.saturating_sub(1) as usize
}
