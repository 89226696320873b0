//! Command definitions for the Pomodoro dashboard CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::settings::DurationOverrides;

// ============================================================================
// CLI Structure
// ============================================================================

/// Pomodoro dashboard timer in the terminal
#[derive(Parser, Debug)]
#[command(
    name = "pomodoro-dashboard",
    version,
    about = "Pomodoro countdown timer with work, short break and long break phases",
    long_about = "Runs the Pomodoro timer of the productivity dashboard in a terminal.\n\
                  Type controls on stdin: start, pause, skip, work N, short N, long N, status, quit.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run an interactive timer session
    Run(RunArgs),

    /// Print the effective duration settings as JSON
    Settings(SettingsArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Arguments
// ============================================================================

/// Duration flags shared by `run` and `settings`
#[derive(Args, Debug, Clone, Default)]
pub struct DurationArgs {
    /// Work duration in minutes
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub work: Option<u32>,

    /// Short break duration in minutes
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub short_break: Option<u32>,

    /// Long break duration in minutes
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub long_break: Option<u32>,

    /// Settings file (JSON); defaults to the user config directory
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl DurationArgs {
    /// Returns the flag values as settings overrides.
    pub fn overrides(&self) -> DurationOverrides {
        DurationOverrides {
            work: self.work,
            short_break: self.short_break,
            long_break: self.long_break,
        }
    }
}

/// Arguments for the run command
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    #[command(flatten)]
    pub durations: DurationArgs,

    /// Start the work countdown immediately
    #[arg(short, long)]
    pub autostart: bool,
}

/// Arguments for the settings command
#[derive(Args, Debug, Clone, Default)]
pub struct SettingsArgs {
    #[command(flatten)]
    pub durations: DurationArgs,
}

// ============================================================================
// Tests
// ============================================================================
