//! CLI module for the Pomodoro dashboard timer.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `display`: Terminal sinks and output formatting
//! - `input`: Control lines read from stdin

pub mod commands;
pub mod display;
pub mod input;

pub use commands::{Cli, Commands, DurationArgs, RunArgs, SettingsArgs};
pub use display::{Display, TerminalDisplay, TerminalNotifier};
pub use input::{forward_controls, spawn_stdin_reader};
