//! User controls fed into the timer engine.
//!
//! Controls are the timer's inbound vocabulary: the dashboard buttons and
//! duration fields. They parse from short text commands so the terminal
//! front end can read them line by line.

use std::str::FromStr;

use thiserror::Error;

use crate::types::TimerPhase;

/// A single user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    /// Start (or resume) the countdown
    Start,
    /// Pause the countdown
    Pause,
    /// Start when paused, pause when running
    Toggle,
    /// Jump to the next phase
    Skip,
    /// Edit a phase duration from a raw input value
    SetDuration {
        /// Phase whose duration is edited
        phase: TimerPhase,
        /// Raw input, validated by the engine
        raw: String,
    },
    /// Re-render and report the current state
    Status,
    /// End the session
    Quit,
}

/// Errors produced while parsing a control line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControlParseError {
    /// The command word is not recognised.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// A duration command was given without a value.
    #[error("missing minutes for `{0}`")]
    MissingMinutes(String),
}

impl ControlParseError {
    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::UnknownCommand(_) => {
                "commands: start, pause, toggle, skip, work N, short N, long N, status, quit"
            }
            Self::MissingMinutes(_) => "add the number of minutes, e.g. `work 30`",
        }
    }
}

impl FromStr for Control {
    type Err = ControlParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Ok(Control::Toggle);
        };
        let command = command.to_ascii_lowercase();

        let phase = match command.as_str() {
            "start" => return Ok(Control::Start),
            "pause" => return Ok(Control::Pause),
            "toggle" => return Ok(Control::Toggle),
            "skip" | "next" => return Ok(Control::Skip),
            "status" => return Ok(Control::Status),
            "quit" | "exit" => return Ok(Control::Quit),
            "work" => TimerPhase::Work,
            "short" => TimerPhase::ShortBreak,
            "long" => TimerPhase::LongBreak,
            _ => return Err(ControlParseError::UnknownCommand(command)),
        };

        let raw = words.collect::<Vec<_>>().join(" ");
        if raw.is_empty() {
            return Err(ControlParseError::MissingMinutes(command));
        }
        Ok(Control::SetDuration { phase, raw })
    }
}
