//! Core data types for the Pomodoro dashboard timer.
//!
//! This module defines the data structures used for:
//! - Timer phases and their labels
//! - Phase durations with validation
//! - Timer state and the phase transition policy
//! - Read-only snapshots of the timer

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of completed work cycles between two long breaks.
pub const CYCLES_PER_LONG_BREAK: u32 = 4;

// ============================================================================
// TimerPhase
// ============================================================================

/// Represents the current phase of the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerPhase {
    /// Timer has never been started
    #[default]
    Inactive,
    /// Currently in a work session
    Work,
    /// Currently in a short break
    ShortBreak,
    /// Currently in a long break (every 4th cycle)
    LongBreak,
}

impl TimerPhase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerPhase::Inactive => "inactive",
            TimerPhase::Work => "work",
            TimerPhase::ShortBreak => "short_break",
            TimerPhase::LongBreak => "long_break",
        }
    }

    /// Returns the label shown next to the countdown.
    pub fn label(&self) -> &'static str {
        match self {
            TimerPhase::Inactive => "Ready",
            TimerPhase::Work => "Work Time",
            TimerPhase::ShortBreak => "Short Break",
            TimerPhase::LongBreak => "Long Break",
        }
    }

    /// Returns the phase name used in "Switched to ..." messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            TimerPhase::Inactive => "Inactive",
            TimerPhase::Work => "Work",
            TimerPhase::ShortBreak => "Short Break",
            TimerPhase::LongBreak => "Long Break",
        }
    }

    /// Returns true for either kind of break.
    pub fn is_break(&self) -> bool {
        matches!(self, TimerPhase::ShortBreak | TimerPhase::LongBreak)
    }
}

// ============================================================================
// DurationError
// ============================================================================

/// Reasons a duration edit is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    /// Duration was zero or negative.
    #[error("duration must be a positive number of minutes")]
    NotPositive,

    /// Input could not be read as a whole number.
    #[error("not a whole number of minutes: {0:?}")]
    NotNumeric(String),

    /// The inactive phase has no duration of its own.
    #[error("the inactive phase has no configurable duration")]
    InactivePhase,
}

impl DurationError {
    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::NotPositive | Self::NotNumeric(_) => "enter a whole number of minutes, 1 or more",
            Self::InactivePhase => "choose work, short or long",
        }
    }
}

/// Parses a raw duration input field value into minutes.
///
/// Leading and trailing whitespace is ignored. Anything that is not a
/// positive whole number is rejected.
pub fn parse_minutes(raw: &str) -> Result<u32, DurationError> {
    let trimmed = raw.trim();
    match trimmed.parse::<i64>() {
        Ok(value) if value <= 0 => Err(DurationError::NotPositive),
        Ok(value) => u32::try_from(value).map_err(|_| DurationError::NotNumeric(raw.to_string())),
        Err(_) => Err(DurationError::NotNumeric(raw.to_string())),
    }
}

// ============================================================================
// Durations
// ============================================================================

fn default_work() -> u32 {
    25
}

fn default_short_break() -> u32 {
    5
}

fn default_long_break() -> u32 {
    15
}

/// Per-phase durations in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Durations {
    /// Work duration in minutes
    #[serde(default = "default_work")]
    pub work: u32,
    /// Short break duration in minutes
    #[serde(default = "default_short_break")]
    pub short_break: u32,
    /// Long break duration in minutes
    #[serde(default = "default_long_break")]
    pub long_break: u32,
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            work: default_work(),
            short_break: default_short_break(),
            long_break: default_long_break(),
        }
    }
}

impl Durations {
    /// Creates a new configuration with the specified work duration.
    pub fn with_work(mut self, minutes: u32) -> Self {
        self.work = minutes;
        self
    }

    /// Creates a new configuration with the specified short break duration.
    pub fn with_short_break(mut self, minutes: u32) -> Self {
        self.short_break = minutes;
        self
    }

    /// Creates a new configuration with the specified long break duration.
    pub fn with_long_break(mut self, minutes: u32) -> Self {
        self.long_break = minutes;
        self
    }

    /// Returns the duration of `phase` in minutes.
    ///
    /// The inactive phase shows the pending work countdown.
    pub fn minutes(&self, phase: TimerPhase) -> u32 {
        match phase {
            TimerPhase::Inactive | TimerPhase::Work => self.work,
            TimerPhase::ShortBreak => self.short_break,
            TimerPhase::LongBreak => self.long_break,
        }
    }

    /// Returns the duration of `phase` in seconds.
    pub fn seconds(&self, phase: TimerPhase) -> u64 {
        u64::from(self.minutes(phase)) * 60
    }

    /// Updates the duration of `phase`, rejecting zero.
    pub fn set(&mut self, phase: TimerPhase, minutes: u32) -> Result<(), DurationError> {
        if minutes == 0 {
            return Err(DurationError::NotPositive);
        }
        match phase {
            TimerPhase::Inactive => return Err(DurationError::InactivePhase),
            TimerPhase::Work => self.work = minutes,
            TimerPhase::ShortBreak => self.short_break = minutes,
            TimerPhase::LongBreak => self.long_break = minutes,
        }
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), DurationError> {
        if self.work == 0 || self.short_break == 0 || self.long_break == 0 {
            return Err(DurationError::NotPositive);
        }
        Ok(())
    }
}

// ============================================================================
// TimerState
// ============================================================================

/// Represents the current state of the timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    /// Current phase of the timer
    pub phase: TimerPhase,
    /// Remaining seconds in the current phase
    pub seconds_remaining: u64,
    /// Whether the countdown is ticking
    pub is_running: bool,
    /// Number of completed work phases
    pub completed_work_cycles: u32,
    /// Per-phase durations
    pub durations: Durations,
}

impl TimerState {
    /// Creates a new inactive TimerState showing the work countdown.
    pub fn new(durations: Durations) -> Self {
        Self {
            phase: TimerPhase::Inactive,
            seconds_remaining: durations.seconds(TimerPhase::Work),
            is_running: false,
            completed_work_cycles: 0,
            durations,
        }
    }

    /// Returns the phase that follows the current one.
    ///
    /// Leaving a work phase counts a completed cycle, so this is only
    /// meaningful as part of [`TimerState::advance_phase`].
    fn next_phase(&self) -> TimerPhase {
        match self.phase {
            TimerPhase::Work if self.completed_work_cycles % CYCLES_PER_LONG_BREAK == 0 => {
                TimerPhase::LongBreak
            }
            TimerPhase::Work => TimerPhase::ShortBreak,
            TimerPhase::Inactive | TimerPhase::ShortBreak | TimerPhase::LongBreak => {
                TimerPhase::Work
            }
        }
    }

    /// Applies the phase transition policy and returns the new phase.
    pub fn advance_phase(&mut self) -> TimerPhase {
        if self.phase == TimerPhase::Work {
            self.completed_work_cycles += 1;
        }
        let next = self.next_phase();
        self.enter(next);
        next
    }

    /// Enters `phase` with a full countdown.
    pub fn enter(&mut self, phase: TimerPhase) {
        self.phase = phase;
        self.seconds_remaining = self.durations.seconds(phase);
    }

    /// Decrements the countdown by one second.
    ///
    /// Returns true if the countdown has reached zero.
    pub fn tick(&mut self) -> bool {
        self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
        self.seconds_remaining == 0
    }

    /// Returns true if editing `phase` should reset the visible countdown.
    pub fn shows_countdown_for(&self, phase: TimerPhase) -> bool {
        !self.is_running
            && (self.phase == phase
                || (self.phase == TimerPhase::Inactive && phase == TimerPhase::Work))
    }

    /// Returns the remaining time as (minutes, seconds).
    pub fn remaining_parts(&self) -> (u64, u64) {
        (self.seconds_remaining / 60, self.seconds_remaining % 60)
    }

    /// Returns a serializable copy of the state.
    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.phase,
            seconds_remaining: self.seconds_remaining,
            is_running: self.is_running,
            completed_work_cycles: self.completed_work_cycles,
            durations: self.durations,
        }
    }
}

// ============================================================================
// TimerSnapshot
// ============================================================================

/// Point-in-time view of the timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    /// Current phase
    pub phase: TimerPhase,
    /// Remaining seconds
    pub seconds_remaining: u64,
    /// Whether the countdown is ticking
    pub is_running: bool,
    /// Completed work cycles
    pub completed_work_cycles: u32,
    /// Configured durations
    pub durations: Durations,
}

impl TimerSnapshot {
    /// One-line human readable summary.
    pub fn summary(&self) -> String {
        format!(
            "{} {:02}:{:02}, {} cycle(s) completed, {}",
            self.phase.label(),
            self.seconds_remaining / 60,
            self.seconds_remaining % 60,
            self.completed_work_cycles,
            if self.is_running { "running" } else { "paused" }
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
