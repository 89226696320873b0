//! Pomodoro Dashboard Timer Library
//!
//! This library provides the Pomodoro timer of the productivity dashboard.
//! It includes:
//! - Timer engine with the work / short break / long break cycle
//! - A single owned, cancelable one-second tick schedule
//! - Display and notification sink interfaces (no rendering dependency)
//! - Duration settings from defaults, a JSON file and CLI flags
//! - A terminal front end: CLI parsing, stdin controls, stdout countdown

pub mod cli;
pub mod engine;
pub mod settings;
pub mod sink;
pub mod types;

// Re-export commonly used types for convenience
pub use engine::{apply_control, run, Control, ControlParseError, Ticker, TimerEngine};
pub use settings::{DurationOverrides, SettingsError};
pub use sink::{
    DisplayEvent, DisplaySink, MockDisplaySink, MockNotificationSink, NotificationSink, Severity,
};
pub use types::{DurationError, Durations, TimerPhase, TimerSnapshot, TimerState};
