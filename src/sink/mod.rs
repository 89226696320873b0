//! Output surfaces the timer engine reports to.
//!
//! The engine has no knowledge of how it is rendered. It pushes countdown
//! updates to a [`DisplaySink`] and transient messages to a
//! [`NotificationSink`]. Both calls are synchronous and unbuffered.
//!
//! The `Mock*` sinks record every call and are used by the test suites.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::TimerPhase;

/// Severity tag attached to a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receives countdown and phase updates.
pub trait DisplaySink {
    /// Renders the remaining time, both parts zero-padded to two digits.
    fn on_tick(&mut self, minutes: &str, seconds: &str);

    /// Shows the label of the phase just entered.
    fn on_phase_change(&mut self, label: &str);

    /// Shows the number of completed work cycles.
    fn on_cycles(&mut self, _count: u32) {}

    /// Reflects whether the countdown is ticking (the Start/Pause toggle).
    fn on_running_changed(&mut self, _running: bool) {}

    /// Reflects a newly accepted duration value.
    fn on_duration_changed(&mut self, _phase: TimerPhase, _minutes: u32) {}
}

/// Receives transient, human-readable messages.
pub trait NotificationSink {
    fn on_message(&mut self, text: &str, severity: Severity);
}

// ============================================================================
// Mocks
// ============================================================================

/// A single recorded display update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayEvent {
    Tick { minutes: String, seconds: String },
    Phase(String),
    Cycles(u32),
    Running(bool),
    Duration { phase: TimerPhase, minutes: u32 },
}

/// Display sink that records every update.
#[derive(Debug, Default)]
pub struct MockDisplaySink {
    events: Vec<DisplayEvent>,
}

impl MockDisplaySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> &[DisplayEvent] {
        &self.events
    }

    /// Returns the most recently rendered time as `"MM:SS"`.
    #[must_use]
    pub fn last_time(&self) -> Option<String> {
        self.events.iter().rev().find_map(|event| match event {
            DisplayEvent::Tick { minutes, seconds } => Some(format!("{minutes}:{seconds}")),
            _ => None,
        })
    }

    /// Returns every phase label shown so far, in order.
    #[must_use]
    pub fn phase_labels(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|event| match event {
                DisplayEvent::Phase(label) => Some(label.clone()),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn tick_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, DisplayEvent::Tick { .. }))
            .count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl DisplaySink for MockDisplaySink {
    fn on_tick(&mut self, minutes: &str, seconds: &str) {
        self.events.push(DisplayEvent::Tick {
            minutes: minutes.to_string(),
            seconds: seconds.to_string(),
        });
    }

    fn on_phase_change(&mut self, label: &str) {
        self.events.push(DisplayEvent::Phase(label.to_string()));
    }

    fn on_cycles(&mut self, count: u32) {
        self.events.push(DisplayEvent::Cycles(count));
    }

    fn on_running_changed(&mut self, running: bool) {
        self.events.push(DisplayEvent::Running(running));
    }

    fn on_duration_changed(&mut self, phase: TimerPhase, minutes: u32) {
        self.events.push(DisplayEvent::Duration { phase, minutes });
    }
}

/// Notification sink that records every message.
#[derive(Debug, Default)]
pub struct MockNotificationSink {
    messages: Vec<(String, Severity)>,
}

impl MockNotificationSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn messages(&self) -> &[(String, Severity)] {
        &self.messages
    }

    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.messages.iter().map(|(text, _)| text.as_str()).collect()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

impl NotificationSink for MockNotificationSink {
    fn on_message(&mut self, text: &str, severity: Severity) {
        self.messages.push((text.to_string(), severity));
    }
}
