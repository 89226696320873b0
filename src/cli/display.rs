//! Display utilities for the Pomodoro dashboard CLI.
//!
//! This module provides:
//! - `TerminalDisplay`: countdown status line on stdout
//! - `TerminalNotifier`: transient messages on stderr
//! - `Display`: one-shot command output (settings, errors)

use std::io::{self, Write};

use tracing::debug;

use crate::sink::{DisplaySink, NotificationSink, Severity};
use crate::types::{Durations, TimerPhase};

// ============================================================================
// TerminalDisplay
// ============================================================================

/// Renders the countdown as a single status line that is redrawn in place.
pub struct TerminalDisplay<W: Write> {
    out: W,
    label: String,
    time: String,
    cycles: u32,
    running: bool,
}

impl TerminalDisplay<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            label: TimerPhase::Inactive.label().to_string(),
            time: "00:00".to_string(),
            cycles: 0,
            running: false,
        }
    }

    /// Returns the status line as currently rendered.
    pub fn status_line(&self) -> String {
        format!(
            "[{}] {}  cycles: {}  {}",
            self.label,
            self.time,
            self.cycles,
            if self.running { "(running)" } else { "(paused)" }
        )
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn redraw(&mut self) {
        let line = self.status_line();
        if let Err(err) = write!(self.out, "\r\x1b[2K{line}").and_then(|()| self.out.flush()) {
            debug!(%err, "Failed to redraw status line");
        }
    }
}

impl<W: Write> DisplaySink for TerminalDisplay<W> {
    fn on_tick(&mut self, minutes: &str, seconds: &str) {
        self.time = format!("{minutes}:{seconds}");
        self.redraw();
    }

    fn on_phase_change(&mut self, label: &str) {
        self.label = label.to_string();
        self.redraw();
    }

    fn on_cycles(&mut self, count: u32) {
        self.cycles = count;
        self.redraw();
    }

    fn on_running_changed(&mut self, running: bool) {
        self.running = running;
        self.redraw();
    }
}

// ============================================================================
// TerminalNotifier
// ============================================================================

/// Prints notifications on their own line, tagged with their severity.
pub struct TerminalNotifier<W: Write> {
    out: W,
}

impl TerminalNotifier<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write> TerminalNotifier<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn marker(severity: Severity) -> &'static str {
        match severity {
            Severity::Info => "*",
            Severity::Success => "+",
            Severity::Error => "!",
        }
    }
}

impl<W: Write> NotificationSink for TerminalNotifier<W> {
    fn on_message(&mut self, text: &str, severity: Severity) {
        let marker = Self::marker(severity);
        if let Err(err) = writeln!(self.out, "\n{marker} [{severity}] {text}") {
            debug!(%err, "Failed to print notification");
        }
    }
}

// ============================================================================
// Display
// ============================================================================

/// Display utilities for one-shot CLI output.
pub struct Display;

impl Display {
    /// Shows the effective duration settings as pretty JSON.
    pub fn show_settings(durations: &Durations) -> serde_json::Result<()> {
        println!("{}", serde_json::to_string_pretty(durations)?);
        Ok(())
    }

    /// Shows the interactive controls.
    pub fn show_controls() {
        eprintln!("controls: start | pause | <enter> toggle | skip | work N | short N | long N | status | quit");
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("error: {}", message);
    }
}

// ============================================================================
// Tests
// ============================================================================
