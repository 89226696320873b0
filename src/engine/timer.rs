//! Timer engine for the Pomodoro dashboard.
//!
//! This module provides the core timer functionality:
//! - State transitions (Inactive → Work → Short/Long Break → Work ...)
//! - Countdown driven by a single owned [`Ticker`]
//! - Display and notification updates through injected sinks
//! - Long break after every 4 completed work cycles

use tracing::{debug, info};

use super::ticker::Ticker;
use crate::sink::{DisplaySink, NotificationSink, Severity};
use crate::types::{
    parse_minutes, DurationError, Durations, TimerPhase, TimerSnapshot, TimerState,
};

// ============================================================================
// TimerEngine
// ============================================================================

/// Timer engine that owns the Pomodoro state, its tick schedule and its sinks.
///
/// All operations are synchronous and run to completion. The engine never
/// ticks on its own: a driver (see [`super::run`]) awaits
/// the ticker and calls [`TimerEngine::tick`].
pub struct TimerEngine<D, N> {
    /// Current timer state
    state: TimerState,
    /// The one recurring tick schedule
    ticker: Ticker,
    /// Countdown output
    display: D,
    /// Transient message output
    notifier: N,
}

impl<D: DisplaySink, N: NotificationSink> TimerEngine<D, N> {
    /// Creates a new inactive engine with the given durations and sinks.
    pub fn new(durations: Durations, display: D, notifier: N) -> Self {
        Self {
            state: TimerState::new(durations),
            ticker: Ticker::default(),
            display,
            notifier,
        }
    }

    /// Pushes the full current state to the display.
    pub fn render(&mut self) {
        self.display.on_phase_change(self.state.phase.label());
        self.display_time();
        self.display.on_cycles(self.state.completed_work_cycles);
        self.display.on_running_changed(self.state.is_running);
    }

    /// Starts or resumes the countdown.
    ///
    /// The first start enters the work phase. Calling this while already
    /// running does nothing.
    pub fn start(&mut self) {
        if self.state.is_running && self.ticker.is_armed() {
            debug!("Start ignored, timer already running");
            return;
        }

        if self.state.phase == TimerPhase::Inactive {
            self.state.enter(TimerPhase::Work);
            self.display.on_phase_change(TimerPhase::Work.label());
            self.display_time();
        }

        self.state.is_running = true;
        self.ticker.arm();
        self.display.on_running_changed(true);

        info!(
            phase = self.state.phase.as_str(),
            remaining = self.state.seconds_remaining,
            "Timer started"
        );
    }

    /// Pauses the countdown. Does nothing when already paused.
    pub fn pause(&mut self) {
        if !self.state.is_running && !self.ticker.is_armed() {
            debug!("Pause ignored, timer not running");
            return;
        }

        self.state.is_running = false;
        self.ticker.cancel();
        self.display.on_running_changed(false);

        info!(
            phase = self.state.phase.as_str(),
            remaining = self.state.seconds_remaining,
            "Timer paused"
        );
    }

    /// Pauses a running timer, starts a paused one.
    pub fn toggle(&mut self) {
        if self.state.is_running {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Moves to the next phase regardless of the remaining time.
    ///
    /// A running countdown keeps running in the new phase.
    pub fn skip(&mut self) {
        let was_running = self.state.is_running;
        self.ticker.cancel();

        let from = self.state.phase;
        let next = self.state.advance_phase();

        info!(
            from = from.as_str(),
            to = next.as_str(),
            cycles = self.state.completed_work_cycles,
            "Phase switched"
        );

        self.display.on_phase_change(next.label());
        self.display_time();
        self.display.on_cycles(self.state.completed_work_cycles);
        self.notifier.on_message(
            &format!("Switched to {} time", next.display_name()),
            Severity::Info,
        );

        if was_running {
            self.ticker.arm();
        }
    }

    /// Handles one elapsed second.
    ///
    /// Reaching zero announces the end of the phase and skips to the next
    /// one, which keeps counting down.
    pub fn tick(&mut self) {
        if !self.state.is_running {
            debug!("Tick ignored, timer not running");
            return;
        }

        let reached_zero = self.state.tick();
        self.display_time();

        if reached_zero {
            self.ticker.cancel();
            let kind = if self.state.phase == TimerPhase::Work {
                "Work"
            } else {
                "Break"
            };
            self.notifier
                .on_message(&format!("{kind} time is up!"), Severity::Info);
            self.skip();
        }
    }

    /// Updates the duration of `phase`.
    ///
    /// The visible countdown is reset when the timer is paused on that
    /// phase. Zero minutes is rejected and leaves the state untouched.
    pub fn set_duration(&mut self, phase: TimerPhase, minutes: u32) -> Result<(), DurationError> {
        if let Err(err) = self.state.durations.set(phase, minutes) {
            debug!(phase = phase.as_str(), minutes, %err, "Duration rejected");
            return Err(err);
        }
        self.display.on_duration_changed(phase, minutes);

        if self.state.shows_countdown_for(phase) {
            self.state.seconds_remaining = self.state.durations.seconds(phase);
            self.display_time();
        }

        info!(phase = phase.as_str(), minutes, "Duration updated");
        Ok(())
    }

    /// Updates the duration of `phase` from a raw input field value.
    pub fn set_duration_input(
        &mut self,
        phase: TimerPhase,
        raw: &str,
    ) -> Result<(), DurationError> {
        let minutes = parse_minutes(raw).inspect_err(|err| {
            debug!(phase = phase.as_str(), raw, %err, "Duration input rejected");
        })?;
        self.set_duration(phase, minutes)
    }

    /// Returns a reference to the current timer state.
    pub fn state(&self) -> &TimerState {
        &self.state
    }

    /// Returns a serializable copy of the current state.
    pub fn snapshot(&self) -> TimerSnapshot {
        self.state.snapshot()
    }

    /// Returns true while a tick schedule is armed.
    pub fn is_tick_armed(&self) -> bool {
        self.ticker.is_armed()
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    pub(crate) fn ticker_mut(&mut self) -> &mut Ticker {
        &mut self.ticker
    }

    /// Returns a mutable reference to the timer state (for testing).
    #[cfg(test)]
    pub fn state_mut(&mut self) -> &mut TimerState {
        &mut self.state
    }

    /// Returns a mutable reference to the display sink (for testing).
    #[cfg(test)]
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    fn display_time(&mut self) {
        let (minutes, seconds) = self.state.remaining_parts();
        self.display
            .on_tick(&format!("{minutes:02}"), &format!("{seconds:02}"));
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{DisplayEvent, MockDisplaySink, MockNotificationSink};

    type TestEngine = TimerEngine<MockDisplaySink, MockNotificationSink>;

    fn create_engine() -> TestEngine {
        create_engine_with_durations(Durations::default())
    }

    fn create_engine_with_durations(durations: Durations) -> TestEngine {
        TimerEngine::new(durations, MockDisplaySink::new(), MockNotificationSink::new())
    }

    // ------------------------------------------------------------------------
    // Start / Pause Tests
    // ------------------------------------------------------------------------

    mod start_pause_tests {
        use super::*;

        #[test]
        fn test_new_engine() {
            let engine = create_engine();
            let state = engine.state();

            assert_eq!(state.phase, TimerPhase::Inactive);
            assert_eq!(state.seconds_remaining, 25 * 60);
            assert!(!state.is_running);
            assert_eq!(state.completed_work_cycles, 0);
            assert!(!engine.is_tick_armed());
            assert!(engine.display().events().is_empty());
        }

        #[test]
        fn test_render_pushes_full_state() {
            let mut engine = create_engine();
            engine.render();

            assert_eq!(
                engine.display().events(),
                &[
                    DisplayEvent::Phase("Ready".to_string()),
                    DisplayEvent::Tick {
                        minutes: "25".to_string(),
                        seconds: "00".to_string()
                    },
                    DisplayEvent::Cycles(0),
                    DisplayEvent::Running(false),
                ]
            );
        }

        #[test]
        fn test_first_start_enters_work() {
            let mut engine = create_engine();

            engine.start();

            let state = engine.state();
            assert_eq!(state.phase, TimerPhase::Work);
            assert_eq!(state.seconds_remaining, 1500);
            assert!(state.is_running);
            assert!(engine.is_tick_armed());
            assert_eq!(engine.display().phase_labels(), vec!["Work Time"]);
            assert_eq!(engine.display().last_time().as_deref(), Some("25:00"));
            assert!(engine.notifier().messages().is_empty());
        }

        #[test]
        fn test_start_twice_is_noop() {
            let mut engine = create_engine();
            engine.start();
            let before = engine.snapshot();
            let events = engine.display().events().len();

            engine.start();

            assert_eq!(engine.snapshot(), before);
            assert_eq!(engine.display().events().len(), events);
            assert!(engine.is_tick_armed());
        }

        #[test]
        fn test_resume_keeps_phase_and_time() {
            let mut engine = create_engine();
            engine.start();
            engine.state_mut().seconds_remaining = 700;
            engine.pause();

            engine.start();

            assert_eq!(engine.state().phase, TimerPhase::Work);
            assert_eq!(engine.state().seconds_remaining, 700);
            assert_eq!(engine.display().phase_labels(), vec!["Work Time"]);
        }

        #[test]
        fn test_pause() {
            let mut engine = create_engine();
            engine.start();
            engine.state_mut().seconds_remaining = 1000;

            engine.pause();

            let state = engine.state();
            assert!(!state.is_running);
            assert_eq!(state.phase, TimerPhase::Work);
            assert_eq!(state.seconds_remaining, 1000);
            assert!(!engine.is_tick_armed());
        }

        #[test]
        fn test_pause_when_paused_is_noop() {
            let mut engine = create_engine();

            engine.pause();
            engine.pause();

            assert_eq!(engine.state().phase, TimerPhase::Inactive);
            assert!(engine.display().events().is_empty());
        }

        #[test]
        fn test_last_call_wins() {
            let mut engine = create_engine();

            for (call, expected) in [
                ("start", true),
                ("start", true),
                ("pause", false),
                ("pause", false),
                ("start", true),
                ("pause", false),
            ] {
                match call {
                    "start" => engine.start(),
                    _ => engine.pause(),
                }
                assert_eq!(engine.state().is_running, expected);
                assert_eq!(engine.is_tick_armed(), expected);
            }
        }

        #[test]
        fn test_toggle() {
            let mut engine = create_engine();

            engine.toggle();
            assert!(engine.state().is_running);

            engine.toggle();
            assert!(!engine.state().is_running);
        }
    }

    // ------------------------------------------------------------------------
    // Skip Tests
    // ------------------------------------------------------------------------

    mod skip_tests {
        use super::*;

        #[test]
        fn test_skip_cycle_scenario() {
            let mut engine = create_engine();
            engine.start();

            engine.skip();
            assert_eq!(engine.state().phase, TimerPhase::ShortBreak);
            assert_eq!(engine.state().seconds_remaining, 300);
            assert_eq!(engine.state().completed_work_cycles, 1);

            for cycle in 2..=3 {
                engine.skip();
                assert_eq!(engine.state().phase, TimerPhase::Work);
                engine.skip();
                assert_eq!(engine.state().phase, TimerPhase::ShortBreak);
                assert_eq!(engine.state().completed_work_cycles, cycle);
            }

            engine.skip();
            assert_eq!(engine.state().phase, TimerPhase::Work);
            engine.skip();

            let state = engine.state();
            assert_eq!(state.phase, TimerPhase::LongBreak);
            assert_eq!(state.seconds_remaining, 900);
            assert_eq!(state.completed_work_cycles, 4);
        }

        #[test]
        fn test_skip_notifies_and_updates_display() {
            let mut engine = create_engine();
            engine.start();
            engine.display_mut().clear();

            engine.skip();

            assert_eq!(engine.notifier().texts(), vec!["Switched to Short Break time"]);
            assert_eq!(engine.notifier().messages()[0].1, Severity::Info);
            assert_eq!(
                engine.display().events(),
                &[
                    DisplayEvent::Phase("Short Break".to_string()),
                    DisplayEvent::Tick {
                        minutes: "05".to_string(),
                        seconds: "00".to_string()
                    },
                    DisplayEvent::Cycles(1),
                ]
            );

            engine.skip();
            assert_eq!(engine.notifier().texts()[1], "Switched to Work time");
        }

        #[test]
        fn test_long_break_message() {
            let mut engine = create_engine();
            engine.start();
            engine.state_mut().completed_work_cycles = 3;

            engine.skip();

            assert_eq!(engine.notifier().texts(), vec!["Switched to Long Break time"]);
        }

        #[test]
        fn test_skip_while_running_keeps_running() {
            let mut engine = create_engine();
            engine.start();

            engine.skip();

            assert!(engine.state().is_running);
            assert!(engine.is_tick_armed());
        }

        #[test]
        fn test_skip_while_paused_stays_paused() {
            let mut engine = create_engine();
            engine.start();
            engine.pause();

            engine.skip();

            assert_eq!(engine.state().phase, TimerPhase::ShortBreak);
            assert!(!engine.state().is_running);
            assert!(!engine.is_tick_armed());
        }

        #[test]
        fn test_skip_from_inactive_enters_work_without_cycle() {
            let mut engine = create_engine();

            engine.skip();

            assert_eq!(engine.state().phase, TimerPhase::Work);
            assert_eq!(engine.state().completed_work_cycles, 0);
            assert!(!engine.state().is_running);
        }

        #[test]
        fn test_break_to_work_does_not_count_cycle() {
            let mut engine = create_engine();
            engine.start();
            engine.skip();
            let cycles = engine.state().completed_work_cycles;

            engine.skip();

            assert_eq!(engine.state().phase, TimerPhase::Work);
            assert_eq!(engine.state().completed_work_cycles, cycles);
        }

        #[test]
        fn test_long_break_at_multiples_of_4() {
            let mut engine = create_engine();
            engine.start();

            for count in [4, 8, 12] {
                engine.state_mut().completed_work_cycles = count - 1;
                engine.state_mut().phase = TimerPhase::Work;

                engine.skip();

                assert_eq!(
                    engine.state().phase,
                    TimerPhase::LongBreak,
                    "Expected LongBreak at cycle {}",
                    count
                );
            }
        }

        #[test]
        fn test_short_break_at_non_multiples_of_4() {
            let mut engine = create_engine();
            engine.start();

            for count in [1, 2, 3, 5, 6, 7] {
                engine.state_mut().completed_work_cycles = count - 1;
                engine.state_mut().phase = TimerPhase::Work;

                engine.skip();

                assert_eq!(
                    engine.state().phase,
                    TimerPhase::ShortBreak,
                    "Expected ShortBreak at cycle {}",
                    count
                );
            }
        }
    }

    // ------------------------------------------------------------------------
    // Tick Tests
    // ------------------------------------------------------------------------

    mod tick_tests {
        use super::*;

        #[test]
        fn test_tick_decrements_and_displays() {
            let mut engine = create_engine();
            engine.start();

            engine.tick();
            engine.tick();

            assert_eq!(engine.state().seconds_remaining, 1498);
            assert_eq!(engine.display().last_time().as_deref(), Some("24:58"));
        }

        #[test]
        fn test_tick_ignored_while_paused() {
            let mut engine = create_engine();
            engine.start();
            engine.pause();

            engine.tick();

            assert_eq!(engine.state().seconds_remaining, 1500);
        }

        #[test]
        fn test_tick_ignored_before_start() {
            let mut engine = create_engine();

            engine.tick();

            assert_eq!(engine.state().phase, TimerPhase::Inactive);
            assert_eq!(engine.state().seconds_remaining, 1500);
        }

        #[test]
        fn test_work_timeout_moves_to_break_and_keeps_running() {
            let mut engine = create_engine();
            engine.start();
            engine.state_mut().seconds_remaining = 1;

            engine.tick();

            let state = engine.state();
            assert_eq!(state.phase, TimerPhase::ShortBreak);
            assert_eq!(state.seconds_remaining, 300);
            assert_eq!(state.completed_work_cycles, 1);
            assert!(state.is_running);
            assert!(engine.is_tick_armed());
            assert_eq!(
                engine.notifier().texts(),
                vec!["Work time is up!", "Switched to Short Break time"]
            );
        }

        #[test]
        fn test_break_timeout_announces_break() {
            let mut engine = create_engine();
            engine.start();
            engine.skip();
            engine.state_mut().seconds_remaining = 1;

            engine.tick();

            assert_eq!(engine.state().phase, TimerPhase::Work);
            assert_eq!(engine.state().seconds_remaining, 1500);
            assert!(engine.notifier().texts().contains(&"Break time is up!"));
        }

        #[test]
        fn test_tick_at_zero_never_underflows() {
            let mut engine = create_engine();
            engine.start();
            engine.state_mut().seconds_remaining = 0;

            engine.tick();

            assert_eq!(engine.state().phase, TimerPhase::ShortBreak);
            assert_eq!(engine.state().seconds_remaining, 300);
        }

        #[test]
        fn test_full_countdown_with_short_durations() {
            let durations = Durations::default()
                .with_work(1)
                .with_short_break(1)
                .with_long_break(2);
            let mut engine = create_engine_with_durations(durations);
            engine.start();

            for _ in 0..60 {
                engine.tick();
            }
            assert_eq!(engine.state().phase, TimerPhase::ShortBreak);
            assert_eq!(engine.state().seconds_remaining, 60);

            let previous = engine.state().seconds_remaining;
            engine.tick();
            assert_eq!(engine.state().seconds_remaining, previous - 1);
        }
    }

    // ------------------------------------------------------------------------
    // Duration Tests
    // ------------------------------------------------------------------------

    mod duration_tests {
        use super::*;

        #[test]
        fn test_edit_current_phase_while_paused_resets_countdown() {
            let mut engine = create_engine();
            engine.start();
            engine.skip();
            engine.pause();
            assert_eq!(engine.state().phase, TimerPhase::ShortBreak);

            engine.set_duration(TimerPhase::ShortBreak, 10).unwrap();

            assert_eq!(engine.state().seconds_remaining, 600);
            assert_eq!(engine.display().last_time().as_deref(), Some("10:00"));
        }

        #[test]
        fn test_edit_work_while_inactive_resets_countdown() {
            let mut engine = create_engine();

            engine.set_duration(TimerPhase::Work, 40).unwrap();

            assert_eq!(engine.state().seconds_remaining, 2400);
            assert_eq!(engine.state().durations.work, 40);
        }

        #[test]
        fn test_edit_while_running_only_affects_future() {
            let mut engine = create_engine();
            engine.start();
            engine.tick();

            engine.set_duration(TimerPhase::Work, 30).unwrap();

            assert_eq!(engine.state().seconds_remaining, 1499);
            assert_eq!(engine.state().durations.work, 30);

            engine.skip();
            engine.skip();
            assert_eq!(engine.state().seconds_remaining, 1800);
        }

        #[test]
        fn test_edit_other_phase_only_affects_future() {
            let mut engine = create_engine();
            engine.start();
            engine.pause();

            engine.set_duration(TimerPhase::LongBreak, 20).unwrap();

            assert_eq!(engine.state().seconds_remaining, 1500);
            assert_eq!(engine.state().durations.long_break, 20);
        }

        #[test]
        fn test_edit_reports_duration_value() {
            let mut engine = create_engine();

            engine.set_duration(TimerPhase::ShortBreak, 7).unwrap();

            assert_eq!(
                engine.display().events(),
                &[DisplayEvent::Duration {
                    phase: TimerPhase::ShortBreak,
                    minutes: 7
                }]
            );
        }

        #[test]
        fn test_set_twice_equals_once() {
            let mut once = create_engine();
            once.set_duration(TimerPhase::Work, 30).unwrap();

            let mut twice = create_engine();
            twice.set_duration(TimerPhase::Work, 30).unwrap();
            twice.set_duration(TimerPhase::Work, 30).unwrap();

            assert_eq!(once.snapshot(), twice.snapshot());
            assert_eq!(once.display().last_time(), twice.display().last_time());
        }

        #[test]
        fn test_invalid_input_leaves_state_unchanged() {
            let mut engine = create_engine();
            let before = engine.snapshot();

            for raw in ["abc", "", "0", "-3", "1.5"] {
                assert!(engine.set_duration_input(TimerPhase::Work, raw).is_err());
            }
            assert_eq!(
                engine.set_duration(TimerPhase::Work, 0),
                Err(DurationError::NotPositive)
            );
            assert_eq!(
                engine.set_duration(TimerPhase::Inactive, 5),
                Err(DurationError::InactivePhase)
            );

            assert_eq!(engine.snapshot(), before);
            assert!(engine.display().events().is_empty());
            assert!(engine.notifier().messages().is_empty());
        }

        #[test]
        fn test_valid_input() {
            let mut engine = create_engine();

            engine.set_duration_input(TimerPhase::Work, " 45 ").unwrap();

            assert_eq!(engine.state().durations.work, 45);
            assert_eq!(engine.state().seconds_remaining, 45 * 60);
        }
    }
}
