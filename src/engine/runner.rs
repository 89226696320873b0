//! Cooperative driver for the timer engine.
//!
//! The runner waits for either the next user control or the next tick and
//! applies exactly one of them before waiting again, so no two operations
//! ever interleave.

use std::ops::ControlFlow;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::control::Control;
use super::timer::TimerEngine;
use crate::sink::{DisplaySink, NotificationSink, Severity};
use crate::types::TimerSnapshot;

/// Runs the engine until `Quit` arrives or every control sender is dropped.
///
/// The current state is rendered once on entry. On exit the countdown is
/// paused so no tick stays armed, and the final state is returned.
pub async fn run<D, N>(
    engine: &mut TimerEngine<D, N>,
    controls: &mut mpsc::UnboundedReceiver<Control>,
) -> TimerSnapshot
where
    D: DisplaySink,
    N: NotificationSink,
{
    engine.render();

    loop {
        tokio::select! {
            control = controls.recv() => {
                let Some(control) = control else {
                    debug!("Control channel closed");
                    break;
                };
                if apply_control(engine, control).is_break() {
                    break;
                }
            }
            () = engine.ticker_mut().tick() => engine.tick(),
        }
    }

    engine.pause();
    let snapshot = engine.snapshot();
    info!(
        phase = snapshot.phase.as_str(),
        cycles = snapshot.completed_work_cycles,
        "Timer session ended"
    );
    snapshot
}

/// Applies a single control to the engine.
///
/// Rejected duration edits are reported through the notification sink
/// with error severity; the engine state stays as it was.
pub fn apply_control<D, N>(engine: &mut TimerEngine<D, N>, control: Control) -> ControlFlow<()>
where
    D: DisplaySink,
    N: NotificationSink,
{
    match control {
        Control::Start => engine.start(),
        Control::Pause => engine.pause(),
        Control::Toggle => engine.toggle(),
        Control::Skip => engine.skip(),
        Control::SetDuration { phase, raw } => {
            if let Err(err) = engine.set_duration_input(phase, &raw) {
                warn!(phase = phase.as_str(), raw = %raw, %err, "Ignoring duration edit");
                engine.notifier_mut().on_message(
                    &format!("Invalid {} duration: {}", phase.display_name(), err),
                    Severity::Error,
                );
            }
        }
        Control::Status => {
            engine.render();
            let snapshot = engine.snapshot();
            match serde_json::to_string(&snapshot) {
                Ok(json) => info!(state = %json, "Status requested"),
                Err(err) => warn!(%err, "Failed to serialize timer state"),
            }
            engine
                .notifier_mut()
                .on_message(&snapshot.summary(), Severity::Info);
        }
        Control::Quit => return ControlFlow::Break(()),
    }
    ControlFlow::Continue(())
}
