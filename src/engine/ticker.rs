//! The single recurring tick schedule owned by the timer engine.
//!
//! Arming and cancelling are plain synchronous calls and do not need a
//! runtime. The underlying `tokio::time::Interval` is created lazily the
//! first time [`Ticker::tick`] is polled after arming, so the first tick
//! fires one full period after the schedule was (re)armed.

use std::future;

use tokio::time::{interval_at, Duration, Instant, Interval, MissedTickBehavior};

/// Default tick period.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Owned, cancelable periodic schedule.
#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    armed: bool,
    interval: Option<Interval>,
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            armed: false,
            interval: None,
        }
    }

    /// (Re)starts the schedule, replacing any previous one.
    pub fn arm(&mut self) {
        self.armed = true;
        self.interval = None;
    }

    /// Stops the schedule. Idempotent.
    pub fn cancel(&mut self) {
        self.armed = false;
        self.interval = None;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Waits for the next tick.
    ///
    /// Never resolves while the ticker is not armed. Cancel safe: dropping
    /// the future loses no state, and a cancelled schedule is discarded so
    /// it cannot deliver a late tick.
    pub async fn tick(&mut self) {
        if !self.armed {
            future::pending::<()>().await;
        }

        let period = self.period;
        let interval = self.interval.get_or_insert_with(|| {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            interval
        });
        interval.tick().await;
    }
}
