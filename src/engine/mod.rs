//! Engine module for the Pomodoro dashboard timer.
//!
//! This module contains the core timer functionality:
//! - `timer`: Timer engine with state transitions and countdown logic
//! - `ticker`: The single owned, cancelable one-second schedule
//! - `control`: User controls and their text syntax
//! - `runner`: Event loop feeding controls and ticks into the engine

pub mod control;
pub mod runner;
pub mod ticker;
pub mod timer;

pub use control::{Control, ControlParseError};
pub use runner::{apply_control, run};
pub use ticker::{Ticker, TICK_PERIOD};
pub use timer::TimerEngine;
