//! Reads controls from a line-oriented input stream.
//!
//! Reading runs on a plain thread: a blocking read on stdin cannot be
//! cancelled, and a runtime-owned reader would hold up shutdown until the
//! next newline.

use std::io::BufRead;
use std::thread;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::display::Display;
use crate::engine::Control;

/// Spawns a thread forwarding controls from stdin.
pub fn spawn_stdin_reader(
    tx: mpsc::UnboundedSender<Control>,
) -> std::io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("stdin-controls".to_string())
        .spawn(move || forward_controls(std::io::stdin().lock(), tx))
}

/// Forwards parsed controls from `reader` until it ends or `Quit` is sent.
///
/// Unparseable lines are reported and skipped. End of input counts as
/// `Quit`, since nothing else can drive the session afterwards.
pub fn forward_controls<R: BufRead>(reader: R, tx: mpsc::UnboundedSender<Control>) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                warn!(%err, "Failed to read input");
                break;
            }
        };

        match line.parse::<Control>() {
            Ok(control) => {
                let quit = control == Control::Quit;
                if tx.send(control).is_err() || quit {
                    return;
                }
            }
            Err(err) => {
                warn!(%err, "Ignoring input line");
                Display::show_error(&format!("{} ({})", err, err.suggestion()));
            }
        }
    }

    debug!("Input closed");
    let _ = tx.send(Control::Quit);
}
