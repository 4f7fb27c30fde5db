//! The periodic progress tick.
//!
//! Each ticker is a thread sleeping on a stop channel. Dropping the `Ticker`
//! disconnects the channel, which wakes the thread and ends it. Tickers are
//! numbered with a generation so a tick that raced a cancellation can tell it is
//! stale once it gets the engine lock.

use std::ops::ControlFlow;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

pub(super) struct Ticker {
    generation: u64,
    _stop: Sender<()>,
}

impl Ticker {
    pub(super) fn generation(&self) -> u64 {
        self.generation
    }
}

/// Call `on_tick(generation)` every `interval` until it breaks or the returned
/// `Ticker` is dropped.
pub(super) fn spawn_ticker<F>(
    interval: Duration,
    generation: u64,
    on_tick: F,
) -> std::io::Result<Ticker>
where
    F: Fn(u64) -> ControlFlow<()> + Send + 'static,
{
    let (stop_tx, stop_rx) = mpsc::channel::<()>();

    thread::Builder::new()
        .name(format!("playdeck-tick-{generation}"))
        .spawn(move || {
            loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        if on_tick(generation).is_break() {
                            break;
                        }
                    }
                    // Nothing is ever sent; any wakeup means the ticker was dropped.
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            tracing::trace!(generation, "ticker stopped");
        })?;

    Ok(Ticker {
        generation,
        _stop: stop_tx,
    })
}
