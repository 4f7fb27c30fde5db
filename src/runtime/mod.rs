use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration;

use playdeck::{PlaybackEngine, PlaybackViewModel};

mod logging;
mod settings;
mod startup;

/// How long to wait for a state change before re-checking.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, warning) = settings::load_settings();
    logging::init(&settings.log);
    if let Some(msg) = warning {
        tracing::warn!("{msg}");
    }

    let target = startup::resolve_target();
    let songs = startup::load_songs(&target, &settings.library)?;

    // The one playback context for this process.
    let engine = PlaybackEngine::new(settings.playback.clone());
    let mut view = PlaybackViewModel::new(&engine, settings.ui.clone());
    startup::start(&engine, songs, &settings.playback)?;

    let manual_ticks = settings.playback.tick_interval_ms == 0;
    let mut last_line = String::new();

    loop {
        view.pump();
        let line = view.status_line();
        if line != last_line {
            println!("{line}");
            last_line = line;
        }

        if !view.now_playing().playing {
            break;
        }

        if manual_ticks {
            // No background ticker: run through the queue as fast as possible.
            if let Err(e) = engine.tick() {
                tracing::warn!(error = %e, "playback stopped");
            }
            continue;
        }

        match view.wait(POLL_INTERVAL) {
            Ok(_) | Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    Ok(())
}
