use std::env;
use std::path::{Path, PathBuf};

use playdeck::config::{LibrarySettings, PlaybackSettings};
use playdeck::library::{self, LibraryError};
use playdeck::{EngineError, PlaybackEngine, Song};

/// The playlist file or directory named on the command line, else the current directory.
pub fn resolve_target() -> PathBuf {
    env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Scan a directory, or parse anything else as a playlist file.
pub fn load_songs(target: &Path, settings: &LibrarySettings) -> Result<Vec<Song>, LibraryError> {
    let songs = if target.is_dir() {
        library::scan(target, settings)
    } else {
        library::load_playlist(target)?
    };
    tracing::info!(path = %target.display(), songs = songs.len(), "queue ready");
    Ok(songs)
}

pub fn start(
    engine: &PlaybackEngine,
    songs: Vec<Song>,
    playback: &PlaybackSettings,
) -> Result<(), EngineError> {
    engine.load_queue(songs)?;
    if playback.autoplay {
        engine.play()?;
    }
    Ok(())
}
