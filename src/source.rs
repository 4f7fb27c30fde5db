//! Playback backends.
//!
//! A `PlaybackSource` is a per-track transport handle: the engine creates a fresh
//! one through `SourceFactory` every time a song becomes current and drives it
//! with `load`/`play`/`pause`/`stop`. Position tracking lives in the engine, not
//! here.

use std::path::PathBuf;

use crate::library::{Song, SourceKind};

mod factory;
mod local;
mod remote;

pub use factory::{SourceConstructor, SourceFactory, create_source};
pub use local::LocalSource;
pub use remote::RemoteSource;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("no song is loaded")]
    NotLoaded,

    #[error("\"{title}\" has no location to play from")]
    MissingLocation { title: String },

    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("unsupported stream url: {0}")]
    UnsupportedUrl(String),
}

/// Transport operations every backend provides.
///
/// Implementations must be fast: anything slow (network, decoding) belongs on the
/// backend's own threads, never on the engine's command path.
pub trait PlaybackSource: Send {
    /// The tag this backend serves.
    fn kind(&self) -> SourceKind;

    /// Prepare `song` for playback, replacing anything loaded before.
    fn load(&mut self, song: &Song) -> Result<(), SourceError>;

    /// Begin or resume playback of the loaded song.
    fn play(&mut self) -> Result<(), SourceError>;

    /// Suspend playback.
    fn pause(&mut self) -> Result<(), SourceError>;

    /// Terminate playback and release backend resources. Idempotent.
    fn stop(&mut self) -> Result<(), SourceError>;
}

/// Transport state shared by the built-in backends.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Transport {
    #[default]
    Idle,
    Loaded,
    Playing,
    Paused,
}

#[cfg(test)]
pub(crate) mod testing;

#[cfg(test)]
mod tests;
