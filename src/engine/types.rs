//! Engine-facing small types: state-change events and the polling snapshot.

use crate::library::Song;

/// Track time added by one tick, in seconds.
pub const TICK_STEP_SECS: f64 = 1.0;

/// A single observable state change, delivered to subscribers in the order the
/// fields changed.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEvent {
    /// The current song changed (`None` once the queue is emptied).
    CurrentSong(Option<Song>),
    /// Playback started or stopped.
    Playing(bool),
    /// Seconds elapsed in the current song.
    Progress(f64),
    /// The last song in the queue played to its end.
    QueueEnded,
}

/// Point-in-time view of the engine state.
#[derive(Debug, Clone, Default)]
pub struct PlaybackInfo {
    /// Position of the current song in the queue.
    pub index: Option<usize>,
    pub song: Option<Song>,
    pub queue_len: usize,
    pub playing: bool,
    pub progress: f64,
}
