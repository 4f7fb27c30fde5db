//! Presentation adapter over the engine's event stream.
//!
//! `PlaybackViewModel` keeps the last known value of every observable field
//! and renders it as text. It never issues commands; callers talk to the
//! engine directly.

use std::sync::mpsc::{Receiver, RecvTimeoutError, TryRecvError};
use std::time::Duration;

use crate::config::{TimeField, UiSettings};
use crate::engine::{PlaybackEngine, PlaybackEvent};
use crate::library::{Song, display_from_fields};

/// Last known playback state as seen by the presentation layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NowPlaying {
    pub song: Option<Song>,
    pub playing: bool,
    pub progress: f64,
    /// Set once the queue has played out; cleared by the next track or play.
    pub ended: bool,
}

pub struct PlaybackViewModel {
    events: Receiver<PlaybackEvent>,
    ui: UiSettings,
    now: NowPlaying,
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

impl PlaybackViewModel {
    /// Subscribe to `engine` and seed state from its current snapshot.
    pub fn new(engine: &PlaybackEngine, ui: UiSettings) -> Self {
        // Subscribe before reading the snapshot so no change falls in between;
        // replayed events carry absolute values and are harmless.
        let events = engine.subscribe();
        let info = engine.snapshot();

        Self {
            events,
            ui,
            now: NowPlaying {
                song: info.song,
                playing: info.playing,
                progress: info.progress,
                ended: false,
            },
        }
    }

    pub fn now_playing(&self) -> &NowPlaying {
        &self.now
    }

    pub fn apply(&mut self, event: PlaybackEvent) {
        match event {
            PlaybackEvent::CurrentSong(song) => {
                self.now.song = song;
                self.now.ended = false;
            }
            PlaybackEvent::Playing(playing) => {
                self.now.playing = playing;
                if playing {
                    self.now.ended = false;
                }
            }
            PlaybackEvent::Progress(progress) => self.now.progress = progress,
            PlaybackEvent::QueueEnded => self.now.ended = true,
        }
    }

    /// Apply every pending event without blocking. Returns how many were applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        loop {
            match self.events.try_recv() {
                Ok(event) => {
                    self.apply(event);
                    applied += 1;
                }
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => return applied,
            }
        }
    }

    /// Block up to `timeout` for the next event, then drain the rest.
    pub fn wait(&mut self, timeout: Duration) -> Result<usize, RecvTimeoutError> {
        let event = self.events.recv_timeout(timeout)?;
        self.apply(event);
        Ok(1 + self.pump())
    }

    /// The configured song fields, or a placeholder when nothing is queued.
    pub fn track_text(&self) -> String {
        match &self.now.song {
            Some(song) => {
                display_from_fields(song, &self.ui.track_fields, &self.ui.track_separator)
            }
            None => "Nothing queued".to_string(),
        }
    }

    /// Elapsed/total/remaining per the configured time fields.
    pub fn time_text(&self) -> Option<String> {
        if self.ui.time_fields.is_empty() {
            return None;
        }

        let elapsed = Duration::from_secs_f64(self.now.progress.max(0.0));
        let total = self.now.song.as_ref().map(Song::duration);

        let mut parts: Vec<String> = Vec::new();
        for f in &self.ui.time_fields {
            match f {
                TimeField::Elapsed => parts.push(format_mmss(elapsed)),
                TimeField::Total => {
                    if let Some(t) = total {
                        parts.push(format_mmss(t));
                    }
                }
                TimeField::Remaining => {
                    if let Some(t) = total {
                        let rem = t.saturating_sub(elapsed);
                        parts.push(format!("-{}", format_mmss(rem)));
                    }
                }
            }
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(&self.ui.time_separator))
        }
    }

    pub fn status_line(&self) -> String {
        let marker = if self.now.ended {
            "■"
        } else if self.now.playing {
            "▶"
        } else {
            "⏸"
        };

        match self.time_text() {
            Some(time) => format!("{marker} {}  [{time}]", self.track_text()),
            None => format!("{marker} {}", self.track_text()),
        }
    }
}

#[cfg(test)]
mod tests;
