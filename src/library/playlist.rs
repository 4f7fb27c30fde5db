//! TOML playlist files.
//!
//! A playlist is an ordered `[[songs]]` array; file order is queue order:
//!
//! ```toml
//! [[songs]]
//! title = "Blackened"
//! artist = "Metallica"
//! duration = 401.0
//! source = "local"
//! location = "/music/blackened.flac"
//! ```

use std::path::Path;

use serde::Deserialize;

use super::LibraryError;
use super::model::{Song, SourceKind};

#[derive(Debug, Deserialize)]
struct PlaylistFile {
    #[serde(default)]
    songs: Vec<PlaylistEntry>,
}

#[derive(Debug, Deserialize)]
struct PlaylistEntry {
    title: String,
    #[serde(default = "unknown_artist")]
    artist: String,
    duration: f64,
    #[serde(default)]
    source: SourceKind,
    location: Option<String>,
}

fn unknown_artist() -> String {
    "Unknown Artist".to_string()
}

impl PlaylistEntry {
    fn into_song(self) -> Result<Song, LibraryError> {
        let title = self.title.clone();
        let song = Song::new(self.title, self.artist, self.duration, self.source).map_err(
            |e| match e {
                LibraryError::InvalidDuration(d) => LibraryError::InvalidEntry {
                    title,
                    reason: format!("duration must be a positive number of seconds, got {d}"),
                },
                other => other,
            },
        )?;

        Ok(match self.location {
            Some(loc) if !loc.trim().is_empty() => song.with_location(loc.trim()),
            _ => song,
        })
    }
}

/// Parse playlist text into songs, preserving file order.
pub fn parse_playlist(text: &str) -> Result<Vec<Song>, LibraryError> {
    let file: PlaylistFile = toml::from_str(text)?;
    file.songs.into_iter().map(PlaylistEntry::into_song).collect()
}

/// Read and parse a playlist file from disk.
pub fn load_playlist(path: &Path) -> Result<Vec<Song>, LibraryError> {
    let text = std::fs::read_to_string(path).map_err(|source| LibraryError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let songs = parse_playlist(&text)?;
    tracing::debug!(path = %path.display(), songs = songs.len(), "loaded playlist");
    Ok(songs)
}
