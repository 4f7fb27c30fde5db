use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use uuid::Uuid;

use super::LibraryError;

/// Opaque identity of a `Song`, stable for the lifetime of the value and its clones.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SongId(Uuid);

impl SongId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Which playback backend a song is delivered through.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    /// A file on the local filesystem.
    #[default]
    Local,
    /// A stream reachable over HTTP(S).
    Remote,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Local => f.write_str("local"),
            SourceKind::Remote => f.write_str("remote"),
        }
    }
}

/// An immutable, playable track.
///
/// Two songs are equal when they share an id; cloning keeps the id, so a clone is the
/// same song.
#[derive(Debug, Clone)]
pub struct Song {
    id: SongId,
    title: String,
    artist: String,
    duration_secs: f64,
    source_kind: SourceKind,
    location: Option<String>,
}

impl Song {
    /// Create a song with a freshly generated id.
    ///
    /// `duration_secs` must be strictly positive and fit in a `Duration`.
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        duration_secs: f64,
        source_kind: SourceKind,
    ) -> Result<Self, LibraryError> {
        if duration_secs <= 0.0 || Duration::try_from_secs_f64(duration_secs).is_err() {
            return Err(LibraryError::InvalidDuration(duration_secs));
        }

        Ok(Self {
            id: SongId::generate(),
            title: title.into(),
            artist: artist.into(),
            duration_secs,
            source_kind,
            location: None,
        })
    }

    /// Attach the path or URL the backend should open.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn id(&self) -> SongId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    /// Length of the track in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.duration_secs)
    }

    pub fn source_kind(&self) -> SourceKind {
        self.source_kind
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
}

impl PartialEq for Song {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Song {}
