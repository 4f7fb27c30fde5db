use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/playdeck/config.toml`,
/// else `~/.config/playdeck/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `PLAYDECK__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub playback: PlaybackSettings,
    pub library: LibrarySettings,
    pub ui: UiSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Interval between progress ticks (milliseconds). Each tick advances
    /// progress by one second of track time.
    /// Set to 0 to disable the background ticker and drive `tick()` by hand.
    pub tick_interval_ms: u64,
    /// Whether the front end starts playing as soon as the queue is loaded.
    pub autoplay: bool,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            autoplay: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            follow_links: true,
            include_hidden: false,
            recursive: true,
            max_depth: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Which song fields to show in the status line, and in what order.
    ///
    /// Example: ["artist", "title"]
    pub track_fields: Vec<TrackField>,

    /// Separator used to join `track_fields`.
    pub track_separator: String,

    /// Which time fields to show in the status line, and in what order.
    ///
    /// Example: ["elapsed", "total", "remaining"]
    pub time_fields: Vec<TimeField>,

    /// Separator used to join `time_fields`.
    pub time_separator: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            track_fields: vec![TrackField::Artist, TrackField::Title],
            track_separator: " - ".to_string(),
            time_fields: vec![TimeField::Elapsed, TimeField::Total],
            time_separator: " / ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// `tracing` filter directive used when `RUST_LOG` is not set.
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeField {
    Elapsed,
    Total,
    Remaining,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackField {
    Title,
    Artist,
    /// The source kind tag (`local` / `remote`).
    #[serde(alias = "kind")]
    Source,
    /// File path or URL.
    #[serde(alias = "path", alias = "url")]
    Location,
}
