//! Songs and the places they come from.
//!
//! `Song` is the immutable track description the engine queues. Songs are
//! produced either from a TOML playlist file or by scanning a directory of
//! local audio files.

use std::path::PathBuf;

mod display;
mod model;
mod playlist;
mod scan;

pub use display::display_from_fields;
pub use model::{Song, SongId, SourceKind};
pub use playlist::{load_playlist, parse_playlist};
pub use scan::scan;

#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error("song duration must be a positive number of seconds, got {0}")]
    InvalidDuration(f64),

    #[error("invalid playlist entry \"{title}\": {reason}")]
    InvalidEntry { title: String, reason: String },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed playlist: {0}")]
    Parse(#[from] toml::de::Error),
}
