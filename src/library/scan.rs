use std::path::Path;

use lofty::prelude::*;
use walkdir::WalkDir;

use crate::config::{LibrarySettings, TrackField};

use super::display::display_from_fields;
use super::model::{Song, SourceKind};

pub(super) fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Read title, artist and duration from `path`.
///
/// Returns `None` when the file cannot be parsed or reports no duration, since such a
/// song could never auto-advance.
fn read_song(path: &Path) -> Option<Song> {
    let tagged = match lofty::read_from_path(path) {
        Ok(t) => t,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "skipping unreadable file");
            return None;
        }
    };

    let duration = tagged.properties().duration().as_secs_f64();
    if duration <= 0.0 {
        tracing::debug!(path = %path.display(), "skipping file without duration");
        return None;
    }

    let mut title = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string();
    let mut artist = "Unknown Artist".to_string();

    if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
        if let Some(v) = tag.title() {
            if !v.trim().is_empty() {
                title = v.trim().to_string();
            }
        }
        if let Some(v) = tag.artist() {
            if !v.trim().is_empty() {
                artist = v.trim().to_string();
            }
        }
    }

    let song = Song::new(title, artist, duration, SourceKind::Local).ok()?;
    Some(song.with_location(path.display().to_string()))
}

/// Collect local songs under `dir`, sorted case-insensitively by "artist - title".
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<Song> {
    let mut songs: Vec<Song> = Vec::new();

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if path.is_file()
            && (settings.include_hidden || !is_hidden(path))
            && is_audio_file(path, settings)
        {
            if let Some(song) = read_song(path) {
                songs.push(song);
            }
        }
    }

    let key_fields = [TrackField::Artist, TrackField::Title];
    songs.sort_by_cached_key(|s| display_from_fields(s, &key_fields, " - ").to_lowercase());

    tracing::debug!(dir = %dir.display(), songs = songs.len(), "library scan finished");
    songs
}
