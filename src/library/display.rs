use crate::config::TrackField;

use super::model::Song;

/// Build a display string for a song according to the provided `fields` and separator.
///
/// Blank fields are skipped; falls back to the title when no parts were produced.
pub fn display_from_fields(song: &Song, fields: &[TrackField], sep: &str) -> String {
    let mut parts: Vec<String> = Vec::new();

    for f in fields {
        match f {
            TrackField::Title => {
                if !song.title().trim().is_empty() {
                    parts.push(song.title().trim().to_string());
                }
            }
            TrackField::Artist => {
                if !song.artist().trim().is_empty() {
                    parts.push(song.artist().trim().to_string());
                }
            }
            TrackField::Source => parts.push(song.source_kind().to_string()),
            TrackField::Location => {
                if let Some(loc) = song.location() {
                    parts.push(loc.to_string());
                }
            }
        }
    }

    if parts.is_empty() {
        song.title().to_string()
    } else {
        parts.join(sep)
    }
}
