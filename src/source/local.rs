use std::path::{Path, PathBuf};

use crate::library::{Song, SourceKind};

use super::{PlaybackSource, SourceError, Transport};

/// Plays files from the local filesystem.
///
/// `load` only checks that the file exists; there is no decoder behind it.
#[derive(Debug, Default)]
pub struct LocalSource {
    path: Option<PathBuf>,
    transport: Transport,
}

impl LocalSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transport(&self) -> Transport {
        self.transport
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl PlaybackSource for LocalSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Local
    }

    fn load(&mut self, song: &Song) -> Result<(), SourceError> {
        self.path = None;
        self.transport = Transport::Idle;

        let location = song.location().ok_or_else(|| SourceError::MissingLocation {
            title: song.title().to_string(),
        })?;

        let path = PathBuf::from(location);
        if !path.is_file() {
            return Err(SourceError::FileNotFound(path));
        }

        tracing::debug!(path = %path.display(), "local source loaded");
        self.path = Some(path);
        self.transport = Transport::Loaded;
        Ok(())
    }

    fn play(&mut self) -> Result<(), SourceError> {
        if self.path.is_none() {
            return Err(SourceError::NotLoaded);
        }
        self.transport = Transport::Playing;
        Ok(())
    }

    fn pause(&mut self) -> Result<(), SourceError> {
        if self.path.is_none() {
            return Err(SourceError::NotLoaded);
        }
        self.transport = Transport::Paused;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), SourceError> {
        if let Some(path) = self.path.take() {
            tracing::debug!(path = %path.display(), "local source released");
        }
        self.transport = Transport::Idle;
        Ok(())
    }
}
