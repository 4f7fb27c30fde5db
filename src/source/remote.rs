use crate::library::{Song, SourceKind};

use super::{PlaybackSource, SourceError, Transport};

/// Streams songs over HTTP(S).
///
/// Only the URL is validated; no connection is opened.
#[derive(Debug, Default)]
pub struct RemoteSource {
    url: Option<String>,
    transport: Transport,
}

fn is_stream_url(location: &str) -> bool {
    let lower = location.trim().to_ascii_lowercase();
    ["http://", "https://"]
        .iter()
        .any(|scheme| lower.len() > scheme.len() && lower.starts_with(scheme))
}

impl RemoteSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transport(&self) -> Transport {
        self.transport
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

impl PlaybackSource for RemoteSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Remote
    }

    fn load(&mut self, song: &Song) -> Result<(), SourceError> {
        self.url = None;
        self.transport = Transport::Idle;

        let location = song.location().ok_or_else(|| SourceError::MissingLocation {
            title: song.title().to_string(),
        })?;

        if !is_stream_url(location) {
            return Err(SourceError::UnsupportedUrl(location.to_string()));
        }

        tracing::debug!(url = location, "remote source loaded");
        self.url = Some(location.trim().to_string());
        self.transport = Transport::Loaded;
        Ok(())
    }

    fn play(&mut self) -> Result<(), SourceError> {
        if self.url.is_none() {
            return Err(SourceError::NotLoaded);
        }
        self.transport = Transport::Playing;
        Ok(())
    }

    fn pause(&mut self) -> Result<(), SourceError> {
        if self.url.is_none() {
            return Err(SourceError::NotLoaded);
        }
        self.transport = Transport::Paused;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), SourceError> {
        if let Some(url) = self.url.take() {
            tracing::debug!(url = %url, "remote source released");
        }
        self.transport = Transport::Idle;
        Ok(())
    }
}
