//! A recording backend for exercising the engine without touching the filesystem.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::library::{Song, SourceKind};

use super::{PlaybackSource, SourceError, SourceFactory};

/// Shared, ordered record of transport calls across every `RecordingSource`
/// built from the same factory. Entries look like `"2:load B"`, where `2` is the
/// instance number.
#[derive(Clone, Default)]
pub(crate) struct CallLog {
    calls: Arc<Mutex<Vec<String>>>,
    instances: Arc<AtomicUsize>,
}

impl CallLog {
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.calls.lock().unwrap())
    }

    pub(crate) fn instances(&self) -> usize {
        self.instances.load(Ordering::SeqCst)
    }

    fn push(&self, entry: String) {
        self.calls.lock().unwrap().push(entry);
    }
}

pub(crate) struct RecordingSource {
    kind: SourceKind,
    instance: usize,
    log: CallLog,
    fail_titles: Arc<Vec<String>>,
}

impl PlaybackSource for RecordingSource {
    fn kind(&self) -> SourceKind {
        self.kind
    }

    fn load(&mut self, song: &Song) -> Result<(), SourceError> {
        self.log.push(format!("{}:load {}", self.instance, song.title()));
        if self.fail_titles.iter().any(|t| t == song.title()) {
            return Err(SourceError::FileNotFound(song.title().into()));
        }
        Ok(())
    }

    fn play(&mut self) -> Result<(), SourceError> {
        self.log.push(format!("{}:play", self.instance));
        Ok(())
    }

    fn pause(&mut self) -> Result<(), SourceError> {
        self.log.push(format!("{}:pause", self.instance));
        Ok(())
    }

    fn stop(&mut self) -> Result<(), SourceError> {
        self.log.push(format!("{}:stop", self.instance));
        Ok(())
    }
}

/// A factory whose sources record into `log`; loading any song titled in
/// `fail_titles` fails.
pub(crate) fn recording_factory(log: &CallLog, fail_titles: &[&str]) -> SourceFactory {
    let fail_titles: Arc<Vec<String>> =
        Arc::new(fail_titles.iter().map(|t| t.to_string()).collect());

    let mut factory = SourceFactory::new();
    for kind in [SourceKind::Local, SourceKind::Remote] {
        let log = log.clone();
        let fail_titles = fail_titles.clone();
        factory = factory.register(kind, move || {
            let instance = log.instances.fetch_add(1, Ordering::SeqCst) + 1;
            Box::new(RecordingSource {
                kind,
                instance,
                log: log.clone(),
                fail_titles: fail_titles.clone(),
            })
        });
    }
    factory
}
