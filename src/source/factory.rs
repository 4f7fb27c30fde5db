use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::library::SourceKind;

use super::{LocalSource, PlaybackSource, RemoteSource};

/// Builds a fresh backend instance.
pub type SourceConstructor = Arc<dyn Fn() -> Box<dyn PlaybackSource> + Send + Sync>;

/// Map a source kind to a brand-new instance of the matching built-in backend.
///
/// Adding a `SourceKind` means adding a backend and an arm here.
pub fn create_source(kind: SourceKind) -> Box<dyn PlaybackSource> {
    match kind {
        SourceKind::Local => Box::new(LocalSource::new()),
        SourceKind::Remote => Box::new(RemoteSource::new()),
    }
}

/// Lookup table from source kind to constructor.
///
/// Kinds without a registered constructor fall back to `create_source`.
#[derive(Clone, Default)]
pub struct SourceFactory {
    constructors: HashMap<SourceKind, SourceConstructor>,
}

impl SourceFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `kind` with `constructor` instead of the built-in backend.
    pub fn register<F>(mut self, kind: SourceKind, constructor: F) -> Self
    where
        F: Fn() -> Box<dyn PlaybackSource> + Send + Sync + 'static,
    {
        self.constructors.insert(kind, Arc::new(constructor));
        self
    }

    /// Create a new, unloaded source for `kind`. Never reuses an instance.
    pub fn create(&self, kind: SourceKind) -> Box<dyn PlaybackSource> {
        match self.constructors.get(&kind) {
            Some(ctor) => ctor(),
            None => create_source(kind),
        }
    }
}

impl fmt::Debug for SourceFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<String> = self.constructors.keys().map(|k| k.to_string()).collect();
        kinds.sort();
        f.debug_struct("SourceFactory")
            .field("overrides", &kinds)
            .finish()
    }
}
