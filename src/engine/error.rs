use crate::source::SourceError;

/// Why an engine command did not take effect.
///
/// Boundary conditions leave the engine state untouched; `SourceLoad` leaves the
/// failed song current but unbound and paused.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("the queue is empty")]
    EmptyQueue,

    #[error("already at the last song in the queue")]
    EndOfQueue,

    #[error("already at the first song in the queue")]
    StartOfQueue,

    #[error("failed to load \"{title}\": {source}")]
    SourceLoad {
        title: String,
        #[source]
        source: SourceError,
    },

    #[error("playback source error: {0}")]
    Source(#[from] SourceError),

    #[error("failed to start the progress ticker: {0}")]
    Ticker(#[from] std::io::Error),
}
