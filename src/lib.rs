//! Queue-driven playback with interchangeable playback sources.
//!
//! A [`PlaybackEngine`] plays an ordered queue of [`Song`]s, delegating
//! transport to a fresh [`PlaybackSource`] per song and advancing through the
//! queue on a periodic tick. Presentation layers follow it through
//! [`PlaybackViewModel`].

pub mod config;
pub mod engine;
pub mod library;
pub mod source;
pub mod view_model;

pub use engine::{EngineError, PlaybackEngine, PlaybackEvent, PlaybackInfo};
pub use library::{Song, SongId, SourceKind};
pub use source::{PlaybackSource, SourceError, SourceFactory};
pub use view_model::PlaybackViewModel;
