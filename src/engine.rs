//! The playback engine: queue, position, bound source and progress ticker.
//!
//! `PlaybackEngine` is the single owner of playback state. Callers issue
//! commands (`load_queue`, `play`, `pause`, `skip`, `previous`) and observe the
//! results through `subscribe` or `snapshot`.

mod error;
mod player;
mod ticker;
mod types;

pub use error::EngineError;
pub use player::PlaybackEngine;
pub use types::{PlaybackEvent, PlaybackInfo, TICK_STEP_SECS};
