use std::ops::ControlFlow;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use crate::config::PlaybackSettings;
use crate::library::Song;
use crate::source::{PlaybackSource, SourceFactory};

use super::error::EngineError;
use super::ticker::{Ticker, spawn_ticker};
use super::types::{PlaybackEvent, PlaybackInfo, TICK_STEP_SECS};

/// Queue-driven playback state machine.
///
/// The engine owns the queue, the current position, the bound `PlaybackSource` and
/// the progress ticker. Commands and ticks serialize on one lock, so a tick never
/// lands in the middle of a command. State changes are pushed to every
/// `subscribe`r while that lock is held, in the order they happen.
///
/// Build one per application and hand out `&PlaybackEngine`; dropping it cancels
/// the ticker and stops the bound source.
pub struct PlaybackEngine {
    inner: Arc<Inner>,
}

struct Inner {
    state: Mutex<EngineState>,
    factory: SourceFactory,
    /// `None` when ticks are driven by hand.
    tick_interval: Option<Duration>,
    me: Weak<Inner>,
}

#[derive(Default)]
struct EngineState {
    queue: Vec<Song>,
    index: Option<usize>,
    current: Option<Song>,
    source: Option<Box<dyn PlaybackSource>>,
    playing: bool,
    progress: f64,
    ticker: Option<Ticker>,
    next_generation: u64,
    subscribers: Vec<Sender<PlaybackEvent>>,
}

impl EngineState {
    fn emit(&mut self, event: PlaybackEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    /// Announces the song whenever the position moves, even onto a repeat of the
    /// same song.
    fn set_current(&mut self, index: Option<usize>) {
        let moved = self.index != index;
        self.index = index;
        let song = index.and_then(|i| self.queue.get(i)).cloned();
        if moved || song != self.current {
            self.current = song.clone();
            self.emit(PlaybackEvent::CurrentSong(song));
        }
    }

    fn set_playing(&mut self, playing: bool) {
        if self.playing != playing {
            self.playing = playing;
            self.emit(PlaybackEvent::Playing(playing));
        }
    }

    fn set_progress(&mut self, progress: f64) {
        if self.progress != progress {
            self.progress = progress;
            self.emit(PlaybackEvent::Progress(progress));
        }
    }

    fn cancel_ticker(&mut self) {
        self.ticker = None;
    }

    fn ticker_is(&self, generation: u64) -> bool {
        self.ticker.as_ref().map(Ticker::generation) == Some(generation)
    }

    /// Stop playback without touching the position.
    fn halt(&mut self) {
        self.cancel_ticker();
        self.set_playing(false);
    }

    /// Stop and drop the bound source.
    fn release_source(&mut self) {
        if let Some(mut source) = self.source.take() {
            if let Err(e) = source.stop() {
                tracing::warn!(error = %e, kind = %source.kind(), "failed to stop outgoing source");
            }
        }
    }

    fn snapshot(&self) -> PlaybackInfo {
        PlaybackInfo {
            index: self.index,
            song: self.current.clone(),
            queue_len: self.queue.len(),
            playing: self.playing,
            progress: self.progress,
        }
    }
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Create, load and bind a fresh source for the current song.
    fn bind(&self, st: &mut EngineState) -> Result<(), EngineError> {
        let Some(song) = st.current.clone() else {
            return Err(EngineError::EmptyQueue);
        };

        let mut source = self.factory.create(song.source_kind());
        source.load(&song).map_err(|source| EngineError::SourceLoad {
            title: song.title().to_string(),
            source,
        })?;
        st.source = Some(source);
        Ok(())
    }

    /// Make `index` current: drop the old source, reset progress, bind a new one.
    fn switch_to(&self, st: &mut EngineState, index: usize) -> Result<(), EngineError> {
        st.release_source();
        st.set_current(Some(index));
        st.set_progress(0.0);
        if let Some(song) = &st.current {
            tracing::debug!(index, title = song.title(), "current song changed");
        }
        self.bind(st)
    }

    /// Replace any live ticker with a new one.
    fn start_ticker(&self, st: &mut EngineState) -> Result<(), EngineError> {
        st.cancel_ticker();
        let Some(interval) = self.tick_interval else {
            return Ok(());
        };

        st.next_generation += 1;
        let me = self.me.clone();
        let ticker = spawn_ticker(interval, st.next_generation, move |generation| {
            match me.upgrade() {
                Some(inner) => inner.scheduled_tick(generation),
                None => ControlFlow::Break(()),
            }
        })?;
        st.ticker = Some(ticker);
        Ok(())
    }

    fn start_playback(&self, st: &mut EngineState) -> Result<(), EngineError> {
        if st.source.is_none() {
            self.bind(st)?;
        }
        self.start_ticker(st)?;

        if let Some(source) = st.source.as_mut() {
            if let Err(e) = source.play() {
                st.cancel_ticker();
                return Err(e.into());
            }
        }
        st.set_playing(true);
        Ok(())
    }

    /// Switch to `index` and play it, halting if either step fails.
    fn change_track(&self, st: &mut EngineState, index: usize) -> Result<(), EngineError> {
        let result = self
            .switch_to(st, index)
            .and_then(|()| self.start_playback(st));
        if result.is_err() {
            st.halt();
        }
        result
    }

    fn step(&self, st: &mut EngineState, forward: bool) -> Result<(), EngineError> {
        let Some(index) = st.index else {
            return Err(EngineError::EmptyQueue);
        };

        let target = if forward {
            if index + 1 >= st.queue.len() {
                return Err(EngineError::EndOfQueue);
            }
            index + 1
        } else {
            if index == 0 {
                return Err(EngineError::StartOfQueue);
            }
            index - 1
        };

        self.change_track(st, target)
    }

    /// The last song played out: park at its end with nothing running.
    fn finish(&self, st: &mut EngineState) {
        st.cancel_ticker();
        st.release_source();
        st.set_playing(false);
        st.emit(PlaybackEvent::QueueEnded);
        tracing::debug!("queue finished");
    }

    fn advance(&self, st: &mut EngineState) -> Result<(), EngineError> {
        if !st.playing {
            return Ok(());
        }
        let Some(index) = st.index else {
            return Ok(());
        };
        let Some(duration) = st.current.as_ref().map(Song::duration_secs) else {
            return Ok(());
        };

        let progress = (st.progress + TICK_STEP_SECS).min(duration);
        st.set_progress(progress);
        if progress < duration {
            return Ok(());
        }

        if index + 1 < st.queue.len() {
            self.change_track(st, index + 1)
        } else {
            self.finish(st);
            Ok(())
        }
    }

    fn scheduled_tick(&self, generation: u64) -> ControlFlow<()> {
        let mut st = self.lock();
        if !st.ticker_is(generation) {
            return ControlFlow::Break(());
        }

        if let Err(e) = self.advance(&mut st) {
            tracing::warn!(error = %e, "auto-advance failed, playback halted");
        }

        if st.ticker_is(generation) {
            ControlFlow::Continue(())
        } else {
            ControlFlow::Break(())
        }
    }
}

impl PlaybackEngine {
    /// Create an engine backed by the built-in sources.
    pub fn new(settings: PlaybackSettings) -> Self {
        Self::with_factory(settings, SourceFactory::new())
    }

    /// Create an engine that obtains its sources from `factory`.
    pub fn with_factory(settings: PlaybackSettings, factory: SourceFactory) -> Self {
        let tick_interval = (settings.tick_interval_ms > 0)
            .then(|| Duration::from_millis(settings.tick_interval_ms));

        let inner = Arc::new_cyclic(|me| Inner {
            state: Mutex::new(EngineState::default()),
            factory,
            tick_interval,
            me: me.clone(),
        });
        Self { inner }
    }

    /// Receive every state change from now on.
    pub fn subscribe(&self) -> Receiver<PlaybackEvent> {
        let (tx, rx) = mpsc::channel();
        self.inner.lock().subscribers.push(tx);
        rx
    }

    /// Replace the queue and park on its first song, paused at 0.
    ///
    /// An empty `songs` empties the engine and returns `EmptyQueue`.
    pub fn load_queue(&self, songs: Vec<Song>) -> Result<(), EngineError> {
        let mut st = self.inner.lock();
        st.cancel_ticker();
        st.release_source();
        st.set_playing(false);

        if songs.is_empty() {
            st.queue.clear();
            st.set_current(None);
            st.set_progress(0.0);
            return Err(EngineError::EmptyQueue);
        }

        tracing::debug!(songs = songs.len(), "queue loaded");
        st.queue = songs;
        self.inner.switch_to(&mut st, 0)
    }

    /// Start or resume the current song. Resuming keeps progress; a song that
    /// already played out restarts from 0.
    pub fn play(&self) -> Result<(), EngineError> {
        let mut st = self.inner.lock();
        let Some(duration) = st.current.as_ref().map(Song::duration_secs) else {
            return Err(EngineError::EmptyQueue);
        };
        if st.playing {
            return Ok(());
        }

        if st.progress >= duration {
            st.set_progress(0.0);
        }
        self.inner.start_playback(&mut st)
    }

    /// Pause playback, keeping progress. Does nothing when not playing.
    pub fn pause(&self) -> Result<(), EngineError> {
        let mut st = self.inner.lock();
        if !st.playing {
            return Ok(());
        }

        st.cancel_ticker();
        let result = match st.source.as_mut() {
            Some(source) => source.pause(),
            None => Ok(()),
        };
        st.set_playing(false);
        result.map_err(EngineError::from)
    }

    /// Move to the next song and play it.
    pub fn skip(&self) -> Result<(), EngineError> {
        let mut st = self.inner.lock();
        self.inner.step(&mut st, true)
    }

    /// Move to the previous song and play it.
    pub fn previous(&self) -> Result<(), EngineError> {
        let mut st = self.inner.lock();
        self.inner.step(&mut st, false)
    }

    /// Advance progress by one tick, auto-advancing at the end of the song.
    /// Does nothing unless playing.
    pub fn tick(&self) -> Result<(), EngineError> {
        let mut st = self.inner.lock();
        self.inner.advance(&mut st)
    }

    pub fn current_song(&self) -> Option<Song> {
        self.inner.lock().current.clone()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.inner.lock().index
    }

    pub fn queue(&self) -> Vec<Song> {
        self.inner.lock().queue.clone()
    }

    pub fn is_playing(&self) -> bool {
        self.inner.lock().playing
    }

    pub fn progress(&self) -> f64 {
        self.inner.lock().progress
    }

    pub fn snapshot(&self) -> PlaybackInfo {
        self.inner.lock().snapshot()
    }
}

impl Drop for PlaybackEngine {
    fn drop(&mut self) {
        let mut st = self.inner.lock();
        st.cancel_ticker();
        st.release_source();
    }
}
