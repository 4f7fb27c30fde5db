use super::*;
use crate::config::{PlaybackSettings, TrackField};
use crate::library::SourceKind;
use crate::source::testing::{CallLog, recording_factory};

fn engine() -> PlaybackEngine {
    let settings = PlaybackSettings {
        tick_interval_ms: 0,
        ..PlaybackSettings::default()
    };
    PlaybackEngine::with_factory(settings, recording_factory(&CallLog::default(), &[]))
}

fn song(title: &str, artist: &str, dur: f64) -> Song {
    Song::new(title, artist, dur, SourceKind::Local).unwrap()
}

#[test]
fn seeds_from_snapshot_and_shows_placeholder_when_empty() {
    let engine = engine();
    let vm = PlaybackViewModel::new(&engine, UiSettings::default());
    assert_eq!(vm.now_playing(), &NowPlaying::default());
    assert_eq!(vm.track_text(), "Nothing queued");
    assert_eq!(vm.time_text().as_deref(), Some("00:00"));
    assert_eq!(vm.status_line(), "⏸ Nothing queued  [00:00]");

    engine.load_queue(vec![song("A", "X", 90.0)]).unwrap();
    engine.play().unwrap();
    let vm = PlaybackViewModel::new(&engine, UiSettings::default());
    assert!(vm.now_playing().playing);
    assert_eq!(vm.track_text(), "X - A");
}

#[test]
fn follows_engine_through_pump() {
    let engine = engine();
    let mut vm = PlaybackViewModel::new(&engine, UiSettings::default());

    engine
        .load_queue(vec![song("Intro", "Band", 2.0), song("Outro", "Band", 125.0)])
        .unwrap();
    engine.play().unwrap();
    engine.tick().unwrap();
    assert_eq!(vm.pump(), 3);
    assert_eq!(vm.status_line(), "▶ Band - Intro  [00:01 / 00:02]");

    engine.tick().unwrap();
    vm.pump();
    assert_eq!(vm.now_playing().song.as_ref().map(Song::title), Some("Outro"));
    assert_eq!(vm.now_playing().progress, 0.0);
    assert_eq!(vm.status_line(), "▶ Band - Outro  [00:00 / 02:05]");

    engine.pause().unwrap();
    vm.pump();
    assert_eq!(vm.status_line(), "⏸ Band - Outro  [00:00 / 02:05]");
    assert_eq!(vm.pump(), 0);
}

#[test]
fn marks_queue_end_until_playback_resumes() {
    let engine = engine();
    let mut vm = PlaybackViewModel::new(&engine, UiSettings::default());
    engine.load_queue(vec![song("Only", "Solo", 1.0)]).unwrap();
    engine.play().unwrap();
    engine.tick().unwrap();
    vm.pump();

    assert!(vm.now_playing().ended);
    assert!(!vm.now_playing().playing);
    assert_eq!(vm.status_line(), "■ Solo - Only  [00:01 / 00:01]");

    engine.play().unwrap();
    vm.pump();
    assert!(!vm.now_playing().ended);
    assert!(vm.now_playing().playing);
}

#[test]
fn wait_times_out_without_events() {
    let engine = engine();
    let mut vm = PlaybackViewModel::new(&engine, UiSettings::default());
    assert!(matches!(
        vm.wait(Duration::from_millis(5)),
        Err(RecvTimeoutError::Timeout)
    ));

    engine.load_queue(vec![song("A", "X", 3.0)]).unwrap();
    engine.play().unwrap();
    assert_eq!(vm.wait(Duration::from_millis(5)).unwrap(), 2);

    drop(engine);
    assert!(matches!(
        vm.wait(Duration::from_millis(5)),
        Err(RecvTimeoutError::Disconnected)
    ));
}

#[test]
fn honours_configured_fields_and_separators() {
    let engine = engine();
    let ui = UiSettings {
        track_fields: vec![TrackField::Title, TrackField::Source],
        track_separator: " @ ".into(),
        time_fields: vec![TimeField::Remaining, TimeField::Elapsed],
        time_separator: " | ".into(),
    };
    let mut vm = PlaybackViewModel::new(&engine, ui);

    engine.load_queue(vec![song("Long", "X", 600.0)]).unwrap();
    engine.play().unwrap();
    for _ in 0..61 {
        engine.tick().unwrap();
    }
    vm.pump();

    assert_eq!(vm.track_text(), "Long @ local");
    assert_eq!(vm.time_text().as_deref(), Some("-08:59 | 01:01"));
}

#[test]
fn empty_time_fields_drop_the_time_block() {
    let engine = engine();
    let ui = UiSettings {
        time_fields: Vec::new(),
        ..UiSettings::default()
    };
    let vm = PlaybackViewModel::new(&engine, ui);
    assert_eq!(vm.time_text(), None);
    assert_eq!(vm.status_line(), "⏸ Nothing queued");
}
