use super::testing::{CallLog, recording_factory};
use super::*;
use std::fs;
use tempfile::tempdir;

fn song(kind: SourceKind, location: Option<&str>) -> Song {
    let s = Song::new("Track", "Artist", 10.0, kind).unwrap();
    match location {
        Some(loc) => s.with_location(loc),
        None => s,
    }
}

#[test]
fn create_source_maps_every_kind_to_matching_backend() {
    for kind in [SourceKind::Local, SourceKind::Remote] {
        assert_eq!(create_source(kind).kind(), kind);
    }
}

#[test]
fn local_source_loads_existing_file_and_tracks_transport() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("a.flac");
    fs::write(&path, b"x").unwrap();

    let mut src = LocalSource::new();
    assert_eq!(src.transport(), Transport::Idle);
    assert!(matches!(src.play(), Err(SourceError::NotLoaded)));

    src.load(&song(SourceKind::Local, path.to_str())).unwrap();
    assert_eq!(src.path(), Some(path.as_path()));
    assert_eq!(src.transport(), Transport::Loaded);

    src.play().unwrap();
    assert_eq!(src.transport(), Transport::Playing);
    src.pause().unwrap();
    assert_eq!(src.transport(), Transport::Paused);

    src.stop().unwrap();
    assert_eq!(src.transport(), Transport::Idle);
    assert!(src.path().is_none());
    // stop is idempotent
    src.stop().unwrap();
    assert!(matches!(src.pause(), Err(SourceError::NotLoaded)));
}

#[test]
fn local_source_reports_missing_file_and_missing_location() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("gone.mp3");

    let mut src = LocalSource::new();
    assert!(matches!(
        src.load(&song(SourceKind::Local, missing.to_str())),
        Err(SourceError::FileNotFound(p)) if p == missing
    ));
    assert!(matches!(
        src.load(&song(SourceKind::Local, None)),
        Err(SourceError::MissingLocation { .. })
    ));
    // a directory is not a playable file
    assert!(matches!(
        src.load(&song(SourceKind::Local, dir.path().to_str())),
        Err(SourceError::FileNotFound(_))
    ));
    assert_eq!(src.transport(), Transport::Idle);
}

#[test]
fn failed_reload_clears_previously_loaded_state() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("a.flac");
    fs::write(&path, b"x").unwrap();

    let mut local = LocalSource::new();
    local.load(&song(SourceKind::Local, path.to_str())).unwrap();
    local.play().unwrap();
    assert!(local.load(&song(SourceKind::Local, None)).is_err());
    assert!(local.path().is_none());
    assert_eq!(local.transport(), Transport::Idle);
    assert!(matches!(local.play(), Err(SourceError::NotLoaded)));

    let mut remote = RemoteSource::new();
    remote
        .load(&song(SourceKind::Remote, Some("https://example.com/a.ogg")))
        .unwrap();
    assert!(remote.load(&song(SourceKind::Remote, Some("ftp://example.com/a.ogg"))).is_err());
    assert!(remote.url().is_none());
    assert_eq!(remote.transport(), Transport::Idle);
    assert!(matches!(remote.pause(), Err(SourceError::NotLoaded)));
}

#[test]
fn remote_source_accepts_only_http_urls() {
    let mut src = RemoteSource::new();
    src.load(&song(SourceKind::Remote, Some("https://example.com/a.ogg")))
        .unwrap();
    assert_eq!(src.url(), Some("https://example.com/a.ogg"));
    src.play().unwrap();
    assert_eq!(src.transport(), Transport::Playing);

    let mut src = RemoteSource::new();
    src.load(&song(SourceKind::Remote, Some("HTTP://example.com/a.ogg")))
        .unwrap();

    for bad in ["ftp://example.com/a.ogg", "/music/a.ogg", "https://"] {
        let mut src = RemoteSource::new();
        assert!(matches!(
            src.load(&song(SourceKind::Remote, Some(bad))),
            Err(SourceError::UnsupportedUrl(_))
        ));
        assert!(matches!(src.play(), Err(SourceError::NotLoaded)));
    }
}

#[test]
fn factory_defaults_to_builtin_backends() {
    let factory = SourceFactory::new();
    assert_eq!(factory.create(SourceKind::Local).kind(), SourceKind::Local);
    assert_eq!(factory.create(SourceKind::Remote).kind(), SourceKind::Remote);
}

#[test]
fn factory_registered_constructor_overrides_kind_and_builds_fresh_instances() {
    let log = CallLog::default();
    let factory = recording_factory(&log, &[]);

    let s = song(SourceKind::Remote, None);
    let mut a = factory.create(SourceKind::Remote);
    let mut b = factory.create(SourceKind::Remote);
    a.load(&s).unwrap();
    b.play().unwrap();

    assert_eq!(log.instances(), 2);
    assert_eq!(log.calls(), vec!["1:load Track", "2:play"]);
}

#[test]
fn factory_override_only_affects_registered_kind() {
    let factory = SourceFactory::new().register(SourceKind::Remote, || {
        Box::new(LocalSource::new())
    });
    assert_eq!(factory.create(SourceKind::Remote).kind(), SourceKind::Local);
    assert_eq!(factory.create(SourceKind::Local).kind(), SourceKind::Local);
    assert!(format!("{factory:?}").contains("remote"));
}
