use std::fs;
use std::path::Path;

use crate::config::PlaylistSettings;

use super::*;

fn write_manifest(dir: &Path, body: &str) -> std::path::PathBuf {
    let path = dir.join("playlist.toml");
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn manifest_preserves_order_and_fields() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("first.mp3"), b"not really audio").unwrap();
    let manifest = write_manifest(
        dir.path(),
        r##"
[[track]]
id = "opener"
title = "Opener"
artist = "Someone"
genre = "House"
file = "first.mp3"
duration = "3:41"
accent = "#ff8800"

[[track]]
title = "Closer"
"##,
    );

    let tracks = load_manifest(&manifest).unwrap();
    assert_eq!(tracks.len(), 2);

    let first = &tracks[0];
    assert_eq!(first.id, "opener");
    assert_eq!(first.title, "Opener");
    assert_eq!(first.artist.as_deref(), Some("Someone"));
    assert_eq!(first.genre.as_deref(), Some("House"));
    assert_eq!(first.display, "Someone - Opener");
    assert_eq!(first.display_duration, "3:41");
    assert_eq!(first.accent.as_deref(), Some("#ff8800"));
    assert!(first.playable());

    // Defaults for a minimal row.
    let second = &tracks[1];
    assert_eq!(second.id, "track-1");
    assert_eq!(second.display, "Closer");
    assert_eq!(second.display_duration, "0:00");
    assert_eq!(second.path, None);
    assert!(!second.playable());
}

#[test]
fn manifest_resolves_relative_paths_against_its_directory() {
    let dir = tempfile::tempdir().unwrap();
    let sub = dir.path().join("media");
    fs::create_dir(&sub).unwrap();
    fs::write(sub.join("song.flac"), b"x").unwrap();
    let manifest = write_manifest(
        dir.path(),
        r#"
[[track]]
title = "Song"
file = "media/song.flac"
"#,
    );

    let tracks = load_manifest(&manifest).unwrap();
    assert_eq!(tracks[0].path.as_deref(), Some(sub.join("song.flac").as_path()));
    assert!(!tracks[0].missing);
}

#[test]
fn manifest_marks_absent_and_flagged_files_missing() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("real.mp3"), b"x").unwrap();
    let manifest = write_manifest(
        dir.path(),
        r#"
[[track]]
title = "Gone"
file = "nope.mp3"

[[track]]
title = "Withheld"
file = "real.mp3"
missing = true
"#,
    );

    let tracks = load_manifest(&manifest).unwrap();
    // Named but absent on disk.
    assert!(tracks[0].missing);
    assert!(!tracks[0].playable());
    // Present on disk but explicitly withheld.
    assert!(tracks[1].missing);
    assert!(!tracks[1].playable());
}

#[test]
fn manifest_rejects_invalid_toml() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(dir.path(), "[[track]\ntitle = broken");
    assert!(load_manifest(&manifest).is_err());
}

#[test]
fn scan_filters_extensions_and_sorts() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Zeta.mp3"), b"x").unwrap();
    fs::write(dir.path().join("alpha.FLAC"), b"x").unwrap();
    fs::write(dir.path().join("notes.txt"), b"x").unwrap();
    fs::write(dir.path().join("cover.jpg"), b"x").unwrap();

    let tracks = scan(dir.path(), &PlaylistSettings::default());
    let names: Vec<&str> = tracks.iter().map(|t| t.display.as_str()).collect();
    // Case-insensitive sort, extension match is case-insensitive too.
    assert_eq!(names, vec!["alpha", "Zeta"]);
    assert!(tracks.iter().all(|t| t.playable()));
    // Unreadable tags fall back to the zero duration text.
    assert!(tracks.iter().all(|t| t.display_duration == "0:00"));
}

#[test]
fn scan_skips_hidden_files_by_default() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(".hidden.mp3"), b"x").unwrap();
    fs::write(dir.path().join("shown.mp3"), b"x").unwrap();

    let settings = PlaylistSettings::default();
    let tracks = scan(dir.path(), &settings);
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].display, "shown");

    let settings = PlaylistSettings {
        include_hidden: true,
        ..PlaylistSettings::default()
    };
    let tracks = scan(dir.path(), &settings);
    assert_eq!(tracks.len(), 2);
}

#[test]
fn scan_is_shallow_unless_recursive() {
    let dir = tempfile::tempdir().unwrap();
    let sub = dir.path().join("deeper");
    fs::create_dir(&sub).unwrap();
    fs::write(dir.path().join("top.mp3"), b"x").unwrap();
    fs::write(sub.join("below.mp3"), b"x").unwrap();

    let settings = PlaylistSettings::default();
    let tracks = scan(dir.path(), &settings);
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].display, "top");

    let settings = PlaylistSettings {
        recursive: true,
        ..PlaylistSettings::default()
    };
    let tracks = scan(dir.path(), &settings);
    assert_eq!(tracks.len(), 2);
}

#[test]
fn make_display_prefers_artist_title_pair() {
    assert_eq!(model::make_display("Song", Some("Artist")), "Artist - Song");
    assert_eq!(model::make_display("Song", Some("  ")), "Song");
    assert_eq!(model::make_display("Song", None), "Song");
}
