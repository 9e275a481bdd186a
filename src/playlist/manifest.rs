//! TOML playlist manifests.
//!
//! A manifest is the curated way to feed the player: it carries the track
//! order, a fallback duration string and an accent color per row, and may
//! name files that do not exist (yet). Existence is checked here, once,
//! and recorded on the descriptor.

use std::error::Error;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::model::{TrackDescriptor, make_display};

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default, rename = "track")]
    tracks: Vec<ManifestTrack>,
}

#[derive(Debug, Deserialize)]
struct ManifestTrack {
    id: Option<String>,
    title: String,
    artist: Option<String>,
    genre: Option<String>,
    /// Relative paths resolve against the manifest's directory.
    file: Option<String>,
    /// Force-mark a row as unplayable even if a file is named.
    #[serde(default)]
    missing: bool,
    /// Fallback duration text, e.g. "3:42".
    duration: Option<String>,
    /// Accent color, `#rrggbb`.
    accent: Option<String>,
}

/// Load track descriptors from a TOML manifest at `path`.
///
/// Order in the file is the display order. Rows whose file is absent are
/// kept and marked `missing` so the UI can show an inert control for them.
pub fn load_manifest(path: &Path) -> Result<Vec<TrackDescriptor>, Box<dyn Error>> {
    let text = fs::read_to_string(path)?;
    let manifest: Manifest = toml::from_str(&text)?;
    let base = path.parent().unwrap_or(Path::new("."));

    let mut descriptors = Vec::with_capacity(manifest.tracks.len());
    for (i, t) in manifest.tracks.into_iter().enumerate() {
        let resolved = t.file.as_deref().map(|f| {
            let p = Path::new(f);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                base.join(p)
            }
        });

        let missing = t.missing
            || match &resolved {
                Some(p) => !p.is_file(),
                None => false,
            };
        if missing || resolved.is_none() {
            log::warn!("manifest row {} ({}) has no playable source", i, t.title);
        }

        let display = make_display(&t.title, t.artist.as_deref());
        descriptors.push(TrackDescriptor {
            id: t.id.unwrap_or_else(|| format!("track-{i}")),
            title: t.title,
            artist: t.artist,
            genre: t.genre,
            path: resolved,
            missing,
            display_duration: t.duration.unwrap_or_else(|| "0:00".to_string()),
            accent: t.accent,
            display,
        });
    }

    Ok(descriptors)
}
