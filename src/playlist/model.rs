use std::path::PathBuf;

/// Immutable description of one track row, produced by a loader.
///
/// Players never touch the filesystem themselves: whether the source file
/// exists is resolved at load time and recorded in `missing`.
#[derive(Clone, Debug)]
pub struct TrackDescriptor {
    /// Stable identifier, unique within one load.
    pub id: String,
    pub title: String,
    pub artist: Option<String>,
    pub genre: Option<String>,
    /// Audio source. `None` means the manifest never named a file.
    pub path: Option<PathBuf>,
    /// True when the named file was absent at load time.
    pub missing: bool,
    /// Fallback duration text shown until real metadata is known.
    pub display_duration: String,
    /// Cosmetic accent color as a `#rrggbb` string.
    pub accent: Option<String>,
    /// Precomputed row text, usually "Artist - Title".
    pub display: String,
}

impl TrackDescriptor {
    /// A track can only ever play if it had a real source at load time.
    pub fn playable(&self) -> bool {
        self.path.is_some() && !self.missing
    }
}

pub(super) fn make_display(title: &str, artist: Option<&str>) -> String {
    match artist {
        Some(a) if !a.trim().is_empty() => format!("{} - {}", a.trim(), title),
        _ => title.to_string(),
    }
}
