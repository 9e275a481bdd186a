//! Directory scan fallback.
//!
//! When no manifest is given, walk a directory and build one descriptor per
//! audio file found. Scanned tracks always have a real source, so nothing
//! here can produce a `missing` row.

use std::path::Path;
use std::time::Duration;

use lofty::file::{AudioFile, TaggedFileExt};
use lofty::tag::ItemKey;
use walkdir::WalkDir;

use crate::config::PlaylistSettings;
use crate::player::format_duration;

use super::model::{TrackDescriptor, make_display};

fn is_audio_file(path: &Path, settings: &PlaylistSettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

pub fn scan(dir: &Path, settings: &PlaylistSettings) -> Vec<TrackDescriptor> {
    let mut descriptors: Vec<TrackDescriptor> = Vec::new();

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if path.is_file()
            && (settings.include_hidden || !is_hidden(path))
            && is_audio_file(path, settings)
        {
            let default_title = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("UNKNOWN")
                .to_string();

            let mut title = default_title;
            let mut artist: Option<String> = None;
            let mut genre: Option<String> = None;
            let mut duration: Option<Duration> = None;

            if let Ok(tagged) = lofty::read_from_path(path) {
                duration = Some(tagged.properties().duration());

                if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
                    if let Some(v) = tag.get_string(&ItemKey::TrackTitle) {
                        if !v.trim().is_empty() {
                            title = v.to_string();
                        }
                    }
                    if let Some(v) = tag.get_string(&ItemKey::TrackArtist) {
                        let v = v.trim();
                        if !v.is_empty() {
                            artist = Some(v.to_string());
                        }
                    }
                    if let Some(v) = tag.get_string(&ItemKey::Genre) {
                        let v = v.trim();
                        if !v.is_empty() {
                            genre = Some(v.to_string());
                        }
                    }
                }
            }

            let display = make_display(&title, artist.as_deref());
            descriptors.push(TrackDescriptor {
                id: path.display().to_string(),
                title,
                artist,
                genre,
                path: Some(path.to_path_buf()),
                missing: false,
                display_duration: duration
                    .map(format_duration)
                    .unwrap_or_else(|| "0:00".to_string()),
                accent: None,
                display,
            });
        }
    }

    descriptors.sort_by(|a, b| a.display.to_lowercase().cmp(&b.display.to_lowercase()));
    descriptors
}
