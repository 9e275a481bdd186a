//! Playback state machines: per-track players and the playlist controller.
//!
//! Everything in this module is pure state; audio I/O lives in `engine`.

mod controller;
mod time;
mod track;

pub use controller::{PlaybackRequest, PlaylistController};
pub use time::{format_duration, format_seconds};
pub use track::{TrackPlayer, TrackState};
