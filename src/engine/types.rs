//! Engine-facing small types and handles.
//!
//! Commands flow into the engine thread, discrete events flow back out,
//! and elapsed time is published through a shared progress handle the UI
//! samples once per frame.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug)]
pub enum EngineCmd {
    /// Open `path` and play from `from`. If the engine already holds this
    /// track paused, it resumes in place instead of reopening.
    Play {
        index: usize,
        path: PathBuf,
        from: Duration,
    },
    /// Pause the current track (ignored for any other index).
    Pause { index: usize },
    /// Move the current track to `to`, keeping its pause state.
    Seek { index: usize, to: Duration },
    /// Stop playback and shut the engine thread down.
    Quit,
}

/// Discrete playback events, reported on the engine's own schedule. A play
/// request is asynchronous: `Started` or `Rejected` arrives some event-loop
/// turns after the `Play` command was sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// The play request was accepted and audio is running.
    Started { index: usize },
    /// The play request was refused (unreadable or undecodable source).
    /// Transient: the row stays enabled and may be retried.
    Rejected { index: usize, reason: String },
    /// Probed total duration for a track.
    Metadata { index: usize, duration: Duration },
    /// The current track ran to completion.
    Ended { index: usize },
    /// The source died after a playable start. Terminal for that row.
    Failed { index: usize, reason: String },
}

/// Elapsed-time snapshot for the engine's current track.
#[derive(Debug, Clone)]
pub struct ProgressInfo {
    pub index: Option<usize>,
    pub elapsed: Duration,
    pub playing: bool,
}

impl Default for ProgressInfo {
    fn default() -> Self {
        Self {
            index: None,
            elapsed: Duration::ZERO,
            playing: false,
        }
    }
}

pub type ProgressHandle = Arc<Mutex<ProgressInfo>>;
