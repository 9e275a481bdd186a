//! Cross-track coordination: one playlist, at most one track playing.
//!
//! The controller owns the ordered player collection, enforces the global
//! mutual-exclusion invariant synchronously (every other playing row is
//! halted before the requester's own transition begins), and optionally
//! advances to the next row when a track runs out.

use std::path::PathBuf;
use std::time::Duration;

use crate::engine::EngineEvent;
use crate::playlist::TrackDescriptor;

use super::track::{TrackPlayer, TrackState};

/// Effect the controller asks the runtime to forward to the engine.
///
/// The controller itself never touches the audio backend, which keeps the
/// whole state machine testable without a sound device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackRequest {
    /// Open (or resume, if the engine still holds this track paused) and
    /// start playing from `from`.
    Play {
        index: usize,
        path: PathBuf,
        from: Duration,
    },
    Pause {
        index: usize,
    },
    Seek {
        index: usize,
        to: Duration,
    },
}

pub struct PlaylistController {
    players: Vec<TrackPlayer>,
    /// Index of the at-most-one `Playing` player. Written only through the
    /// toggle/exclusivity/event paths, never directly.
    active: Option<usize>,
    auto_advance: bool,
}

impl PlaylistController {
    /// Register one player per descriptor, in descriptor order.
    pub fn new(descriptors: Vec<TrackDescriptor>, auto_advance: bool) -> Self {
        let players = descriptors.into_iter().map(TrackPlayer::new).collect();
        Self {
            players,
            active: None,
            auto_advance,
        }
    }

    pub fn players(&self) -> &[TrackPlayer] {
        &self.players
    }

    pub fn player(&self, index: usize) -> Option<&TrackPlayer> {
        self.players.get(index)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Index of the player currently in `Playing` state, if any.
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn auto_advance(&self) -> bool {
        self.auto_advance
    }

    pub fn toggle_auto_advance(&mut self) {
        self.auto_advance = !self.auto_advance;
    }

    /// Play/pause the row at `index`.
    ///
    /// Disabled and errored rows are inert: no request is emitted and no
    /// state changes. Starting a row first halts every other playing row,
    /// so the mutual-exclusion invariant holds even though the engine's
    /// answer arrives later.
    pub fn toggle(&mut self, index: usize) -> Option<PlaybackRequest> {
        let player = self.players.get(index)?;
        if !player.can_play() {
            return None;
        }

        if player.state() == TrackState::Playing {
            self.players[index].pause();
            if self.active == Some(index) {
                self.active = None;
            }
            return Some(PlaybackRequest::Pause { index });
        }

        let path = player.descriptor().path.clone()?;
        self.request_exclusivity(index);
        let player = &mut self.players[index];
        player.rearm();
        player.begin_play();
        self.active = Some(index);
        Some(PlaybackRequest::Play {
            index,
            path,
            from: self.players[index].position(),
        })
    }

    /// Forced-play path: start `index` from zero, bypassing pause/resume
    /// semantics. Used by auto-advance. Inert rows stay inert.
    pub fn force_play(&mut self, index: usize) -> Option<PlaybackRequest> {
        let player = self.players.get(index)?;
        if !player.can_play() {
            return None;
        }
        let path = player.descriptor().path.clone()?;
        self.request_exclusivity(index);
        let player = &mut self.players[index];
        player.rearm();
        player.rewind();
        player.begin_play();
        self.active = Some(index);
        Some(PlaybackRequest::Play {
            index,
            path,
            from: Duration::ZERO,
        })
    }

    /// Seek the row at `index` to a fractional position (0.0..=1.0).
    ///
    /// No-op while the duration is unknown or the row is disabled.
    pub fn seek(&mut self, index: usize, fraction: f64) -> Option<PlaybackRequest> {
        let to = self.players.get_mut(index)?.seek_fraction(fraction)?;
        Some(PlaybackRequest::Seek { index, to })
    }

    /// Feed one discrete engine event through the state machines. May
    /// produce a follow-up request (auto-advance starting the next row).
    pub fn handle_event(&mut self, event: EngineEvent) -> Option<PlaybackRequest> {
        match event {
            EngineEvent::Started { index } => {
                if let Some(p) = self.players.get_mut(index) {
                    p.confirm_play();
                }
                None
            }
            EngineEvent::Rejected { index, reason } => {
                let p = self.players.get_mut(index)?;
                log::warn!("play rejected on {}: {}", p.descriptor().id, reason);
                p.reject_play();
                if self.active == Some(index) {
                    self.active = None;
                }
                None
            }
            EngineEvent::Metadata { index, duration } => {
                if let Some(p) = self.players.get_mut(index) {
                    p.on_metadata(duration);
                }
                None
            }
            EngineEvent::Ended { index } => {
                let p = self.players.get_mut(index)?;
                p.on_ended();
                p.rearm();
                if self.active == Some(index) {
                    self.active = None;
                }
                if self.auto_advance {
                    self.advance(index)
                } else {
                    None
                }
            }
            EngineEvent::Failed { index, reason } => {
                let p = self.players.get_mut(index)?;
                log::error!("media error on {}: {}", p.descriptor().id, reason);
                p.on_error();
                if self.active == Some(index) {
                    self.active = None;
                }
                None
            }
        }
    }

    /// High-frequency progress sample for the engine's current track.
    pub fn on_progress(&mut self, index: usize, elapsed: Duration) {
        if let Some(p) = self.players.get_mut(index) {
            p.on_time_advance(elapsed);
        }
    }

    /// Halt every player other than `index` that is (or is about to be)
    /// playing. Runs to completion before the requester transitions, which
    /// is what makes the at-most-one-playing invariant hold.
    fn request_exclusivity(&mut self, index: usize) {
        for (i, p) in self.players.iter_mut().enumerate() {
            if i != index && (p.state() == TrackState::Playing || p.pending_play()) {
                p.halt();
            }
        }
        if self.active != Some(index) {
            self.active = None;
        }
    }

    /// Auto-advance policy: the row at `index + 1`, if there is one, gets
    /// the forced-play path. Past the last row nothing happens. A disabled
    /// or errored successor is never started; the permanence invariants
    /// outrank advancement.
    fn advance(&mut self, from: usize) -> Option<PlaybackRequest> {
        let next = from.checked_add(1)?;
        if next >= self.players.len() {
            return None;
        }
        self.force_play(next)
    }
}
